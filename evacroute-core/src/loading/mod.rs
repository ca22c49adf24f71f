//! This module is responsible for reading floor datasets and building the
//! routing graph out of them.

mod builder;
mod dataset;

pub use builder::create_floor_graph;
pub use dataset::{FloorPlan, RawEdge, RawNode, load_floor_plan};
