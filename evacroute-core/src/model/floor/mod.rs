//! Floor plan graph model

pub mod components;
pub mod graph;

pub use components::{FloorNode, NodeRole, Passage};
pub use graph::{FloorGraph, GraphDiagnostics, IndexedPoint, Neighbor};
