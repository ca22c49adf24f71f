//! Hazard-aware evacuation routing over floor plan graphs.
//!
//! A floor dataset (rooms, junctions, exits, corridors and danger zones) is
//! loaded once into an immutable [`FloorGraph`]. Every route request then runs
//! a stateless multi-goal A* search against a snapshot of the hazard zones and
//! returns the cheapest reachable exit.

pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{FloorPlan, create_floor_graph, load_floor_plan};
pub use model::{FloorGraph, FloorNode, GraphDiagnostics, HazardZone, NodeRole};
pub use routing::{
    EdgePenalty, GoalSelector, HazardConfig, HazardState, RouteError, RouteRequest, RouteResult,
    SearchConfig, SearchStrategy, plan_route,
};

/// Identifier of a node inside a floor dataset
pub type NodeId = String;
/// Traversal cost, in floor plan units
pub type Cost = f64;

/// Penalty added for crossing a soft hazard zone unless configured otherwise
pub const DEFAULT_INTERSECT_PENALTY: Cost = 10_000.0;
/// Distance from a zone within which an edge midpoint starts to be penalized
pub const DEFAULT_PROXIMITY_RADIUS: f64 = 40.0;
/// Penalty for an edge whose midpoint touches a zone, fading to zero at the radius
pub const DEFAULT_PROXIMITY_PENALTY: Cost = 50.0;
