pub use crate::{DEFAULT_INTERSECT_PENALTY, DEFAULT_PROXIMITY_PENALTY, DEFAULT_PROXIMITY_RADIUS};

// Re-export key components
pub use crate::geometry::{point_to_rect_distance, segment_intersects_rect};
pub use crate::loading::{FloorPlan, create_floor_graph, load_floor_plan};
pub use crate::model::{FloorGraph, FloorNode, GraphDiagnostics, HazardZone, NodeRole};
pub use crate::routing::{
    EdgePenalty, GoalSelector, HazardConfig, HazardField, HazardState, RouteError, RouteRequest,
    RouteResult, SearchConfig, SearchStrategy, plan_route,
};

// Core scalar types
pub use crate::Cost;
pub use crate::Error;
pub use crate::NodeId;
