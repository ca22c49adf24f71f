//! Hazard-aware multi-goal routing

mod astar;
mod dijkstra;
pub mod hazard_cost;
mod planner;
pub mod request;
mod state;

pub use hazard_cost::{EdgePenalty, HazardConfig, HazardField, HazardState};
pub use planner::plan_route;
pub use request::{
    GoalSelector, RouteError, RouteRequest, RouteResult, SearchConfig, SearchStrategy,
};
