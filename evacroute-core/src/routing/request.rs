//! Route request and result types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hazard_cost::{HazardConfig, HazardState};
use crate::{Cost, HazardZone, NodeId, NodeRole};

/// Why a route request could not be served.
///
/// "No route" is not an error: it is reported as `Ok(None)` by
/// [`plan_route`](super::plan_route).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Floor graph has no nodes")]
    EmptyGraph,
    #[error("Floor graph has no passages")]
    NoEdges,
    #[error("Unknown start node: {0}")]
    UnknownStart(NodeId),
    #[error("None of the requested goals exist on this floor")]
    NoResolvableGoals,
    #[error("Search exceeded the limit of {limit} expanded nodes")]
    ExpansionLimitExceeded { limit: usize },
}

impl RouteError {
    /// True for configuration errors in the request itself, false for
    /// failures of an otherwise valid search
    pub fn is_invalid_request(&self) -> bool {
        !matches!(self, RouteError::ExpansionLimitExceeded { .. })
    }
}

/// Which nodes count as a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalSelector {
    /// Every exit of the floor, in dataset order
    AllExits,
    /// Every node with the given role, in dataset order
    Role(NodeRole),
    /// Explicit node ids, in the given order. Unknown ids are skipped.
    Nodes(Vec<NodeId>),
}

/// A single route computation
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: NodeId,
    pub goals: GoalSelector,
    pub hazards: HazardState,
    /// Hazard snapshot replacing the zones declared by the floor dataset
    pub zones: Option<Vec<HazardZone>>,
}

impl RouteRequest {
    /// Route from `start` to the cheapest reachable exit, hazards active
    pub fn to_nearest_exit(start: impl Into<NodeId>) -> Self {
        Self {
            start: start.into(),
            goals: GoalSelector::AllExits,
            hazards: HazardState::active(),
            zones: None,
        }
    }

    #[must_use]
    pub fn with_goals<I, S>(mut self, goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.goals = GoalSelector::Nodes(goals.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_hazards(mut self, hazards: HazardState) -> Self {
        self.hazards = hazards;
        self
    }

    #[must_use]
    pub fn with_zones(mut self, zones: Vec<HazardZone>) -> Self {
        self.zones = Some(zones);
        self
    }
}

/// The cheapest route found for a request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    /// Chosen destination
    pub goal: NodeId,
    /// Node ids from start to goal, both included
    pub path: Vec<NodeId>,
    /// Base weights plus hazard penalties along the path
    pub cost: Cost,
    /// Nodes expanded across every goal search of the request
    pub nodes_examined: usize,
}

/// How candidate goals are searched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Independent A* search per candidate goal
    #[default]
    PerGoal,
    /// One Dijkstra sweep from the start covering every candidate
    SingleSweep,
}

/// Engine settings shared by all requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: SearchStrategy,
    /// Upper bound on expanded nodes per search, unbounded when `None`
    pub max_expansions: Option<usize>,
    pub hazard: HazardConfig,
}
