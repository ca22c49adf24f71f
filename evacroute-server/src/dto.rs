//! Request and response bodies of the HTTP API

use evacroute_core::{
    FloorGraph, GraphDiagnostics, HazardState, HazardZone, RouteRequest, RouteResult,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::Floor;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Body of `POST /floors/{floor_id}/route`.
///
/// Exactly one of `start` and `position` must be given; a position is snapped
/// to the nearest node of the floor. Without `goals` every exit is a candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteBody {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub goals: Option<Vec<String>>,
    #[serde(default = "default_hazards_active")]
    pub hazards_active: bool,
    #[serde(default)]
    pub suppressed_zones: Vec<String>,
    /// Replaces the zones declared by the floor dataset
    #[serde(default)]
    pub zones: Option<Vec<HazardZone>>,
}

fn default_hazards_active() -> bool {
    true
}

impl RouteBody {
    pub fn into_request(self, graph: &FloorGraph) -> Result<RouteRequest, ApiError> {
        let start = match (self.start, self.position) {
            (Some(start), None) => start,
            (None, Some(Position { x, y })) => {
                if !x.is_finite() || !y.is_finite() {
                    return Err(ApiError::InvalidRequest(
                        "position must be finite".to_string(),
                    ));
                }
                graph
                    .nearest_node(x, y)
                    .map(|node| node.id.clone())
                    .ok_or_else(|| ApiError::InvalidRequest("floor has no nodes".to_string()))?
            }
            (Some(_), Some(_)) => {
                return Err(ApiError::InvalidRequest(
                    "give either start or position, not both".to_string(),
                ));
            }
            (None, None) => {
                return Err(ApiError::InvalidRequest(
                    "start or position is required".to_string(),
                ));
            }
        };

        let mut hazards = if self.hazards_active {
            HazardState::active()
        } else {
            HazardState::inactive()
        };
        hazards.suppressed.extend(self.suppressed_zones);

        let mut request = RouteRequest::to_nearest_exit(start).with_hazards(hazards);
        if let Some(goals) = self.goals {
            request = request.with_goals(goals);
        }
        if let Some(zones) = self.zones {
            request = request.with_zones(zones);
        }
        Ok(request)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteResponse {
    Found(RouteResult),
    NoRoute,
}

impl From<Option<RouteResult>> for RouteResponse {
    fn from(result: Option<RouteResult>) -> Self {
        result.map_or(RouteResponse::NoRoute, RouteResponse::Found)
    }
}

/// Entry of `GET /floors`
#[derive(Debug, Clone, Serialize)]
pub struct FloorSummary {
    pub id: String,
    pub building: Option<String>,
    pub level: Option<i32>,
    pub nodes: usize,
    pub edges: usize,
    pub exits: usize,
    pub hazard_zones: usize,
    pub diagnostics: GraphDiagnostics,
}

impl From<&Floor> for FloorSummary {
    fn from(floor: &Floor) -> Self {
        Self {
            id: floor.id.clone(),
            building: floor.building.clone(),
            level: floor.level,
            nodes: floor.graph.node_count(),
            edges: floor.graph.edge_count(),
            exits: floor.graph.nodes().filter(|node| node.role.is_exit()).count(),
            hazard_zones: floor.graph.hazard_zones().len(),
            diagnostics: floor.graph.diagnostics(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub floors: usize,
}
