//! Floors loaded at startup and shared by all handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use evacroute_core::{FloorGraph, FloorPlan, SearchConfig, create_floor_graph, load_floor_plan};
use tracing::info;

use crate::config::{FloorEntry, ServerConfig};
use crate::error::{ApiError, ServerError};

/// A served floor: the dataset as loaded and its routing graph
#[derive(Debug)]
pub struct Floor {
    pub id: String,
    pub building: Option<String>,
    pub level: Option<i32>,
    pub plan: FloorPlan,
    pub graph: FloorGraph,
}

impl Floor {
    pub fn from_plan(
        id: impl Into<String>,
        building: Option<String>,
        level: Option<i32>,
        plan: FloorPlan,
    ) -> Result<Self, ServerError> {
        let id = id.into();
        let graph = create_floor_graph(&plan).map_err(|source| ServerError::Floor {
            id: id.clone(),
            source,
        })?;
        Ok(Self {
            id,
            building,
            level,
            plan,
            graph,
        })
    }

    fn load(entry: &FloorEntry) -> Result<Self, ServerError> {
        let plan = load_floor_plan(&entry.path).map_err(|source| ServerError::Floor {
            id: entry.id.clone(),
            source,
        })?;
        let floor = Self::from_plan(&entry.id, entry.building.clone(), entry.level, plan)?;
        info!(
            "Loaded floor {} from {}: {} nodes, {} passages, {} zones",
            floor.id,
            entry.path.display(),
            floor.graph.node_count(),
            floor.graph.edge_count(),
            floor.graph.hazard_zones().len()
        );
        Ok(floor)
    }
}

/// Shared handler state. Graphs are immutable, so requests never contend.
#[derive(Debug, Clone)]
pub struct AppState {
    floors: Arc<BTreeMap<String, Arc<Floor>>>,
    pub search: SearchConfig,
}

impl AppState {
    pub fn load(config: &ServerConfig) -> Result<Self, ServerError> {
        let floors = config
            .floors
            .iter()
            .map(Floor::load)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(floors, config.search_config()))
    }

    pub fn new(floors: Vec<Floor>, search: SearchConfig) -> Self {
        let floors = floors
            .into_iter()
            .map(|floor| (floor.id.clone(), Arc::new(floor)))
            .collect();
        Self {
            floors: Arc::new(floors),
            search,
        }
    }

    pub fn floor(&self, id: &str) -> Result<Arc<Floor>, ApiError> {
        self.floors
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::UnknownFloor(id.to_string()))
    }

    /// Floors ordered by id
    pub fn floors(&self) -> impl Iterator<Item = &Arc<Floor>> {
        self.floors.values()
    }
}
