//! Serialized floor dataset, as produced by the floor plan editor

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, HazardZone, NodeRole};

/// Floor dataset as stored on disk.
///
/// `nodes` and `edges` are required; a dataset missing either collection is
/// rejected as malformed. Corridors are decorative polygons for rendering and
/// are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorPlan {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
    #[serde(default)]
    pub corridors: Vec<serde_json::Value>,
    #[serde(default, rename = "dangerZones")]
    pub danger_zones: Vec<HazardZone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub role: NodeRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RawNode {
    pub fn new(id: impl Into<String>, x: f64, y: f64, role: NodeRole) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            role,
            label: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl RawEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: Option<f64>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

impl FloorPlan {
    /// Parses a dataset from its JSON text
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not a structurally valid dataset
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Reads a floor dataset from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid dataset
pub fn load_floor_plan(path: impl AsRef<Path>) -> Result<FloorPlan, Error> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::InvalidData(format!(
            "Floor dataset not found: {}",
            path.display()
        )));
    }

    let text = std::fs::read_to_string(path)?;
    FloorPlan::from_json_str(&text)
}
