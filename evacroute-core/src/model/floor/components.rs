//! Floor graph components - nodes and passages

use std::fmt;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{Cost, NodeId};

/// Role a node plays on the floor plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Room,
    Junction,
    Exit,
}

impl NodeRole {
    pub fn is_exit(self) -> bool {
        self == NodeRole::Exit
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeRole::Room => "room",
            NodeRole::Junction => "junction",
            NodeRole::Exit => "exit",
        };
        f.write_str(name)
    }
}

/// Floor graph node
#[derive(Debug, Clone, PartialEq)]
pub struct FloorNode {
    /// Dataset id of the node, unique per floor
    pub id: NodeId,
    /// Position on the floor plan
    pub position: Coord<f64>,
    pub role: NodeRole,
    /// Optional display label
    pub label: Option<String>,
}

impl FloorNode {
    pub fn new(id: impl Into<NodeId>, x: f64, y: f64, role: NodeRole) -> Self {
        Self {
            id: id.into(),
            position: Coord { x, y },
            role,
            label: None,
        }
    }
}

/// Floor graph edge (corridor segment or doorway)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Passage {
    /// Traversal cost before hazard penalties
    pub weight: Cost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_match_dataset_spelling() {
        for role in [NodeRole::Room, NodeRole::Junction, NodeRole::Exit] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{role}\""));
        }
        assert!(NodeRole::Exit.is_exit());
        assert!(!NodeRole::Junction.is_exit());
    }
}
