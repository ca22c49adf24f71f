use std::fmt;

use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rstar::{RTree, primitives::GeomWithData};
use serde::Serialize;

use super::{FloorNode, NodeRole, Passage};
use crate::{Cost, HazardZone, NodeId};

/// Node position stored in the spatial index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Problems found while building a floor graph. None of them are fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphDiagnostics {
    /// Edges skipped because an endpoint id is unknown
    pub dropped_edges: usize,
    /// Node definitions skipped because the id was already taken
    pub duplicate_nodes: usize,
    /// Edges whose explicit weight is below the straight-line distance
    /// between their endpoints. Such weights can make A* non-optimal.
    pub underweight_edges: usize,
}

/// A node reachable over a single passage
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub node: &'a FloorNode,
    pub weight: Cost,
}

/// Immutable routing graph of a single floor.
///
/// Passages are undirected, so every edge is traversable both ways with the
/// same base weight. The danger zones of the source dataset are kept alongside
/// and used when a route request carries no hazard snapshot of its own.
#[derive(Clone)]
pub struct FloorGraph {
    pub(crate) graph: UnGraph<FloorNode, Passage>,
    index: HashMap<NodeId, NodeIndex>,
    rtree: RTree<IndexedPoint>,
    zones: Vec<HazardZone>,
    diagnostics: GraphDiagnostics,
}

impl fmt::Debug for FloorGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloorGraph")
            .field("nodes", &self.graph.node_count())
            .field("passages", &self.graph.edge_count())
            .field("zones", &self.zones)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl FloorGraph {
    pub(crate) fn new(
        graph: UnGraph<FloorNode, Passage>,
        zones: Vec<HazardZone>,
        diagnostics: GraphDiagnostics,
    ) -> Self {
        let index = graph
            .node_indices()
            .map(|idx| (graph[idx].id.clone(), idx))
            .collect();
        let points = graph
            .node_indices()
            .map(|idx| {
                let position = graph[idx].position;
                IndexedPoint::new([position.x, position.y], idx)
            })
            .collect();

        Self {
            graph,
            index,
            rtree: RTree::bulk_load(points),
            zones,
            diagnostics,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node lookup by dataset id
    pub fn node(&self, id: &str) -> Option<&FloorNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// Nodes in dataset order
    pub fn nodes(&self) -> impl Iterator<Item = &FloorNode> {
        self.graph.node_weights()
    }

    pub fn nodes_with_role(&self, role: NodeRole) -> impl Iterator<Item = &FloorNode> {
        self.nodes().filter(move |node| node.role == role)
    }

    /// Neighbours of a node with the base weight of the connecting passage.
    /// Unknown and isolated ids both yield an empty list.
    pub fn neighbors(&self, id: &str) -> Vec<Neighbor<'_>> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        self.passages(idx)
            .map(|(other, weight)| Neighbor {
                node: &self.graph[other],
                weight,
            })
            .collect()
    }

    /// Danger zones declared by the floor dataset
    pub fn hazard_zones(&self) -> &[HazardZone] {
        &self.zones
    }

    pub fn diagnostics(&self) -> GraphDiagnostics {
        self.diagnostics
    }

    /// Largest base weight of any passage, zero for an edgeless graph
    pub fn max_base_weight(&self) -> Cost {
        self.graph
            .edge_weights()
            .map(|passage| passage.weight)
            .fold(0.0, f64::max)
    }

    /// Node closest to an arbitrary floor position
    pub fn nearest_node(&self, x: f64, y: f64) -> Option<&FloorNode> {
        self.rtree
            .nearest_neighbor(&[x, y])
            .map(|point| &self.graph[point.data])
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Graph indices of nodes with `role`, in dataset order
    pub(crate) fn indices_with_role(&self, role: NodeRole) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(move |&idx| self.graph[idx].role == role)
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &FloorNode {
        &self.graph[idx]
    }

    /// Other endpoint and base weight of every passage incident to `idx`
    pub(crate) fn passages(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, Cost)> + '_ {
        self.graph.edges(idx).map(move |edge| {
            let other = if edge.source() == idx {
                edge.target()
            } else {
                edge.source()
            };
            (other, edge.weight().weight)
        })
    }
}
