use std::cmp::Ordering;

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use crate::Cost;

/// Open set entry shared by the A* and Dijkstra searches
#[derive(Copy, Clone, Debug)]
pub(crate) struct State {
    /// Priority: `g + h` for A*, `g` for Dijkstra
    pub(crate) priority: Cost,
    pub(crate) cost: Cost,
    /// Insertion counter, earlier entries win ties
    pub(crate) sequence: u64,
    pub(crate) node: NodeIndex,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by priority, then by insertion order (reversed from standard Rust BinaryHeap)
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Cheapest known path to one node
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FoundPath {
    pub(crate) nodes: Vec<NodeIndex>,
    pub(crate) cost: Cost,
}

/// Follows predecessor links back from `target` and returns the path in
/// start-to-target order
pub(crate) fn reconstruct_path(
    predecessors: &HashMap<NodeIndex, NodeIndex>,
    start: NodeIndex,
    target: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        match predecessors.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
