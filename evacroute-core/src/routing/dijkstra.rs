use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use super::hazard_cost::{EdgePenalty, HazardField};
use super::request::RouteError;
use super::state::{FoundPath, State, reconstruct_path};
use crate::{Cost, FloorGraph};

/// Result of a single hazard-aware sweep over all candidate goals
#[derive(Debug, Clone)]
pub(crate) struct GoalSweep {
    /// Cheapest path per candidate, in candidate order
    pub(crate) paths: Vec<Option<FoundPath>>,
    pub(crate) expanded: usize,
}

/// Dijkstra's algorithm from `start` under the hazard-aware passage cost.
/// Stops as soon as every goal is settled, or when the reachable part of the
/// floor is exhausted.
///
/// # Errors
///
/// Returns [`RouteError::ExpansionLimitExceeded`] if more than
/// `max_expansions` nodes are settled.
pub(crate) fn dijkstra_sweep(
    graph: &FloorGraph,
    start: NodeIndex,
    goals: &[NodeIndex],
    field: &HazardField<'_>,
    max_expansions: Option<usize>,
) -> Result<GoalSweep, RouteError> {
    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, Cost> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);
    let mut sequence = 0_u64;
    let mut expanded = 0;
    let mut settled_goals: HashMap<NodeIndex, bool> =
        goals.iter().map(|&goal| (goal, false)).collect();
    let mut unsettled = settled_goals.len();

    // Start node has distance 0
    heap.push(State {
        priority: 0.0,
        cost: 0.0,
        sequence,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node, .. }) = heap.pop() {
        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        expanded += 1;
        if let Some(limit) = max_expansions
            && expanded > limit
        {
            return Err(RouteError::ExpansionLimitExceeded { limit });
        }

        if let Some(settled) = settled_goals.get_mut(&node)
            && !*settled
        {
            *settled = true;
            unsettled -= 1;
            if unsettled == 0 {
                break;
            }
        }

        let position = graph.node_at(node).position;
        for (next, weight) in graph.passages(node) {
            let next_position = graph.node_at(next).position;
            let EdgePenalty::Penalty(penalty) = field.penalty(position, next_position) else {
                continue;
            };
            let next_cost = cost + weight + penalty;

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost >= *entry.get() {
                        continue;
                    }
                    *entry.get_mut() = next_cost;
                }
            }
            predecessors.insert(next, node);
            sequence += 1;
            heap.push(State {
                priority: next_cost,
                cost: next_cost,
                sequence,
                node: next,
            });
        }
    }

    let paths = goals
        .iter()
        .map(|goal| {
            settled_goals
                .get(goal)
                .copied()
                .unwrap_or(false)
                .then(|| FoundPath {
                    nodes: reconstruct_path(&predecessors, start, *goal),
                    cost: distances[goal],
                })
        })
        .collect();

    Ok(GoalSweep { paths, expanded })
}
