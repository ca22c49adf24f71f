use std::collections::BinaryHeap;

use hashbrown::HashMap;
use log::trace;
use petgraph::graph::NodeIndex;

use super::hazard_cost::{EdgePenalty, HazardField};
use super::request::RouteError;
use super::state::{FoundPath, State, reconstruct_path};
use crate::geometry::distance;
use crate::{Cost, FloorGraph};

/// Result of a single-goal search
#[derive(Debug, Clone)]
pub(crate) struct GoalSearch {
    pub(crate) path: Option<FoundPath>,
    /// Nodes taken off the open set and expanded
    pub(crate) expanded: usize,
}

/// A* search from `start` to a single `goal`.
///
/// Passage cost is the base weight plus the hazard penalty of `field`; blocked
/// passages are never traversed. The heuristic is the straight-line distance
/// to the goal, which is admissible as long as no passage weighs less than its
/// length.
///
/// # Errors
///
/// Returns [`RouteError::ExpansionLimitExceeded`] if more than
/// `max_expansions` nodes are expanded before the search terminates.
pub(crate) fn astar(
    graph: &FloorGraph,
    start: NodeIndex,
    goal: NodeIndex,
    field: &HazardField<'_>,
    max_expansions: Option<usize>,
) -> Result<GoalSearch, RouteError> {
    let goal_position = graph.node_at(goal).position;
    let heuristic = |node: NodeIndex| distance(graph.node_at(node).position, goal_position);

    let estimated_nodes = graph.node_count().min(1000);
    let mut g_scores: HashMap<NodeIndex, Cost> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut open = BinaryHeap::with_capacity(estimated_nodes / 4);
    let mut sequence = 0_u64;
    let mut expanded = 0;

    g_scores.insert(start, 0.0);
    open.push(State {
        priority: heuristic(start),
        cost: 0.0,
        sequence,
        node: start,
    });

    while let Some(State { cost, node, .. }) = open.pop() {
        // Skip if we've found a better path
        if g_scores.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        expanded += 1;
        if let Some(limit) = max_expansions
            && expanded > limit
        {
            return Err(RouteError::ExpansionLimitExceeded { limit });
        }

        if node == goal {
            trace!("Goal {} reached after {expanded} expansions", graph.node_at(goal).id);
            return Ok(GoalSearch {
                path: Some(FoundPath {
                    nodes: reconstruct_path(&predecessors, start, goal),
                    cost,
                }),
                expanded,
            });
        }

        let position = graph.node_at(node).position;
        for (next, weight) in graph.passages(node) {
            let next_position = graph.node_at(next).position;
            let EdgePenalty::Penalty(penalty) = field.penalty(position, next_position) else {
                continue;
            };

            let tentative = cost + weight + penalty;
            if g_scores.get(&next).is_none_or(|&known| tentative < known) {
                g_scores.insert(next, tentative);
                predecessors.insert(next, node);
                sequence += 1;
                open.push(State {
                    priority: tentative + heuristic(next),
                    cost: tentative,
                    sequence,
                    node: next,
                });
            }
        }
    }

    Ok(GoalSearch {
        path: None,
        expanded,
    })
}
