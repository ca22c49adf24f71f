//! Multi-goal route planning: the entry point used by callers

use log::debug;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::astar::astar;
use super::dijkstra::dijkstra_sweep;
use super::hazard_cost::HazardField;
use super::request::{
    GoalSelector, RouteError, RouteRequest, RouteResult, SearchConfig, SearchStrategy,
};
use super::state::FoundPath;
use crate::{FloorGraph, NodeRole};

/// Finds the cheapest route from the request's start node to any of its goals
///
/// Every candidate goal is searched independently and the lowest total cost
/// wins. Equal costs go to the candidate listed first.
///
/// # Errors
///
/// Returns an error if the request is invalid for `graph` (empty graph,
/// unknown start, no resolvable goal) or if a search exceeds
/// `config.max_expansions`. An unreachable set of goals is `Ok(None)`.
pub fn plan_route(
    graph: &FloorGraph,
    request: &RouteRequest,
    config: &SearchConfig,
) -> Result<Option<RouteResult>, RouteError> {
    let start = validate_request(graph, request)?;
    let goals = resolve_goals(graph, &request.goals)?;

    let zones = request.zones.as_deref().unwrap_or(graph.hazard_zones());
    let field = HazardField::new(zones, &request.hazards, config.hazard.calibrated_for(graph));

    let (paths, expanded) = match config.strategy {
        SearchStrategy::PerGoal => search_per_goal(graph, start, &goals, &field, config)?,
        SearchStrategy::SingleSweep => {
            let sweep = dijkstra_sweep(graph, start, &goals, &field, config.max_expansions)?;
            (sweep.paths, sweep.expanded)
        }
    };

    let Some((goal, best)) = cheapest(&goals, paths) else {
        debug!(
            "No route from {} to any of {} goals ({expanded} nodes examined)",
            request.start,
            goals.len()
        );
        return Ok(None);
    };

    let result = RouteResult {
        goal: graph.node_at(goal).id.clone(),
        path: best
            .nodes
            .iter()
            .map(|&node| graph.node_at(node).id.clone())
            .collect(),
        cost: best.cost,
        nodes_examined: expanded,
    };
    debug!(
        "Route {} -> {}: {} hops, cost {:.2}, {} nodes examined",
        request.start,
        result.goal,
        result.path.len().saturating_sub(1),
        result.cost,
        result.nodes_examined
    );
    Ok(Some(result))
}

fn validate_request(graph: &FloorGraph, request: &RouteRequest) -> Result<NodeIndex, RouteError> {
    if graph.is_empty() {
        return Err(RouteError::EmptyGraph);
    }
    if graph.edge_count() == 0 {
        return Err(RouteError::NoEdges);
    }
    graph
        .index_of(&request.start)
        .ok_or_else(|| RouteError::UnknownStart(request.start.clone()))
}

/// Materializes the goal selection into distinct node indices, keeping order
fn resolve_goals(
    graph: &FloorGraph,
    selector: &GoalSelector,
) -> Result<Vec<NodeIndex>, RouteError> {
    let mut goals: Vec<NodeIndex> = match selector {
        GoalSelector::AllExits => graph.indices_with_role(NodeRole::Exit).collect(),
        GoalSelector::Role(role) => graph.indices_with_role(*role).collect(),
        GoalSelector::Nodes(ids) => ids
            .iter()
            .filter_map(|id| {
                let idx = graph.index_of(id);
                if idx.is_none() {
                    debug!("Ignoring unknown goal node {id}");
                }
                idx
            })
            .collect(),
    };

    let mut seen = hashbrown::HashSet::with_capacity(goals.len());
    goals.retain(|goal| seen.insert(*goal));

    if goals.is_empty() {
        return Err(RouteError::NoResolvableGoals);
    }
    Ok(goals)
}

fn search_per_goal(
    graph: &FloorGraph,
    start: NodeIndex,
    goals: &[NodeIndex],
    field: &HazardField<'_>,
    config: &SearchConfig,
) -> Result<(Vec<Option<FoundPath>>, usize), RouteError> {
    let searches = goals
        .par_iter()
        .map(|&goal| astar(graph, start, goal, field, config.max_expansions))
        .collect::<Result<Vec<_>, _>>()?;

    let expanded = searches.iter().map(|search| search.expanded).sum();
    let paths = searches.into_iter().map(|search| search.path).collect();
    Ok((paths, expanded))
}

/// Lowest-cost path among the candidates; the first one wins ties
fn cheapest(goals: &[NodeIndex], paths: Vec<Option<FoundPath>>) -> Option<(NodeIndex, FoundPath)> {
    goals
        .iter()
        .zip(paths)
        .filter_map(|(&goal, path)| path.map(|path| (goal, path)))
        .fold(None, |best: Option<(NodeIndex, FoundPath)>, candidate| match best {
            Some(current) if current.1.cost <= candidate.1.cost => Some(current),
            _ => Some(candidate),
        })
}
