use hashbrown::HashMap;
use itertools::Itertools;
use log::{debug, info, warn};
use petgraph::graph::{NodeIndex, UnGraph};

use super::dataset::{FloorPlan, RawEdge};
use crate::geometry::distance;
use crate::model::{FloorGraph, FloorNode, GraphDiagnostics, Passage};
use crate::{Cost, Error};

/// Builds the routing graph of a floor dataset
///
/// Edges referencing unknown node ids are dropped and counted in the graph's
/// [`GraphDiagnostics`]; for duplicated node ids the first definition wins.
///
/// # Errors
///
/// Returns an error if a node or danger zone has non-finite coordinates
pub fn create_floor_graph(plan: &FloorPlan) -> Result<FloorGraph, Error> {
    validate_plan(plan)?;

    let mut diagnostics = GraphDiagnostics::default();
    let mut graph = UnGraph::with_capacity(plan.nodes.len(), plan.edges.len());
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(plan.nodes.len());

    for duplicate in plan.nodes.iter().map(|node| node.id.as_str()).duplicates() {
        warn!("Node id '{duplicate}' is defined more than once, keeping the first definition");
    }

    for raw in &plan.nodes {
        if index.contains_key(raw.id.as_str()) {
            diagnostics.duplicate_nodes += 1;
            continue;
        }
        let mut node = FloorNode::new(raw.id.clone(), raw.x, raw.y, raw.role);
        node.label.clone_from(&raw.label);
        index.insert(raw.id.as_str(), graph.add_node(node));
    }

    for edge in &plan.edges {
        let (Some(&a), Some(&b)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
        else {
            debug!(
                "Dropping edge {} -> {}: unknown endpoint",
                edge.from, edge.to
            );
            diagnostics.dropped_edges += 1;
            continue;
        };

        let straight = distance(graph[a].position, graph[b].position);
        let weight = base_weight(edge, straight);
        if weight < straight {
            diagnostics.underweight_edges += 1;
        }
        graph.add_edge(a, b, Passage { weight });
    }

    report(&diagnostics);

    let floor = FloorGraph::new(graph, plan.danger_zones.clone(), diagnostics);
    info!(
        "Floor graph built: {} nodes, {} passages, {} danger zones",
        floor.node_count(),
        floor.edge_count(),
        floor.hazard_zones().len()
    );
    Ok(floor)
}

/// Explicit weight when usable, straight-line length otherwise
fn base_weight(edge: &RawEdge, straight: Cost) -> Cost {
    match edge.weight {
        Some(weight) if weight.is_finite() && weight >= 0.0 => weight,
        Some(weight) => {
            debug!(
                "Edge {} -> {} has unusable weight {weight}, using its length",
                edge.from, edge.to
            );
            straight
        }
        None => straight,
    }
}

fn validate_plan(plan: &FloorPlan) -> Result<(), Error> {
    if let Some(node) = plan
        .nodes
        .iter()
        .find(|node| !node.x.is_finite() || !node.y.is_finite())
    {
        return Err(Error::InvalidData(format!(
            "Node '{}' has non-finite coordinates",
            node.id
        )));
    }

    if let Some(zone) = plan.danger_zones.iter().find(|zone| !zone.is_finite()) {
        return Err(Error::InvalidData(format!(
            "Danger zone '{}' has non-finite geometry",
            zone.id
        )));
    }

    Ok(())
}

fn report(diagnostics: &GraphDiagnostics) {
    if diagnostics.dropped_edges > 0 {
        warn!(
            "{} edges reference unknown nodes and were dropped",
            diagnostics.dropped_edges
        );
    }
    if diagnostics.duplicate_nodes > 0 {
        warn!(
            "{} duplicate node definitions were ignored",
            diagnostics.duplicate_nodes
        );
    }
    if diagnostics.underweight_edges > 0 {
        warn!(
            "{} edges are lighter than their straight-line length. \
            Routes on this floor may not be the cheapest ones.",
            diagnostics.underweight_edges
        );
    }
}
