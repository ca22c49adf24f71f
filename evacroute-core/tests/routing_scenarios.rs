use evacroute_core::prelude::*;

const MAIN_BLOCK: &str = include_str!("../../data/floors/main_block_ground.json");

fn main_block() -> FloorGraph {
    let plan = FloorPlan::from_json_str(MAIN_BLOCK).unwrap();
    create_floor_graph(&plan).unwrap()
}

fn route(graph: &FloorGraph, request: &RouteRequest) -> Option<RouteResult> {
    plan_route(graph, request, &SearchConfig::default()).unwrap()
}

fn rooms(graph: &FloorGraph) -> Vec<String> {
    graph
        .nodes_with_role(NodeRole::Room)
        .map(|node| node.id.clone())
        .collect()
}

#[test]
fn sample_floor_loads_cleanly() {
    let graph = main_block();
    assert_eq!(graph.node_count(), 16);
    assert_eq!(graph.edge_count(), 17);
    assert_eq!(graph.hazard_zones().len(), 2);
    assert_eq!(graph.diagnostics(), GraphDiagnostics::default());
}

#[test]
fn library_avoids_smoke_towards_east_exit() {
    let graph = main_block();
    let result = route(&graph, &RouteRequest::to_nearest_exit("R2")).unwrap();

    assert_eq!(result.goal, "E2");
    assert_eq!(result.path, ["R2", "J3", "J4", "J5", "E2"]);
    assert!((result.cost - 430.0).abs() < 1e-9);
    assert!(result.nodes_examined > 0);
}

#[test]
fn library_uses_courtyard_when_hazards_are_off() {
    let graph = main_block();
    let request = RouteRequest::to_nearest_exit("R2").with_hazards(HazardState::inactive());
    let result = route(&graph, &request).unwrap();

    assert_eq!(result.goal, "E3");
    assert_eq!(result.path, ["R2", "J3", "J8", "E3"]);
    assert!((result.cost - 300.0).abs() < 1e-9);
}

#[test]
fn workshop_is_trapped_by_fire() {
    let graph = main_block();
    assert_eq!(route(&graph, &RouteRequest::to_nearest_exit("R4")), None);

    let request = RouteRequest::to_nearest_exit("R4").with_hazards(HazardState::inactive());
    let result = route(&graph, &request).unwrap();
    assert_eq!(result.goal, "E1");
    assert_eq!(result.path, ["R4", "J1", "E1"]);
    assert!((result.cost - 230.0).abs() < 1e-9);
}

#[test]
fn suppressing_the_fire_frees_the_workshop() {
    let graph = main_block();
    let request = RouteRequest::to_nearest_exit("R4")
        .with_hazards(HazardState::active().suppress("fire_workshop"));
    let result = route(&graph, &request).unwrap();
    assert_eq!(result.goal, "E1");
}

#[test]
fn explicit_goal_list_picks_the_cheapest() {
    let graph = main_block();
    let request = RouteRequest::to_nearest_exit("R5").with_goals(["E1", "E2", "E3"]);
    let result = route(&graph, &request).unwrap();

    assert_eq!(result.goal, "E2");
    assert_eq!(result.path, ["R5", "J5", "E2"]);
    assert!((result.cost - 210.0).abs() < 1e-9);
}

#[test]
fn all_exits_matches_explicit_exit_list() {
    let graph = main_block();
    for room in rooms(&graph) {
        let implicit = route(&graph, &RouteRequest::to_nearest_exit(room.as_str()));
        let explicit = route(
            &graph,
            &RouteRequest::to_nearest_exit(room.as_str()).with_goals(["E1", "E2", "E3"]),
        );
        assert_eq!(implicit, explicit, "room {room}");
    }
}

#[test]
fn repeated_requests_are_identical() {
    let graph = main_block();
    let request = RouteRequest::to_nearest_exit("R1");
    let first = route(&graph, &request);
    for _ in 0..10 {
        assert_eq!(route(&graph, &request), first);
    }
}

#[test]
fn no_route_ever_crosses_a_hard_zone() {
    let graph = main_block();
    let fire = graph
        .hazard_zones()
        .iter()
        .find(|zone| zone.hard)
        .unwrap()
        .rect();

    for room in rooms(&graph) {
        let Some(result) = route(&graph, &RouteRequest::to_nearest_exit(room.as_str())) else {
            continue;
        };
        for leg in result.path.windows(2) {
            let a = graph.node(&leg[0]).unwrap().position;
            let b = graph.node(&leg[1]).unwrap().position;
            assert!(
                !segment_intersects_rect(a, b, &fire),
                "{room} route crosses fire between {} and {}",
                leg[0],
                leg[1]
            );
        }
    }
}

#[test]
fn hazards_never_make_a_route_cheaper() {
    let graph = main_block();
    for room in rooms(&graph) {
        let calm = route(
            &graph,
            &RouteRequest::to_nearest_exit(room.as_str()).with_hazards(HazardState::inactive()),
        )
        .unwrap();
        if let Some(hazardous) = route(&graph, &RouteRequest::to_nearest_exit(room.as_str())) {
            assert!(hazardous.cost >= calm.cost, "room {room}");
        }
    }
}

#[test]
fn toggling_hazards_back_restores_the_route() {
    let graph = main_block();
    let active = RouteRequest::to_nearest_exit("R2");
    let before = route(&graph, &active);
    let _ = route(&graph, &active.clone().with_hazards(HazardState::inactive()));
    assert_eq!(route(&graph, &active), before);
}

#[test]
fn passage_penalty_is_direction_independent() {
    let graph = main_block();
    let config = HazardConfig::default().calibrated_for(&graph);
    let field = HazardField::new(graph.hazard_zones(), &HazardState::active(), config);

    for node in graph.nodes() {
        for neighbor in graph.neighbors(&node.id) {
            let there = field.penalty(node.position, neighbor.node.position);
            let back = field.penalty(neighbor.node.position, node.position);
            assert_eq!(there, back, "{} - {}", node.id, neighbor.node.id);
        }
    }
}

#[test]
fn soft_zone_crossing_outweighs_any_detour() {
    let graph = main_block();
    let config = HazardConfig::default().calibrated_for(&graph);
    let field = HazardField::new(graph.hazard_zones(), &HazardState::active(), config);

    let j3 = graph.node("J3").unwrap().position;
    let j8 = graph.node("J8").unwrap().position;
    let penalty = field.penalty(j3, j8).cost().unwrap();
    assert!(penalty >= 10.0 * graph.max_base_weight());

    let r4 = graph.node("R4").unwrap().position;
    let j1 = graph.node("J1").unwrap().position;
    assert!(field.penalty(r4, j1).is_blocked());
}

#[test]
fn single_sweep_agrees_with_per_goal_search() {
    let graph = main_block();
    let sweep = SearchConfig {
        strategy: SearchStrategy::SingleSweep,
        ..SearchConfig::default()
    };

    for room in rooms(&graph) {
        for hazards in [HazardState::active(), HazardState::inactive()] {
            let request = RouteRequest::to_nearest_exit(room.as_str()).with_hazards(hazards);
            let per_goal = plan_route(&graph, &request, &SearchConfig::default()).unwrap();
            let swept = plan_route(&graph, &request, &sweep).unwrap();

            match (per_goal, swept) {
                (Some(a), Some(b)) => {
                    assert_eq!(a.goal, b.goal, "room {room}");
                    assert!((a.cost - b.cost).abs() < 1e-9, "room {room}");
                }
                (None, None) => {}
                (a, b) => panic!("strategies disagree for {room}: {a:?} vs {b:?}"),
            }
        }
    }
}

#[test]
fn position_snaps_to_nearest_node() {
    let graph = main_block();
    let start = graph.nearest_node(395.0, 190.0).unwrap();
    assert_eq!(start.id, "R2");
}

#[test]
fn tight_expansion_limit_fails_the_request() {
    let graph = main_block();
    let config = SearchConfig {
        max_expansions: Some(2),
        ..SearchConfig::default()
    };
    let result = plan_route(&graph, &RouteRequest::to_nearest_exit("R1"), &config);
    assert_eq!(result, Err(RouteError::ExpansionLimitExceeded { limit: 2 }));
}

#[test]
fn graph_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FloorGraph>();

    let graph = std::sync::Arc::new(main_block());
    let handles: Vec<_> = ["R1", "R2", "R3", "R5"]
        .into_iter()
        .map(|room| {
            let graph = std::sync::Arc::clone(&graph);
            std::thread::spawn(move || route(&graph, &RouteRequest::to_nearest_exit(room)))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_some());
    }
}
