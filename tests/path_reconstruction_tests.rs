use std::collections::HashSet;

use eppstein_ksp::graph::generators::random_graph;
use eppstein_ksp::graph::{DirectedGraph, Graph};
use eppstein_ksp::{CostPolicy, Eppstein, KspQuery, RankedPath, SidetrackHeaps};

// Keeps only the first edge between any ordered pair so a vertex sequence
// identifies its edges (and therefore its cost) unambiguously.
fn simple_random_graph(n: usize, m: usize, seed: u64) -> DirectedGraph<u64> {
    let multigraph = random_graph(n, m, 30, seed);
    let mut seen = HashSet::new();
    let edges: Vec<(usize, usize, u64)> = multigraph
        .edges()
        .filter(|&(u, v, _)| seen.insert((u, v)))
        .collect();
    DirectedGraph::from_edges(n, &edges).unwrap()
}

fn walk_cost(graph: &DirectedGraph<u64>, vertices: &[usize]) -> u64 {
    vertices
        .windows(2)
        .map(|pair| {
            graph
                .get_edge_weight(pair[0], pair[1])
                .unwrap_or_else(|| panic!("no edge {} -> {}", pair[0], pair[1]))
        })
        .sum()
}

fn recorded(path: &RankedPath<u64>) -> &[usize] {
    path.vertices.as_deref().expect("vertices are recorded")
}

#[test]
fn test_spliced_paths_cost_what_was_reported() {
    for seed in 0..15 {
        let graph = simple_random_graph(30, 120, seed);
        let query = KspQuery::new(0, 29, 60);
        let result = Eppstein::new()
            .with_path_recording(true)
            .k_shortest_paths(&graph, &query)
            .unwrap();

        for path in result.paths() {
            let vertices = recorded(path);
            assert_eq!(vertices.first(), Some(&0));
            assert_eq!(vertices.last(), Some(&29));
            assert_eq!(walk_cost(&graph, vertices), path.cost, "seed {}", seed);
        }
    }
}

#[test]
fn test_every_reported_walk_is_different() {
    for seed in 20..30 {
        let graph = simple_random_graph(20, 80, seed);
        let result = Eppstein::new()
            .with_path_recording(true)
            .k_shortest_paths(&graph, &KspQuery::new(0, 19, 80))
            .unwrap();

        let walks: HashSet<Vec<usize>> =
            result.paths().iter().map(|p| recorded(p).to_vec()).collect();
        assert_eq!(walks.len(), result.len(), "seed {}", seed);
    }
}

#[test]
fn test_sidetracks_match_vertices() {
    let graph = simple_random_graph(25, 100, 3);
    let heaps = SidetrackHeaps::build(&graph, 24).unwrap();
    let result = Eppstein::new()
        .with_path_recording(true)
        .k_shortest_paths(&graph, &KspQuery::new(0, 24, 40))
        .unwrap();

    let shortest = heaps.distance(0);
    for path in result.paths() {
        let sidetracks = path.sidetracks.as_ref().expect("sidetracks are recorded");
        // Each sidetrack adds exactly its key over the shortest distance.
        let extra: u64 = sidetracks.iter().map(|s| s.key).sum();
        assert_eq!(shortest.map(|d| d + extra), Some(path.cost));

        let spliced = heaps.splice(0, sidetracks).unwrap();
        assert_eq!(spliced.vertices, recorded(path));
        assert_eq!(spliced.cost, path.cost);
        for sidetrack in sidetracks {
            assert!(graph.has_edge(sidetrack.origin, sidetrack.target));
        }
    }
}

#[test]
fn test_sibling_swap_replaces_the_last_sidetrack() {
    // Tree: 0 -> 3 (cost 1). Two detours from 0 land directly on 3.
    let edges = [(0, 3, 1), (0, 1, 1), (1, 3, 1), (0, 2, 2), (2, 3, 2)];
    let graph = DirectedGraph::<u64>::from_edges(4, &edges).unwrap();
    let result = Eppstein::new()
        .with_path_recording(true)
        .k_shortest_paths(&graph, &KspQuery::new(0, 3, 10))
        .unwrap();

    assert_eq!(result.costs(), vec![1, 2, 4]);
    let routes: Vec<Vec<usize>> = result.paths().iter().map(|p| recorded(p).to_vec()).collect();
    assert_eq!(routes, vec![vec![0, 3], vec![0, 1, 3], vec![0, 2, 3]]);

    // The third path swaps the first detour for the second; it does not stack them.
    let third = result.paths()[2].sidetracks.as_ref().unwrap();
    assert_eq!(third.len(), 1);
    assert_eq!((third[0].origin, third[0].target), (0, 2));
}

#[test]
fn test_distinct_policy_keeps_paths_consistent() {
    let graph = simple_random_graph(20, 90, 11);
    let result = Eppstein::new()
        .with_policy(CostPolicy::DistinctCosts)
        .with_path_recording(true)
        .k_shortest_paths(&graph, &KspQuery::new(0, 19, 30))
        .unwrap();

    for path in result.paths() {
        assert_eq!(walk_cost(&graph, recorded(path)), path.cost);
    }
}

#[test]
fn test_recording_does_not_change_costs() {
    let graph = random_graph(30, 150, 25, 77);
    let query = KspQuery::new(0, 29, 100);
    let plain = Eppstein::new().k_shortest_paths(&graph, &query).unwrap();
    let recorded = Eppstein::new()
        .with_path_recording(true)
        .k_shortest_paths(&graph, &query)
        .unwrap();

    assert_eq!(plain.costs(), recorded.costs());
    assert!(plain.paths().iter().all(|p| p.vertices.is_none() && p.sidetracks.is_none()));
}
