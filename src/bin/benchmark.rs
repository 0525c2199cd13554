use std::time::{Duration, Instant};

use eppstein_ksp::algorithm::brute_force::BruteForce;
use eppstein_ksp::graph::generators::random_graph;
use eppstein_ksp::graph::{DirectedGraph, Graph};
use eppstein_ksp::{Eppstein, KspQuery};

// Function to benchmark Eppstein's algorithm on a graph
fn benchmark_eppstein(graph: &DirectedGraph<u64>, query: &KspQuery) -> (Duration, usize) {
    let start = Instant::now();
    let result = match Eppstein::new().k_shortest_paths(graph, query) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("  - Eppstein failed: {}", err);
            return (start.elapsed(), 0);
        }
    };
    let duration = start.elapsed();
    println!("  - Eppstein found {} paths in {:?}", result.len(), duration);
    (duration, result.len())
}

// Function to benchmark the brute-force enumerator on a graph
fn benchmark_brute_force(graph: &DirectedGraph<u64>, query: &KspQuery) -> (Duration, usize) {
    let start = Instant::now();
    let costs = BruteForce::new()
        .with_max_expansions(2_000_000)
        .k_shortest_costs(graph, query.source, query.destination, query.k)
        .unwrap_or_default();
    let duration = start.elapsed();
    println!("  - Brute force found {} paths in {:?}", costs.len(), duration);
    (duration, costs.len())
}

fn main() {
    env_logger::init();

    // Define graph sizes to test
    let graph_sizes = vec![100, 1_000, 10_000, 50_000];
    let k = 1_000;

    // Edge factor: average number of edges per vertex
    let edge_factor = 4;

    println!("=====================================================");
    println!("Benchmark: Eppstein vs brute-force walk enumeration");
    println!("Edge factor: {} edges per vertex, k = {}", edge_factor, k);
    println!("=====================================================");

    let mut results = Vec::new();

    for &size in &graph_sizes {
        println!("\nGenerating random graph with {} vertices...", size);
        let graph = random_graph(size, size * edge_factor, 100, size as u64);
        let query = KspQuery::new(0, size - 1, k);

        println!("Graph has {} vertices and {} edges", graph.vertex_count(), graph.edge_count());

        let (eppstein_time, eppstein_paths) = benchmark_eppstein(&graph, &query);
        let (brute_time, brute_paths) = benchmark_brute_force(&graph, &query);

        if eppstein_paths != brute_paths {
            println!("  ! path counts differ: {} vs {}", eppstein_paths, brute_paths);
        }

        let speedup = brute_time.as_secs_f64() / eppstein_time.as_secs_f64().max(f64::EPSILON);
        println!("Speedup - Eppstein vs brute force: {:.2}x", speedup);
        results.push((size, eppstein_time, brute_time, speedup));
    }

    // Print summary table
    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!(
        "{:<10} | {:<15} | {:<15} | {:<10}",
        "Vertices", "Eppstein (ms)", "Brute (ms)", "SpeedUp"
    );
    println!("-----------------------------------------------------");

    for (size, eppstein_time, brute_time, speedup) in &results {
        println!(
            "{:<10} | {:<15} | {:<15} | {:<10.2}",
            size,
            eppstein_time.as_millis(),
            brute_time.as_millis(),
            speedup
        );
    }
}
