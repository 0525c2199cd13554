use crate::graph::DirectedGraph;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Generates a random multigraph with `n` vertices and `m` edges.
/// Endpoints are uniform (self loops and parallel edges included) and
/// weights uniform in `1..=max_weight`. The same seed always yields the same graph.
pub fn random_graph(n: usize, m: usize, max_weight: u64, seed: u64) -> DirectedGraph<u64> {
    assert!(n > 0, "n must be positive");
    assert!(max_weight > 0, "max_weight must be positive");

    let mut rng = StdRng::seed_from_u64(seed);
    let edges: Vec<(usize, usize, u64)> = (0..m)
        .map(|_| {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            let w = rng.gen_range(1..=max_weight);
            (u, v, w)
        })
        .collect();

    from_generated(n, &edges)
}

/// Generates a width x height grid where every cell links to its right and lower
/// neighbours, plus a random weight in `1..=max_weight` on each link.
/// Vertex `0` is the top-left corner, `width * height - 1` the bottom-right.
pub fn grid_graph(width: usize, height: usize, max_weight: u64, seed: u64) -> DirectedGraph<u64> {
    assert!(max_weight > 0, "max_weight must be positive");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();

    let index = |x: usize, y: usize| -> usize { y * width + x };

    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            if x + 1 < width {
                edges.push((current, index(x + 1, y), rng.gen_range(1..=max_weight)));
            }
            if y + 1 < height {
                edges.push((current, index(x, y + 1), rng.gen_range(1..=max_weight)));
            }
        }
    }

    from_generated(width * height, &edges)
}

// Generated endpoints are always below `n` and weights are positive.
fn from_generated(n: usize, edges: &[(usize, usize, u64)]) -> DirectedGraph<u64> {
    match DirectedGraph::from_edges(n, edges) {
        Ok(graph) => graph,
        Err(err) => unreachable!("generator produced an invalid edge: {}", err),
    }
}
