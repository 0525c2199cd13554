use crate::graph::{Graph, Weight};
use crate::Result;

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Weight,
{
    /// Distances from source to each vertex (`None` when unreachable)
    pub distances: Vec<Option<W>>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

impl<W> ShortestPathResult<W>
where
    W: Weight,
{
    pub fn distance(&self, vertex: usize) -> Option<W> {
        self.distances.get(vertex).copied().flatten()
    }

    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distance(vertex).is_some()
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Weight,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<usize>> {
        if !result.is_reachable(target) {
            return None;
        }

        // Predecessors form a tree, so at most one step per vertex is needed.
        let mut path = vec![target];
        let mut current = target;
        while current != result.source {
            if path.len() > result.predecessors.len() {
                log::warn!("predecessor chain from {} does not reach the source", target);
                return None;
            }
            current = result.predecessors[current]?;
            path.push(current);
        }

        path.reverse();
        Some(path)
    }
}
