use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::ShortestPathAlgorithm;
use crate::data_structures::BinaryHeapWrapper;
use crate::graph::{DirectedGraph, Graph, Weight};
use crate::{Error, Result};

/// Reference K shortest paths by best-first enumeration of walks.
///
/// Every partial walk from the source is kept in a priority queue; each time
/// one ends at the destination its cost is reported, and it keeps being
/// extended since walks may pass through the destination. Exponential in the
/// worst case, which makes it a baseline for tests and benchmarks only.
#[derive(Debug, Clone)]
pub struct BruteForce {
    /// Maximum number of partial walks popped before giving up
    max_expansions: usize,
}

impl Default for BruteForce {
    fn default() -> Self {
        Self::new()
    }
}

impl BruteForce {
    pub fn new() -> Self {
        BruteForce {
            max_expansions: 1_000_000,
        }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    /// Costs of the `k` cheapest walks from `source` to `destination`, non-decreasing
    pub fn k_shortest_costs<W: Weight>(
        &self,
        graph: &DirectedGraph<W>,
        source: usize,
        destination: usize,
        k: usize,
    ) -> Result<Vec<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::InvalidVertex(source));
        }
        if !graph.has_vertex(destination) {
            return Err(Error::InvalidVertex(destination));
        }

        // Walks through vertices that cannot reach the destination never finish.
        let to_destination =
            Dijkstra::new().compute_shortest_paths(&graph.reversed(), destination)?;

        let mut costs = Vec::new();
        let mut queue = BinaryHeapWrapper::new();
        if to_destination.is_reachable(source) {
            queue.push(source, W::zero());
        }

        let mut expansions = 0;
        while costs.len() < k && expansions < self.max_expansions {
            let Some((vertex, cost)) = queue.pop() else {
                break;
            };
            expansions += 1;

            if vertex == destination {
                costs.push(cost);
            }
            for (next, weight) in graph.outgoing_edges(vertex) {
                if to_destination.is_reachable(next) {
                    queue.push(next, cost.try_add(weight)?);
                }
            }
        }

        Ok(costs)
    }
}
