use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::algorithm::sidetrack::{Sidetrack, SidetrackHeaps};
use crate::data_structures::{BinaryHeapWrapper, HeapNode};
use crate::graph::{DirectedGraph, Graph, Weight};
use crate::{Error, Result};

/// How candidates whose cost ties the previously emitted one are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPolicy {
    /// Every path is reported, equal costs included
    #[default]
    AllowRepeats,
    /// Only paths strictly more expensive than the last reported one
    DistinctCosts,
}

/// A K-shortest-paths request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KspQuery {
    pub source: usize,
    pub destination: usize,
    pub k: usize,
}

impl KspQuery {
    pub fn new(source: usize, destination: usize, k: usize) -> Self {
        KspQuery {
            source,
            destination,
            k,
        }
    }
}

/// One reported path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPath<W> {
    pub cost: W,
    /// Sidetracks taken, in travel order, when path recording is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidetracks: Option<Vec<Sidetrack<W>>>,
    /// Full vertex sequence, when path recording is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<usize>>,
}

/// Outcome of a K-shortest-paths query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "paths", rename_all = "snake_case")]
pub enum KShortestPaths<W> {
    /// The destination cannot be reached from the source
    Unreachable,
    /// Up to K paths in non-decreasing cost order. Fewer than K means no more paths exist.
    Found(Vec<RankedPath<W>>),
}

impl<W: Weight> KShortestPaths<W> {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, KShortestPaths::Unreachable)
    }

    pub fn paths(&self) -> &[RankedPath<W>] {
        match self {
            KShortestPaths::Unreachable => &[],
            KShortestPaths::Found(paths) => paths,
        }
    }

    pub fn len(&self) -> usize {
        self.paths().len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths().is_empty()
    }

    pub fn costs(&self) -> Vec<W> {
        self.paths().iter().map(|path| path.cost).collect()
    }

    /// Costs padded with `None` up to `k` slots
    pub fn padded(&self, k: usize) -> Vec<Option<W>> {
        let mut slots: Vec<Option<W>> = self
            .paths()
            .iter()
            .take(k)
            .map(|path| Some(path.cost))
            .collect();
        slots.resize(k, None);
        slots
    }

    /// Sum of all reported costs
    pub fn total_cost(&self) -> Result<W> {
        self.paths()
            .iter()
            .try_fold(W::zero(), |total, path| total.try_add(path.cost))
    }
}

/// Sidetracks taken so far, as a persistent list shared between candidates
/// (most recent first).
#[derive(Debug)]
struct Trail<W> {
    head: Option<Rc<TrailLink<W>>>,
}

#[derive(Debug)]
struct TrailLink<W> {
    sidetrack: Sidetrack<W>,
    rest: Trail<W>,
}

impl<W> Clone for Trail<W> {
    fn clone(&self) -> Self {
        Trail {
            head: self.head.clone(),
        }
    }
}

impl<W: Copy> Trail<W> {
    fn empty() -> Self {
        Trail { head: None }
    }

    fn push(&self, sidetrack: Sidetrack<W>) -> Self {
        Trail {
            head: Some(Rc::new(TrailLink {
                sidetrack,
                rest: self.clone(),
            })),
        }
    }

    fn to_vec(&self) -> Vec<Sidetrack<W>> {
        let mut sidetracks = Vec::new();
        let mut link = self.head.as_deref();
        while let Some(current) = link {
            sidetracks.push(current.sidetrack);
            link = current.rest.head.as_deref();
        }
        sidetracks.reverse();
        sidetracks
    }
}

/// Path candidate: a heap node plus the sidetracks taken before reaching it
struct Candidate<W> {
    node: Rc<HeapNode<W, Sidetrack<W>>>,
    trail: Trail<W>,
}

/// Eppstein's K shortest paths algorithm
#[derive(Debug, Clone, Default)]
pub struct Eppstein {
    /// Treatment of equal-cost paths
    policy: CostPolicy,
    /// Whether to report the sidetracks and vertices of every path
    record_paths: bool,
    /// Upper bound on candidates popped per query
    expansion_limit: Option<usize>,
}

impl Eppstein {
    /// Create a new instance that reports every path and records nothing
    pub fn new() -> Self {
        Eppstein {
            policy: CostPolicy::AllowRepeats,
            record_paths: false,
            expansion_limit: None,
        }
    }

    /// Set how equal-cost paths are reported
    pub fn with_policy(mut self, policy: CostPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable or disable path reconstruction
    pub fn with_path_recording(mut self, enabled: bool) -> Self {
        self.record_paths = enabled;
        self
    }

    /// Stop after popping this many candidates. With `DistinctCosts` and
    /// zero-cost cycles, the number of pops per reported path is unbounded.
    pub fn with_expansion_limit(mut self, limit: Option<usize>) -> Self {
        self.expansion_limit = limit;
        self
    }

    pub fn policy(&self) -> CostPolicy {
        self.policy
    }

    /// Builds the sidetrack heaps for one (source, destination) pair
    pub fn prepare<W: Weight>(
        &self,
        graph: &DirectedGraph<W>,
        source: usize,
        destination: usize,
    ) -> Result<KspEngine<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::InvalidVertex(source));
        }
        let heaps = SidetrackHeaps::build(graph, destination)?;
        Ok(KspEngine {
            heaps,
            source,
            config: self.clone(),
        })
    }

    /// Computes up to `query.k` shortest paths from `query.source` to `query.destination`
    pub fn k_shortest_paths<W: Weight>(
        &self,
        graph: &DirectedGraph<W>,
        query: &KspQuery,
    ) -> Result<KShortestPaths<W>> {
        self.prepare(graph, query.source, query.destination)?
            .extract(query.k)
    }
}

/// Prepared K-shortest-paths state for a fixed (source, destination) pair.
/// Extraction never mutates it, so any number of queries can reuse it.
#[derive(Debug, Clone)]
pub struct KspEngine<W>
where
    W: Weight,
{
    heaps: SidetrackHeaps<W>,
    source: usize,
    config: Eppstein,
}

impl<W> KspEngine<W>
where
    W: Weight,
{
    pub fn heaps(&self) -> &SidetrackHeaps<W> {
        &self.heaps
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn is_reachable(&self) -> bool {
        self.heaps.distance(self.source).is_some()
    }

    /// Extracts up to `k` paths in non-decreasing cost order
    pub fn extract(&self, k: usize) -> Result<KShortestPaths<W>> {
        let Some(shortest) = self.heaps.distance(self.source) else {
            log::debug!(
                "destination {} unreachable from {}",
                self.heaps.destination(),
                self.source
            );
            return Ok(KShortestPaths::Unreachable);
        };

        let mut paths = Vec::with_capacity(k.min(1024));
        if k == 0 {
            return Ok(KShortestPaths::Found(paths));
        }
        paths.push(self.ranked_path(shortest, &Trail::empty())?);

        let Some(root) = self.heaps.heap(self.source).root() else {
            return Ok(KShortestPaths::Found(paths));
        };

        let mut queue = BinaryHeapWrapper::new();
        queue.push(
            Candidate {
                node: Rc::clone(root),
                trail: Trail::empty(),
            },
            shortest.try_add(*root.key())?,
        );

        let mut last_cost = shortest;
        let mut expansions = 0usize;

        while paths.len() < k {
            let Some((candidate, cost)) = queue.pop() else {
                break;
            };
            if let Some(limit) = self.config.expansion_limit {
                if expansions >= limit {
                    log::warn!(
                        "stopped after {} expansions with {} of {} paths",
                        expansions,
                        paths.len(),
                        k
                    );
                    break;
                }
            }
            expansions += 1;

            let node = &candidate.node;
            let sidetrack = *node.value();
            let taken = if self.config.record_paths {
                candidate.trail.push(sidetrack)
            } else {
                Trail::empty()
            };

            let emit = match self.config.policy {
                CostPolicy::AllowRepeats => true,
                CostPolicy::DistinctCosts => cost > last_cost,
            };
            if emit {
                log::trace!("path {} costs {:?}", paths.len() + 1, cost);
                paths.push(self.ranked_path(cost, &taken)?);
                last_cost = cost;
                if paths.len() == k {
                    break;
                }
            }

            // Take the sidetrack, then the best detour available after landing.
            if let Some(next) = self.heaps.heap(sidetrack.target).root() {
                queue.push(
                    Candidate {
                        node: Rc::clone(next),
                        trail: taken.clone(),
                    },
                    cost.try_add(*next.key())?,
                );
            }
            // Swap the sidetrack for one of its heap children instead.
            for child in [node.left(), node.right()] {
                if let Some(child) = child.root() {
                    queue.push(
                        Candidate {
                            node: Rc::clone(child),
                            trail: candidate.trail.clone(),
                        },
                        cost.try_add(*child.key() - *node.key())?,
                    );
                }
            }
        }

        log::debug!(
            "extracted {} paths from {} to {} ({} candidates left)",
            paths.len(),
            self.source,
            self.heaps.destination(),
            queue.len()
        );
        Ok(KShortestPaths::Found(paths))
    }

    fn ranked_path(&self, cost: W, trail: &Trail<W>) -> Result<RankedPath<W>> {
        if !self.config.record_paths {
            return Ok(RankedPath {
                cost,
                sidetracks: None,
                vertices: None,
            });
        }
        let sidetracks = trail.to_vec();
        let spliced = self.heaps.splice(self.source, &sidetracks)?;
        Ok(RankedPath {
            cost,
            sidetracks: Some(sidetracks),
            vertices: Some(spliced.vertices),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> DirectedGraph<u64> {
        // Two disjoint routes 0 -> 1 -> 3 and 0 -> 2 -> 3, both costing 5.
        DirectedGraph::from_edges(4, &[(0, 1, 2), (1, 3, 3), (0, 2, 1), (2, 3, 4)]).unwrap()
    }

    #[test]
    fn test_trail_keeps_travel_order() {
        let a = Sidetrack { origin: 0, target: 1, weight: 1u64, key: 0 };
        let b = Sidetrack { origin: 2, target: 3, weight: 2u64, key: 1 };
        let base = Trail::empty().push(a);
        let extended = base.push(b);

        assert_eq!(base.to_vec(), vec![a]);
        assert_eq!(extended.to_vec(), vec![a, b]);
    }

    #[test]
    fn test_policies_on_equal_cost_routes() {
        let graph = diamond();
        let query = KspQuery::new(0, 3, 2);

        let repeats = Eppstein::new().k_shortest_paths(&graph, &query).unwrap();
        assert_eq!(repeats.costs(), vec![5, 5]);

        let distinct = Eppstein::new()
            .with_policy(CostPolicy::DistinctCosts)
            .k_shortest_paths(&graph, &query)
            .unwrap();
        assert_eq!(distinct.costs(), vec![5]);
    }

    #[test]
    fn test_engine_is_reusable_across_k() {
        let graph = diamond();
        let engine = Eppstein::new().prepare(&graph, 0, 3).unwrap();
        assert!(engine.is_reachable());
        assert_eq!(engine.extract(1).unwrap().costs(), vec![5]);
        assert_eq!(engine.extract(10).unwrap().costs(), vec![5, 5]);
        assert_eq!(engine.extract(0).unwrap(), KShortestPaths::Found(Vec::new()));
    }

    #[test]
    fn test_padding_and_totals() {
        let graph = diamond();
        let result = Eppstein::new().k_shortest_paths(&graph, &KspQuery::new(0, 3, 4)).unwrap();
        assert_eq!(result.padded(4), vec![Some(5), Some(5), None, None]);
        assert_eq!(result.total_cost().unwrap(), 10);
        assert_eq!(KShortestPaths::<u64>::Unreachable.padded(2), vec![None, None]);
    }

    #[test]
    fn test_expansion_limit_stops_zero_cost_loops() {
        // A zero-weight self loop on the source yields endless paths of cost 1.
        let graph = DirectedGraph::<u64>::from_edges(2, &[(0, 0, 0), (0, 1, 1)]).unwrap();
        let result = Eppstein::new()
            .with_policy(CostPolicy::DistinctCosts)
            .with_expansion_limit(Some(50))
            .k_shortest_paths(&graph, &KspQuery::new(0, 1, 3))
            .unwrap();
        assert_eq!(result.costs(), vec![1]);
    }

    #[test]
    fn test_invalid_vertices_are_rejected() {
        let graph = diamond();
        assert!(matches!(
            Eppstein::new().k_shortest_paths(&graph, &KspQuery::new(9, 3, 1)),
            Err(Error::InvalidVertex(9))
        ));
        assert!(matches!(
            Eppstein::new().k_shortest_paths(&graph, &KspQuery::new(0, 9, 1)),
            Err(Error::InvalidVertex(9))
        ));
    }

    #[test]
    fn test_costs_past_the_weight_range_are_an_error() {
        // Shortest walk 0 -> 1 costs 10; going back round 1 -> 0 once more fits,
        // twice does not, and neither does the sum of the first two.
        let edges = [(0, 1, 10), (1, 0, u64::MAX - 25)];
        let graph = DirectedGraph::<u64>::from_edges(2, &edges).unwrap();
        let engine = Eppstein::new().prepare(&graph, 0, 1).unwrap();

        let two = engine.extract(2).unwrap();
        assert_eq!(two.costs(), vec![10, u64::MAX - 5]);
        assert!(matches!(two.total_cost(), Err(Error::CostOverflow)));
        assert!(matches!(engine.extract(3), Err(Error::CostOverflow)));
    }
}
