//! Sidetrack heaps for Eppstein's algorithm.
//!
//! A sidetrack is any edge that leaves the shortest-path tree towards the
//! destination. Its key is the extra cost paid for taking it instead of
//! following the tree. Every vertex gets a persistent heap holding the
//! sidetracks of all vertices on its tree path to the destination; children
//! start from their parent's heap, so the heaps share almost all of their nodes.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::LeftistHeap;
use crate::graph::{DirectedGraph, Graph, Weight};
use crate::{Error, Result};

/// A non-tree edge priced by its detour cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidetrack<W> {
    /// Vertex where the detour leaves the tree
    pub origin: usize,
    /// Vertex where the detour lands
    pub target: usize,
    /// Weight of the edge itself
    pub weight: W,
    /// `weight + dist(target) - dist(origin)`, never negative
    pub key: W,
}

/// Persistent heap of sidetracks keyed by detour cost
pub type SidetrackHeap<W> = LeftistHeap<W, Sidetrack<W>>;

/// Shortest-path tree rooted at the destination, built from predecessor links.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    root: usize,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl ShortestPathTree {
    pub fn from_predecessors(root: usize, predecessors: &[Option<usize>]) -> Self {
        let mut children = vec![Vec::new(); predecessors.len()];
        for (vertex, parent) in predecessors.iter().enumerate() {
            if let Some(parent) = *parent {
                children[parent].push(vertex);
            }
        }
        ShortestPathTree {
            root,
            parents: predecessors.to_vec(),
            children,
        }
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// Next vertex towards the root, `None` for the root and for vertices off the tree
    pub fn parent(&self, vertex: usize) -> Option<usize> {
        self.parents.get(vertex).copied().flatten()
    }

    pub fn children(&self, vertex: usize) -> &[usize] {
        self.children.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vertices of the tree in breadth-first order from the root
    pub fn breadth_first(&self) -> Vec<usize> {
        let mut order = Vec::new();
        let mut queue = VecDeque::from([self.root]);
        while let Some(vertex) = queue.pop_front() {
            order.push(vertex);
            queue.extend(self.children(vertex).iter().copied());
        }
        order
    }
}

/// A path spelled out from a sequence of sidetracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplicedPath<W> {
    pub vertices: Vec<usize>,
    pub cost: W,
}

/// Per-vertex sidetrack heaps together with the tree and distances they were built from.
#[derive(Debug, Clone)]
pub struct SidetrackHeaps<W>
where
    W: Weight,
{
    destination: usize,
    distances: Vec<Option<W>>,
    tree: ShortestPathTree,
    /// Weight of the edge from each vertex to its tree parent
    tree_weights: Vec<Option<W>>,
    heaps: Vec<SidetrackHeap<W>>,
    sidetrack_count: usize,
}

impl<W> SidetrackHeaps<W>
where
    W: Weight,
{
    /// Runs Dijkstra from `destination` over the reversed graph and builds the heaps.
    pub fn build(graph: &DirectedGraph<W>, destination: usize) -> Result<Self> {
        if !graph.has_vertex(destination) {
            return Err(Error::InvalidVertex(destination));
        }
        let to_destination =
            Dijkstra::new().compute_shortest_paths(&graph.reversed(), destination)?;
        Self::from_distances(graph, &to_destination)
    }

    /// Builds the heaps from distances *to* the destination, i.e. a shortest
    /// path result computed on the reversed graph with the destination as source.
    pub fn from_distances<G>(graph: &G, to_destination: &ShortestPathResult<W>) -> Result<Self>
    where
        G: Graph<W>,
    {
        let n = graph.vertex_count();
        if to_destination.distances.len() != n || to_destination.predecessors.len() != n {
            return Err(Error::AlgorithmError(format!(
                "distance table covers {} vertices, graph has {}",
                to_destination.distances.len(),
                n
            )));
        }

        let destination = to_destination.source;
        let distances = to_destination.distances.clone();
        let tree = ShortestPathTree::from_predecessors(destination, &to_destination.predecessors);

        let mut heaps: Vec<SidetrackHeap<W>> = vec![LeftistHeap::new(); n];
        let mut tree_weights = vec![None; n];
        let mut sidetrack_count = 0;

        for u in tree.breadth_first() {
            let Some(dist_u) = distances[u] else {
                continue;
            };
            let parent = tree.parent(u);
            let mut heap = match parent {
                Some(p) => heaps[p].clone(),
                None => LeftistHeap::new(),
            };

            let mut seen_tree_edge = false;
            for (v, weight) in graph.outgoing_edges(u) {
                let Some(dist_v) = distances[v] else {
                    continue;
                };
                let key = weight.try_add(dist_v)? - dist_u;
                if !seen_tree_edge && parent == Some(v) && key == W::zero() {
                    seen_tree_edge = true;
                    tree_weights[u] = Some(weight);
                    continue;
                }
                debug_assert!(
                    key >= W::zero(),
                    "negative sidetrack key {:?} on {} -> {}",
                    key,
                    u,
                    v
                );
                heap = heap.insert(
                    key,
                    Sidetrack {
                        origin: u,
                        target: v,
                        weight,
                        key,
                    },
                );
                sidetrack_count += 1;
            }
            heaps[u] = heap;
        }

        log::debug!(
            "built sidetrack heaps towards {}: {} reachable vertices, {} sidetracks",
            destination,
            distances.iter().filter(|d| d.is_some()).count(),
            sidetrack_count
        );

        Ok(SidetrackHeaps {
            destination,
            distances,
            tree,
            tree_weights,
            heaps,
            sidetrack_count,
        })
    }

    pub fn destination(&self) -> usize {
        self.destination
    }

    /// Shortest distance from `vertex` to the destination
    pub fn distance(&self, vertex: usize) -> Option<W> {
        self.distances.get(vertex).copied().flatten()
    }

    pub fn tree(&self) -> &ShortestPathTree {
        &self.tree
    }

    /// Heap of every sidetrack available on the tree path from `vertex` to the destination
    pub fn heap(&self, vertex: usize) -> &SidetrackHeap<W> {
        &self.heaps[vertex]
    }

    /// Number of sidetrack edges inserted across all vertices
    pub fn sidetrack_count(&self) -> usize {
        self.sidetrack_count
    }

    /// Spells out the walk from `source` to the destination that follows the
    /// tree except for the given sidetracks, taken in order.
    pub fn splice(&self, source: usize, sidetracks: &[Sidetrack<W>]) -> Result<SplicedPath<W>> {
        if self.distance(source).is_none() {
            return Err(Error::AlgorithmError(format!(
                "vertex {} cannot reach destination {}",
                source, self.destination
            )));
        }

        let mut vertices = vec![source];
        let mut cost = W::zero();
        let mut current = source;

        for sidetrack in sidetracks {
            let to_origin = self.walk_tree(&mut vertices, current, Some(sidetrack.origin))?;
            cost = cost.try_add(to_origin)?.try_add(sidetrack.weight)?;
            vertices.push(sidetrack.target);
            current = sidetrack.target;
        }
        cost = cost.try_add(self.walk_tree(&mut vertices, current, None)?)?;

        Ok(SplicedPath { vertices, cost })
    }

    /// Follows tree edges from `from` until `stop` (or the root), appending the
    /// visited vertices and returning the weight covered.
    fn walk_tree(&self, vertices: &mut Vec<usize>, from: usize, stop: Option<usize>) -> Result<W> {
        let stop = stop.unwrap_or(self.tree.root());
        let mut cost = W::zero();
        let mut current = from;
        while current != stop {
            let parent = self.tree.parent(current);
            let (Some(parent), Some(weight)) = (parent, self.tree_weights[current]) else {
                return Err(Error::AlgorithmError(format!(
                    "vertex {} is not on the tree path from {}",
                    stop, from
                )));
            };
            vertices.push(parent);
            cost = cost.try_add(weight)?;
            current = parent;
        }
        Ok(cost)
    }
}
