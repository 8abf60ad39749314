//! Static network description and the reference shortest-path oracle.
//!
//! A `Topology` is the starting state of the authoritative cost matrix: a
//! node count and a list of undirected links.  The simulator builds its
//! matrix from it; tests and the demo use [`Topology::shortest_paths`] as the
//! ground truth the distributed protocol must converge to.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use crate::{Cost, DvError, DvResult, NodeId, SimRng};

// ── LinkSpec ──────────────────────────────────────────────────────────────────

/// One undirected link.  Costs are symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkSpec {
    pub a:    NodeId,
    pub b:    NodeId,
    pub cost: Cost,
}

impl LinkSpec {
    /// Endpoints ordered low → high, for duplicate detection.
    #[inline]
    fn key(&self) -> (NodeId, NodeId) {
        if self.a <= self.b { (self.a, self.b) } else { (self.b, self.a) }
    }
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// Node count plus undirected links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    pub node_count: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub links:      Vec<LinkSpec>,
}

impl Topology {
    pub fn new(node_count: usize) -> Self {
        Self { node_count, links: Vec::new() }
    }

    /// Add an undirected link (builder style).
    pub fn link(mut self, a: u32, b: u32, cost: u32) -> Self {
        self.links.push(LinkSpec { a: NodeId(a), b: NodeId(b), cost: Cost(cost) });
        self
    }

    /// Reject oversized networks, self-links, out-of-range endpoints and
    /// repeated links.
    pub fn validate(&self) -> DvResult<()> {
        if self.node_count > NodeId::MAX_NODES {
            return Err(DvError::TooManyNodes { node_count: self.node_count, max: NodeId::MAX_NODES });
        }
        let mut seen = BTreeSet::new();
        for link in &self.links {
            for end in [link.a, link.b] {
                if !end.in_range(self.node_count) {
                    return Err(DvError::NodeOutOfRange { node: end, node_count: self.node_count });
                }
            }
            if link.a == link.b {
                return Err(DvError::SelfLink(link.a));
            }
            let (a, b) = link.key();
            if !seen.insert((a, b)) {
                return Err(DvError::DuplicateLink { a, b });
            }
        }
        Ok(())
    }

    /// The N×N cost matrix: zero on the diagonal, `INFINITY` where there is
    /// no link.  Assumes [`validate`][Self::validate] passed.
    pub fn cost_matrix(&self) -> Vec<Vec<Cost>> {
        let n = self.node_count;
        let mut matrix = vec![vec![Cost::INFINITY; n]; n];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = Cost::ZERO;
        }
        for link in &self.links {
            matrix[link.a.index()][link.b.index()] = link.cost;
            matrix[link.b.index()][link.a.index()] = link.cost;
        }
        matrix
    }

    /// True all-pairs shortest-path costs, one Dijkstra run per source.
    ///
    /// `result[i][j]` is the cheapest cost from `i` to `j`, `INFINITY` when
    /// `j` is unreachable.
    pub fn shortest_paths(&self) -> Vec<Vec<Cost>> {
        let adjacency = self.adjacency();
        NodeId::all(self.node_count)
            .map(|source| dijkstra(&adjacency, source))
            .collect()
    }

    /// Finite-cost neighbours of every node, ascending by id.
    fn adjacency(&self) -> Vec<Vec<(NodeId, Cost)>> {
        let mut adj = vec![Vec::new(); self.node_count];
        for link in self.links.iter().filter(|l| l.cost.is_finite()) {
            adj[link.a.index()].push((link.b, link.cost));
            adj[link.b.index()].push((link.a, link.cost));
        }
        for list in &mut adj {
            list.sort_unstable();
        }
        adj
    }

    // ── Generators ────────────────────────────────────────────────────────

    /// A connected random topology.
    ///
    /// Node `i > 0` first attaches to a random earlier node (a random spanning
    /// tree), then every remaining pair gains a link with probability
    /// `extra_link_p`.  Costs are uniform in `1..=max_cost`.
    pub fn random(node_count: usize, extra_link_p: f64, max_cost: u32, rng: &mut SimRng) -> Self {
        let max_cost = max_cost.max(1);
        let mut topo = Topology::new(node_count);
        let mut present = BTreeSet::new();

        for i in NodeId::all(node_count).skip(1) {
            let j = rng.gen_range(0..i.0);
            present.insert((j, i.0));
            topo = topo.link(j, i.0, rng.gen_range(1..=max_cost));
        }
        for i in NodeId::all(node_count) {
            for j in NodeId::all(node_count).skip(i.index() + 1) {
                if !present.contains(&(i.0, j.0)) && rng.gen_bool(extra_link_p) {
                    topo = topo.link(i.0, j.0, rng.gen_range(1..=max_cost));
                }
            }
        }
        topo
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(adjacency: &[Vec<(NodeId, Cost)>], source: NodeId) -> Vec<Cost> {
    let mut dist = vec![Cost::INFINITY; adjacency.len()];
    dist[source.index()] = Cost::ZERO;

    // Reverse turns the max-heap into a min-heap; NodeId breaks ties.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost::ZERO, source)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        for &(next, link) in &adjacency[node.index()] {
            let candidate = cost + link;
            if candidate < dist[next.index()] {
                dist[next.index()] = candidate;
                heap.push(Reverse((candidate, next)));
            }
        }
    }
    dist
}
