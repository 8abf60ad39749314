//! Distance table and predecessor vector.
//!
//! # Layout
//!
//! The N×N table is one flat `Vec<Cost>` in row-major order, so row `i` is
//! the contiguous slice `costs[i * N .. (i + 1) * N]`:
//!
//! ```text
//! row owner   → the agent's own vector, recomputed locally
//! row k ≠ own → the last vector received from k, stored verbatim
//! ```
//!
//! Rows other than the owner's are never recomputed; they are opaque
//! beliefs replaced wholesale when a new vector arrives.

use std::fmt;

use dv_core::{Cost, NodeId};

// ── DistanceTable ─────────────────────────────────────────────────────────────

/// `D[i][j]` = the owner's belief of node `i`'s cost to node `j`.
///
/// Invariant: `D[owner][owner] == 0`.  Every other entry starts at
/// `Cost::INFINITY`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceTable {
    owner:      NodeId,
    node_count: usize,
    costs:      Vec<Cost>,
}

impl DistanceTable {
    /// All-infinite table with a zero on the owner's diagonal entry.
    pub fn new(owner: NodeId, node_count: usize) -> Self {
        let mut table = Self {
            owner,
            node_count,
            costs: vec![Cost::INFINITY; node_count * node_count],
        };
        table.set(owner, owner, Cost::ZERO);
        table
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    fn offset(&self, row: NodeId, col: NodeId) -> usize {
        row.index() * self.node_count + col.index()
    }

    #[inline]
    pub fn get(&self, row: NodeId, col: NodeId) -> Cost {
        self.costs[self.offset(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: NodeId, col: NodeId, cost: Cost) {
        let i = self.offset(row, col);
        self.costs[i] = cost;
    }

    /// Row `node` as a slice indexed by destination.
    pub fn row(&self, node: NodeId) -> &[Cost] {
        let start = node.index() * self.node_count;
        &self.costs[start..start + self.node_count]
    }

    /// The owner's own distance vector.
    #[inline]
    pub fn own_row(&self) -> &[Cost] {
        self.row(self.owner)
    }

    /// Overwrite row `node` with `vector` (full replacement, no merge).
    ///
    /// # Panics
    /// Panics if `vector.len() != node_count`; the agent checks this first.
    pub fn replace_row(&mut self, node: NodeId, vector: &[Cost]) {
        let start = node.index() * self.node_count;
        self.costs[start..start + self.node_count].copy_from_slice(vector);
    }

    /// Forget everything believed about `node`'s vector.
    pub fn reset_row(&mut self, node: NodeId) {
        let start = node.index() * self.node_count;
        self.costs[start..start + self.node_count].fill(Cost::INFINITY);
    }
}

impl fmt::Display for DistanceTable {
    /// Debug dump: one column per destination, one line per row.
    ///
    /// ```text
    ///   D0|    0    1    2
    /// ----+---------------
    ///    0|    0    1    2
    ///    1|    1    0    1
    ///    2|  inf  inf  inf
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5}", format!(" D{}|", self.owner.0))?;
        for col in 0..self.node_count {
            write!(f, "{col:>5}")?;
        }
        writeln!(f)?;
        writeln!(f, "----+{}", "-----".repeat(self.node_count))?;
        for row in NodeId::all(self.node_count) {
            write!(f, "{:>4}|", row.0)?;
            for cost in self.row(row) {
                write!(f, "{:>5}", cost.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ── PredecessorVector ─────────────────────────────────────────────────────────

/// `pred[j]` = the neighbour the current best path to `j` leaves through.
///
/// `None` for the owner itself and for unreachable destinations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredecessorVector {
    inner: Vec<Option<NodeId>>,
}

impl PredecessorVector {
    pub fn new(node_count: usize) -> Self {
        Self { inner: vec![None; node_count] }
    }

    #[inline]
    pub fn get(&self, dest: NodeId) -> Option<NodeId> {
        self.inner.get(dest.index()).copied().flatten()
    }

    #[inline]
    pub fn set(&mut self, dest: NodeId, via: Option<NodeId>) {
        self.inner[dest.index()] = via;
    }

    /// `true` if some destination is currently routed through `via`.
    pub fn routes_through(&self, via: NodeId) -> bool {
        self.inner.contains(&Some(via))
    }

    pub fn as_slice(&self) -> &[Option<NodeId>] {
        &self.inner
    }
}
