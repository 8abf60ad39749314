//! Strongly typed node identifier.
//!
//! Node ids are dense: a network of `N` nodes uses exactly `NodeId(0)` to
//! `NodeId(N - 1)`, so an id doubles as a row/column index into the distance
//! table.  The inner integer is `pub`, but prefer `.index()` for clarity.

use std::fmt;

/// Identifier of a router in `[0, node_count)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel meaning "no valid node" — equivalent to `u32::MAX`.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Largest supported network.  Every id stays below `INVALID`.
    pub const MAX_NODES: usize = u32::MAX as usize;

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// `true` if this id addresses a node in a network of `node_count` nodes.
    #[inline]
    pub fn in_range(self, node_count: usize) -> bool {
        self.index() < node_count
    }

    /// Iterate `NodeId(0) .. NodeId(node_count)` in ascending order.
    ///
    /// Counts above [`MAX_NODES`][Self::MAX_NODES] stop at the limit;
    /// `Topology::validate` rejects such networks up front.
    pub fn all(node_count: usize) -> impl Iterator<Item = NodeId> + Clone {
        let end = u32::try_from(node_count).unwrap_or(u32::MAX);
        (0..end).map(NodeId)
    }
}

impl Default for NodeId {
    /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<NodeId> for usize {
    #[inline(always)]
    fn from(id: NodeId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for NodeId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<NodeId, Self::Error> {
        u32::try_from(n).map(NodeId)
    }
}
