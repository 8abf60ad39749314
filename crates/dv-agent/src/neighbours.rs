//! The set of directly linked nodes.

use std::collections::BTreeSet;

use dv_core::NodeId;

/// Directly linked nodes, iterated in ascending `NodeId` order.
///
/// Only membership lives here.  Link costs are always read live from the
/// transport, never cached alongside the ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighbourSet {
    inner: BTreeSet<NodeId>,
}

impl NeighbourSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `node` was not already a neighbour.
    pub fn insert(&mut self, node: NodeId) -> bool {
        self.inner.insert(node)
    }

    /// Returns `true` if `node` was a neighbour.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.inner.remove(&node)
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.inner.contains(&node)
    }

    /// Ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
