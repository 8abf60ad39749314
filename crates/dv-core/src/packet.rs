//! The routing update message.

use crate::{Cost, NodeId};

/// One advertised distance vector, `source` → `destination`.
///
/// A packet owns its vector: the sender builds it from a snapshot copy of
/// its own row, so later changes at the sender never reach a packet that is
/// already in flight.  Fields are private; a packet is read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    source:      NodeId,
    destination: NodeId,
    vector:      Vec<Cost>,
}

impl Packet {
    pub fn new(source: NodeId, destination: NodeId, vector: Vec<Cost>) -> Self {
        Self { source, destination, vector }
    }

    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[inline]
    pub fn destination(&self) -> NodeId {
        self.destination
    }

    /// The sender's believed cost to every node, indexed by `NodeId`.
    #[inline]
    pub fn vector(&self) -> &[Cost] {
        &self.vector
    }
}
