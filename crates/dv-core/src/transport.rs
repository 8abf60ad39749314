//! The link capability an agent is handed by its transport.
//!
//! The simulator owns the authoritative cost matrix and the packet queue.
//! An agent never sees either: it gets a `Transport` bound to its own node,
//! which answers cost queries for that node's links only and accepts
//! outbound packets.  A routing agent therefore cannot read another node's
//! links even by accident.

use crate::{Cost, NodeId, Packet};

/// Per-node view of the network, implemented by the simulator.
pub trait Transport {
    /// Current cost of the direct link from the owning node to `other`.
    ///
    /// `Cost::INFINITY` means there is no link.  The cost to the owning node
    /// itself is `Cost::ZERO`.
    fn link_cost(&self, other: NodeId) -> Cost;

    /// Enqueue `packet` for later delivery.
    ///
    /// Implementations must not call back into the receiving agent before
    /// returning; delivery happens when the simulator drains its queue.
    fn send(&mut self, packet: Packet);
}
