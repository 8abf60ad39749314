//! `LinkPort` — the per-agent `Transport` handed out by the simulator.

use dv_core::{Cost, NodeId, Packet, Transport};

/// One node's window onto the network for the duration of a handler call.
///
/// Holds a shared borrow of that node's row of the cost matrix only, plus an
/// outbox.  The simulator moves the outbox into its queue once the handler
/// returns, so `send` never reaches another agent directly.
pub struct LinkPort<'a> {
    node:   NodeId,
    costs:  &'a [Cost],
    outbox: Vec<Packet>,
}

impl<'a> LinkPort<'a> {
    pub fn new(node: NodeId, costs: &'a [Cost]) -> Self {
        Self { node, costs, outbox: Vec::new() }
    }

    /// Packets sent so far, in send order.
    pub fn into_outbox(self) -> Vec<Packet> {
        self.outbox
    }
}

impl Transport for LinkPort<'_> {
    fn link_cost(&self, other: NodeId) -> Cost {
        self.costs.get(other.index()).copied().unwrap_or(Cost::INFINITY)
    }

    fn send(&mut self, packet: Packet) {
        debug_assert_eq!(packet.source(), self.node, "agent sent a packet under another id");
        self.outbox.push(packet);
    }
}
