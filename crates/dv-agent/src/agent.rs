//! The routing agent: event handlers and Bellman-Ford recomputation.
//!
//! # Event model
//!
//! An agent reacts to exactly two events, both delivered by its transport:
//!
//! ```text
//! receive_packet(pkt)        → replace D[pkt.source], recompute, maybe notify
//! link_cost_changed(k, c)    → seed a new neighbour, or recompute, maybe notify
//! ```
//!
//! Each handler runs to completion.  Outbound packets go through
//! [`Transport::send`], which only enqueues, so a handler never re-enters
//! another agent.
//!
//! # Tie-break
//!
//! Neighbours are scanned in ascending id order and a candidate must be
//! strictly cheaper to replace the current best, so the lowest-id neighbour
//! wins any tie.

use tracing::{debug, trace};

use dv_core::{Cost, DvError, DvResult, NodeId, Packet, Transport};

use crate::{AgentConfig, DistanceTable, NeighbourSet, PredecessorVector};

/// One router's control-plane state.
///
/// Owns its distance table, predecessor vector and neighbour set
/// exclusively.  Everything it knows about the rest of the network arrived
/// in a [`Packet`] or through its own [`Transport`].
#[derive(Clone, Debug)]
pub struct RoutingAgent {
    id:         NodeId,
    config:     AgentConfig,
    table:      DistanceTable,
    preds:      PredecessorVector,
    neighbours: NeighbourSet,
}

impl RoutingAgent {
    // ── Construction ──────────────────────────────────────────────────────

    /// Create the agent for node `id`, discover its neighbours through
    /// `transport`, and send its initial vector to each of them.
    ///
    /// Precondition: link costs are non-negative (guaranteed by [`Cost`]).
    pub fn new<T: Transport>(
        id:         NodeId,
        node_count: usize,
        config:     AgentConfig,
        transport:  &mut T,
    ) -> DvResult<Self> {
        if !id.in_range(node_count) {
            return Err(DvError::NodeOutOfRange { node: id, node_count });
        }

        let mut agent = Self {
            id,
            table: DistanceTable::new(id, node_count),
            preds: PredecessorVector::new(node_count),
            neighbours: NeighbourSet::new(),
            config,
        };

        for other in NodeId::all(node_count).filter(|&n| n != id) {
            let cost = agent.config.clamp(transport.link_cost(other));
            if cost.is_infinite() {
                continue;
            }
            agent.neighbours.insert(other);
            agent.seed_neighbour_row(other, cost);
            agent.table.set(id, other, cost);
            agent.preds.set(other, Some(other));
        }

        debug!(node = id.0, neighbours = agent.neighbours.len(), "agent initialised");
        agent.notify_neighbours(transport);
        Ok(agent)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.table.node_count()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The agent's own distance vector, indexed by destination.
    #[inline]
    pub fn distance_vector(&self) -> &[Cost] {
        self.table.own_row()
    }

    /// Believed cost to `dest`; `Cost::INFINITY` for out-of-range ids.
    pub fn distance_to(&self, dest: NodeId) -> Cost {
        if dest.in_range(self.node_count()) {
            self.table.get(self.id, dest)
        } else {
            Cost::INFINITY
        }
    }

    /// Next hop towards `dest`.
    ///
    /// `None` for the agent itself, for unreachable destinations, and for
    /// out-of-range ids.
    pub fn predecessor(&self, dest: NodeId) -> Option<NodeId> {
        self.preds.get(dest)
    }

    pub fn predecessors(&self) -> &[Option<NodeId>] {
        self.preds.as_slice()
    }

    pub fn neighbours(&self) -> &NeighbourSet {
        &self.neighbours
    }

    pub fn table(&self) -> &DistanceTable {
        &self.table
    }

    // ── Event handlers ────────────────────────────────────────────────────

    /// Handle a vector packet from a neighbour.
    ///
    /// Replaces the sender's row verbatim, recomputes, and notifies every
    /// neighbour if the agent's own vector changed.  Returns whether it did.
    ///
    /// # Errors
    /// A packet addressed elsewhere, from the agent itself, from an unknown
    /// node, or carrying a vector of the wrong length.  All of these are
    /// transport bugs.
    pub fn receive_packet<T: Transport>(
        &mut self,
        packet:    &Packet,
        transport: &mut T,
    ) -> DvResult<bool> {
        let sender = packet.source();
        if packet.destination() != self.id || sender == self.id {
            return Err(DvError::MisaddressedPacket {
                sender,
                destination: packet.destination(),
                receiver:    self.id,
            });
        }
        if !sender.in_range(self.node_count()) {
            return Err(DvError::NodeOutOfRange { node: sender, node_count: self.node_count() });
        }
        if packet.vector().len() != self.node_count() {
            return Err(DvError::VectorLength {
                sender,
                expected: self.node_count(),
                got:      packet.vector().len(),
            });
        }

        trace!(node = self.id.0, from = sender.0, "vector received");
        self.table.replace_row(sender, packet.vector());

        let changed = self.recompute(transport);
        if changed {
            self.notify_neighbours(transport);
        }
        Ok(changed)
    }

    /// Handle a change in the cost of the link to `neighbour`.
    ///
    /// The transport must already report `new_cost` for this link.
    ///
    /// - Unknown neighbour, finite cost: add it, seed its row with the
    ///   minimum belief (`D[k][self] = new_cost`, `D[k][k] = 0`) and adopt
    ///   the direct link if it is no worse than the current path.  No full
    ///   recomputation: nothing is known yet about `k`'s other routes.
    /// - Known neighbour: recompute against the live cost.  If the link is
    ///   now down, drop the neighbour and its row afterwards.
    ///
    /// Returns whether the agent's own vector changed (and neighbours were
    /// notified).
    pub fn link_cost_changed<T: Transport>(
        &mut self,
        neighbour: NodeId,
        new_cost:  Cost,
        transport: &mut T,
    ) -> DvResult<bool> {
        if neighbour == self.id {
            return Err(DvError::SelfLink(neighbour));
        }
        if !neighbour.in_range(self.node_count()) {
            return Err(DvError::NodeOutOfRange { node: neighbour, node_count: self.node_count() });
        }

        let new_cost = self.config.clamp(new_cost);
        debug!(node = self.id.0, neighbour = neighbour.0, cost = %new_cost, "link cost changed");

        if !self.neighbours.contains(neighbour) {
            return Ok(self.add_neighbour(neighbour, new_cost, transport));
        }

        let changed = self.recompute(transport);
        if new_cost.is_infinite() {
            self.neighbours.remove(neighbour);
            self.table.reset_row(neighbour);
            debug!(node = self.id.0, neighbour = neighbour.0, "neighbour removed");
        }
        if changed {
            self.notify_neighbours(transport);
        }
        Ok(changed)
    }

    fn add_neighbour<T: Transport>(&mut self, neighbour: NodeId, cost: Cost, transport: &mut T) -> bool {
        // A link that comes up already broken adds nothing.
        if cost.is_infinite() {
            return false;
        }

        self.neighbours.insert(neighbour);
        self.table.reset_row(neighbour);
        self.seed_neighbour_row(neighbour, cost);

        if cost <= self.table.get(self.id, neighbour) {
            self.table.set(self.id, neighbour, cost);
            self.preds.set(neighbour, Some(neighbour));
            self.notify_neighbours(transport);
            return true;
        }
        false
    }

    /// Minimal belief about a neighbour before any packet from it arrived.
    fn seed_neighbour_row(&mut self, neighbour: NodeId, cost: Cost) {
        self.table.set(neighbour, self.id, cost);
        self.table.set(neighbour, neighbour, Cost::ZERO);
    }

    // ── Recomputation ─────────────────────────────────────────────────────

    /// Bellman-Ford relaxation of the agent's own row.
    ///
    /// For every destination `y != self`:
    /// `D[self][y] = min over neighbours k of link_cost(k) + D[k][y]`.
    /// Returns `true` if any entry of the own row changed.  O(N × degree).
    fn recompute<T: Transport>(&mut self, transport: &T) -> bool {
        let mut changed = false;

        for dest in NodeId::all(self.node_count()) {
            if dest == self.id {
                continue;
            }

            let mut best = Cost::INFINITY;
            let mut via = None;
            for k in self.neighbours.iter() {
                let candidate = transport.link_cost(k) + self.table.get(k, dest);
                if candidate < best {
                    best = candidate;
                    via = Some(k);
                }
            }

            let best = self.config.clamp(best);
            // A route back through ourselves is no route at all.
            let via = match via {
                Some(k) if best.is_finite() && k != self.id => Some(k),
                _ => None,
            };

            if self.table.get(self.id, dest) != best {
                trace!(node = self.id.0, dest = dest.0, cost = %best, "distance updated");
                self.table.set(self.id, dest, best);
                changed = true;
            }
            self.preds.set(dest, via);
        }

        changed
    }

    // ── Notification ──────────────────────────────────────────────────────

    /// The packet this agent would send to `neighbour` right now.
    ///
    /// The vector is a copy of the own row.  With poisoned reverse enabled,
    /// destinations routed through `neighbour` are advertised as unreachable.
    pub fn advertisement_for(&self, neighbour: NodeId) -> Packet {
        let mut vector = self.distance_vector().to_vec();
        if self.config.poisoned_reverse && self.preds.routes_through(neighbour) {
            for (dest, cost) in NodeId::all(vector.len()).zip(vector.iter_mut()) {
                if self.preds.get(dest) == Some(neighbour) {
                    *cost = Cost::INFINITY;
                }
            }
        }
        Packet::new(self.id, neighbour, vector)
    }

    /// Send the current vector to every neighbour.
    fn notify_neighbours<T: Transport>(&self, transport: &mut T) {
        debug!(node = self.id.0, fanout = self.neighbours.len(), "notifying neighbours");
        for neighbour in self.neighbours.iter() {
            transport.send(self.advertisement_for(neighbour));
        }
    }
}
