//! The `Sim` struct and its event loop.

use std::collections::VecDeque;

use dv_agent::RoutingAgent;
use dv_core::{Cost, DvError, DvResult, LinkSpec, NodeId, Packet, Tick, Topology};
use tracing::{debug, info, trace};

use crate::{Event, EventQueue, LinkPort, SimConfig, SimError, SimObserver, SimResult};

// ── Per-agent inputs assembled before the handle phase ───────────────────────

/// One event as seen by a single agent.
#[derive(Debug, Clone)]
pub(crate) enum AgentInput {
    Packet(Packet),
    LinkCostChanged { neighbour: NodeId, cost: Cost },
}

/// What one agent produced while handling its inputs for a tick.
pub(crate) struct AgentOutput {
    pub(crate) node:    NodeId,
    pub(crate) changed: bool,
    pub(crate) outbox:  Vec<Packet>,
}

// ── Reports ───────────────────────────────────────────────────────────────────

/// Counters accumulated over the life of a [`Sim`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimReport {
    /// Tick of the last processed event.
    pub final_tick:           Tick,
    pub packets_delivered:    u64,
    /// Packets whose link was down by the time they arrived.
    pub packets_dropped:      u64,
    pub link_changes_applied: u64,
    /// Number of (tick, agent) pairs in which an agent's own vector changed.
    pub vector_changes:       u64,
}

/// Result of following next hops from one node towards a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathTrace {
    /// Hops from source to destination, both included.
    Reached(Vec<NodeId>),
    /// Some node on the way had no next hop.  Hops visited so far.
    Unreachable(Vec<NodeId>),
    /// A node was visited twice.  Hops visited, ending with the repeat.
    Loop(Vec<NodeId>),
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The transport collaborator and simulation runner.
///
/// Owns the authoritative cost matrix, every [`RoutingAgent`], and the event
/// queue.  Agents never see the matrix; each handler call gets a
/// [`LinkPort`] over its own row.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    /// Tick of the most recently processed (or currently processing) event.
    pub now: Tick,

    /// Symmetric N×N link costs.  Diagonal is zero.
    costs: Vec<Vec<Cost>>,

    /// Indexed by `NodeId`.
    agents: Vec<RoutingAgent>,

    pub(crate) queue: EventQueue,

    report: SimReport,
}

impl Sim {
    pub(crate) fn from_parts(
        config: SimConfig,
        costs:  Vec<Vec<Cost>>,
        agents: Vec<RoutingAgent>,
        queue:  EventQueue,
    ) -> Self {
        Self {
            config,
            now: Tick::ZERO,
            costs,
            agents,
            queue,
            report: SimReport::default(),
        }
    }

    pub(crate) fn check_link(a: NodeId, b: NodeId, node_count: usize) -> DvResult<()> {
        for end in [a, b] {
            if !end.in_range(node_count) {
                return Err(DvError::NodeOutOfRange { node: end, node_count });
            }
        }
        if a == b {
            return Err(DvError::SelfLink(a));
        }
        Ok(())
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Process events until the queue is empty.
    ///
    /// # Errors
    /// [`SimError::NotQuiescent`] if an event is pending beyond
    /// `config.max_ticks`; [`SimError::Agent`] if an agent rejects an event.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimReport> {
        while self.step_tick(observer)? {}
        observer.on_quiescent(self.now);
        info!(
            final_tick = self.now.0,
            delivered = self.report.packets_delivered,
            "quiescent"
        );
        Ok(self.report())
    }

    /// Process the earliest pending tick.  Returns `false` if the queue was
    /// already empty.
    pub fn step_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<bool> {
        match self.queue.next_tick() {
            None => return Ok(false),
            Some(next) if next.0 > self.config.max_ticks => {
                return Err(SimError::NotQuiescent { max_ticks: self.config.max_ticks, next });
            }
            Some(_) => {}
        }
        let Some((tick, events)) = self.queue.pop_tick() else {
            return Ok(false);
        };
        self.now = tick;
        self.process_tick(tick, events, observer)?;
        Ok(true)
    }

    /// Schedule a link change at `tick` (must not be in the past).
    pub fn schedule_link_change(
        &mut self,
        tick: Tick,
        a:    NodeId,
        b:    NodeId,
        cost: Cost,
    ) -> SimResult<()> {
        Self::check_link(a, b, self.node_count())?;
        if tick < self.now {
            return Err(SimError::Config(format!("link change at {tick} is before now ({})", self.now)));
        }
        self.queue.push(tick, Event::LinkChange { a, b, cost });
        Ok(())
    }

    pub fn is_quiescent(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn report(&self) -> SimReport {
        SimReport { final_tick: self.now, ..self.report }
    }

    pub fn node_count(&self) -> usize {
        self.agents.len()
    }

    /// `None` for out-of-range ids.
    pub fn agent(&self, id: NodeId) -> Option<&RoutingAgent> {
        self.agents.get(id.index())
    }

    pub fn agents(&self) -> &[RoutingAgent] {
        &self.agents
    }

    /// Current authoritative cost of the link `a <-> b`.
    pub fn link_cost(&self, a: NodeId, b: NodeId) -> Cost {
        self.costs
            .get(a.index())
            .and_then(|row| row.get(b.index()))
            .copied()
            .unwrap_or(Cost::INFINITY)
    }

    /// The current links as a [`Topology`], e.g. to compute reference
    /// distances after link changes.
    pub fn topology(&self) -> Topology {
        let n = self.node_count();
        let mut topo = Topology::new(n);
        for a in NodeId::all(n) {
            for b in NodeId::all(n).skip(a.index() + 1) {
                let cost = self.link_cost(a, b);
                if cost.is_finite() {
                    topo.links.push(LinkSpec { a, b, cost });
                }
            }
        }
        topo
    }

    /// Every agent's own vector, row `i` belonging to node `i`.
    pub fn distance_matrix(&self) -> Vec<Vec<Cost>> {
        self.agents.iter().map(|a| a.distance_vector().to_vec()).collect()
    }

    /// Follow next hops from `from` towards `to` across agents.
    pub fn trace_path(&self, from: NodeId, to: NodeId) -> PathTrace {
        let mut hops = vec![from];
        let mut current = from;
        while current != to {
            let next = self.agent(current).and_then(|agent| agent.predecessor(to));
            let Some(next) = next else {
                return PathTrace::Unreachable(hops);
            };
            let repeat = hops.contains(&next);
            hops.push(next);
            if repeat {
                return PathTrace::Loop(hops);
            }
            current = next;
        }
        PathTrace::Reached(hops)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(
        &mut self,
        now:      Tick,
        events:   VecDeque<Event>,
        observer: &mut O,
    ) -> SimResult<()> {
        observer.on_tick_start(now);

        // ── Phase 1: route events to per-agent inputs ─────────────────────
        //
        // Link changes hit the matrix here so later packets of this tick are
        // checked against the new cost.  Endpoints keep the row they had at
        // the start of the tick and replay the changes in arrival order.
        let mut inputs: Vec<Vec<AgentInput>> = vec![Vec::new(); self.node_count()];
        let mut start_rows: Vec<Option<Vec<Cost>>> = vec![None; self.node_count()];
        let mut delivered = 0usize;
        for event in events {
            match event {
                Event::Deliver(packet) => {
                    let (src, dst) = (packet.source(), packet.destination());
                    if !dst.in_range(self.node_count()) {
                        return Err(DvError::NodeOutOfRange { node: dst, node_count: self.node_count() }.into());
                    }
                    if self.link_cost(src, dst).is_infinite() {
                        trace!(from = src.0, to = dst.0, "packet dropped on down link");
                        self.report.packets_dropped += 1;
                        continue;
                    }
                    delivered += 1;
                    inputs[dst.index()].push(AgentInput::Packet(packet));
                }
                Event::LinkChange { a, b, cost } => {
                    for end in [a, b] {
                        if start_rows[end.index()].is_none() {
                            start_rows[end.index()] = Some(self.costs[end.index()].clone());
                        }
                    }
                    self.costs[a.index()][b.index()] = cost;
                    self.costs[b.index()][a.index()] = cost;
                    self.report.link_changes_applied += 1;
                    observer.on_link_change(now, a, b, cost);
                    debug!(tick = now.0, a = a.0, b = b.0, cost = %cost, "link change applied");
                    inputs[a.index()].push(AgentInput::LinkCostChanged { neighbour: b, cost });
                    inputs[b.index()].push(AgentInput::LinkCostChanged { neighbour: a, cost });
                }
            }
        }

        // ── Phase 2: handle (possibly parallel) ───────────────────────────
        let outputs = self.handle_inputs(inputs, start_rows)?;

        // ── Phase 3: flush outboxes in ascending node order ───────────────
        let deliver_at = now + self.config.link_delay_ticks;
        for output in outputs {
            if output.changed {
                self.report.vector_changes += 1;
                observer.on_vector_changed(now, &self.agents[output.node.index()]);
            }
            for packet in output.outbox {
                self.queue.push(deliver_at, Event::Deliver(packet));
            }
        }

        self.report.packets_delivered += delivered as u64;
        observer.on_tick_end(now, delivered);
        Ok(())
    }

    /// Run every agent that has inputs this tick.
    ///
    /// Outputs come back in ascending node order whether or not the
    /// `parallel` feature is on.
    fn handle_inputs(
        &mut self,
        inputs:     Vec<Vec<AgentInput>>,
        start_rows: Vec<Option<Vec<Cost>>>,
    ) -> SimResult<Vec<AgentOutput>> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let costs  = &self.costs;
        let agents = &mut self.agents;

        #[cfg(not(feature = "parallel"))]
        let results: Vec<DvResult<AgentOutput>> = agents
            .iter_mut()
            .zip(inputs.into_iter().zip(start_rows))
            .filter(|(_, (input, _))| !input.is_empty())
            .map(|(agent, (input, start))| {
                let row = start.unwrap_or_else(|| costs[agent.id().index()].clone());
                handle_agent(agent, row, input)
            })
            .collect();

        #[cfg(feature = "parallel")]
        let results: Vec<DvResult<AgentOutput>> = {
            use rayon::prelude::*;

            agents
                .par_iter_mut()
                .zip(inputs.into_par_iter().zip(start_rows.into_par_iter()))
                .filter(|(_, (input, _))| !input.is_empty())
                .map(|(agent, (input, start))| {
                    let row = start.unwrap_or_else(|| costs[agent.id().index()].clone());
                    handle_agent(agent, row, input)
                })
                .collect()
        };

        Ok(results.into_iter().collect::<DvResult<Vec<_>>>()?)
    }
}

/// Feed one agent its inputs in arrival order.
///
/// `row` is the agent's link-cost row as of the start of the tick; each
/// link change is written into it just before the agent handles it.
pub(crate) fn handle_agent(
    agent: &mut RoutingAgent,
    mut row: Vec<Cost>,
    input: Vec<AgentInput>,
) -> DvResult<AgentOutput> {
    let mut outbox = Vec::new();
    let mut changed = false;
    for item in input {
        if let AgentInput::LinkCostChanged { neighbour, cost } = &item {
            if let Some(slot) = row.get_mut(neighbour.index()) {
                *slot = *cost;
            }
        }
        let mut port = LinkPort::new(agent.id(), &row);
        changed |= match item {
            AgentInput::Packet(packet) => agent.receive_packet(&packet, &mut port)?,
            AgentInput::LinkCostChanged { neighbour, cost } => {
                agent.link_cost_changed(neighbour, cost, &mut port)?
            }
        };
        outbox.extend(port.into_outbox());
    }
    Ok(AgentOutput { node: agent.id(), changed, outbox })
}
