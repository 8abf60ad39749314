//! Fluent builder for constructing a [`Sim`].

use dv_agent::RoutingAgent;
use dv_core::{Cost, NodeId, Tick, Topology};
use tracing::info;

use crate::{Event, EventQueue, LinkPort, Sim, SimConfig, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`Topology`] — node count and starting links
///
/// # Optional inputs (have defaults)
///
/// | Method                      | Default                 |
/// |-----------------------------|-------------------------|
/// | `.config(c)`                | `SimConfig::default()`  |
/// | `.link_change(t, a, b, c)`  | no scheduled changes    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(Topology::new(3).link(0, 1, 1).link(1, 2, 1))
///     .config(SimConfig { agent: AgentConfig::rip_like(16), ..Default::default() })
///     .link_change(30, 1, 2, Cost::INFINITY)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    topology: Topology,
    config:   SimConfig,
    changes:  Vec<(Tick, NodeId, NodeId, Cost)>,
}

impl SimBuilder {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            config:  SimConfig::default(),
            changes: Vec::new(),
        }
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Schedule the link `a <-> b` to change to `cost` at `tick`.
    ///
    /// Changes scheduled for the same tick apply in the order given here,
    /// and each endpoint handles them one at a time: a down-then-up pair is
    /// seen as an outage followed by a new link.
    pub fn link_change(mut self, tick: u64, a: u32, b: u32, cost: impl Into<Cost>) -> Self {
        self.changes.push((Tick(tick), NodeId(a), NodeId(b), cost.into()));
        self
    }

    /// Validate inputs, construct every agent, and return a ready-to-run
    /// [`Sim`].
    ///
    /// Agents are constructed in ascending id order; each one's initial
    /// vectors are queued for delivery at `link_delay_ticks`.
    pub fn build(self) -> SimResult<Sim> {
        self.topology.validate()?;
        if self.config.link_delay_ticks == 0 {
            return Err(SimError::Config("link_delay_ticks must be at least 1".into()));
        }

        let node_count = self.topology.node_count;
        let costs = self.topology.cost_matrix();
        let mut queue = EventQueue::new();

        for &(tick, a, b, cost) in &self.changes {
            Sim::check_link(a, b, node_count)?;
            queue.push(tick, Event::LinkChange { a, b, cost });
        }

        let first_delivery = Tick::ZERO + self.config.link_delay_ticks;
        let mut agents = Vec::with_capacity(node_count);
        for id in NodeId::all(node_count) {
            let mut port = LinkPort::new(id, &costs[id.index()]);
            agents.push(RoutingAgent::new(id, node_count, self.config.agent.clone(), &mut port)?);
            for packet in port.into_outbox() {
                queue.push(first_delivery, Event::Deliver(packet));
            }
        }

        info!(
            nodes = node_count,
            links = self.topology.links.len(),
            scheduled_changes = self.changes.len(),
            "simulation built"
        );

        Ok(Sim::from_parts(self.config, costs, agents, queue))
    }
}
