//! Plain data row types written by output backends.

use dv_agent::RoutingAgent;
use dv_core::{NodeId, Tick};

/// One entry of an agent's vector right after it changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorUpdateRow {
    pub tick:        u64,
    pub node:        u32,
    pub destination: u32,
    /// `None` = unreachable.
    pub cost:        Option<u32>,
    /// Next hop; `None` for the node itself and unreachable destinations.
    pub predecessor: Option<u32>,
}

impl VectorUpdateRow {
    /// One row per destination of `agent`'s current vector.
    pub fn from_agent(tick: Tick, agent: &RoutingAgent) -> Vec<Self> {
        NodeId::all(agent.node_count())
            .zip(agent.distance_vector())
            .map(|(dest, cost)| VectorUpdateRow {
                tick:        tick.0,
                node:        agent.id().0,
                destination: dest.0,
                cost:        cost.finite(),
                predecessor: agent.predecessor(dest).map(|p| p.0),
            })
            .collect()
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub packets_delivered: u64,
}
