//! Agent tuning knobs.

use dv_core::Cost;

/// Per-agent protocol options.
///
/// The default is plain Bellman-Ford distance vector: every neighbour is sent
/// the agent's own row verbatim and any finite cost is a valid metric.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    /// Advertise `INFINITY` to neighbour `k` for every destination currently
    /// routed through `k`.  Stops two-node count-to-infinity loops.
    pub poisoned_reverse: bool,

    /// Treat any path cost at or above this value as unreachable, like RIP's
    /// metric 16.  `None` disables the ceiling.
    pub max_metric: Option<Cost>,
}

impl AgentConfig {
    /// Poisoned reverse on, with the given metric ceiling.
    pub fn rip_like(max_metric: u32) -> Self {
        Self {
            poisoned_reverse: true,
            max_metric:       Some(Cost(max_metric)),
        }
    }

    /// Apply the metric ceiling to a path cost.
    #[inline]
    pub fn clamp(&self, cost: Cost) -> Cost {
        match self.max_metric {
            Some(max) if cost >= max => Cost::INFINITY,
            _ => cost,
        }
    }
}
