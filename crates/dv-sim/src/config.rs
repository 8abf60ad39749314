//! Simulator configuration.

use dv_agent::AgentConfig;

/// Run-wide settings.
///
/// Usually built with `Default` and tweaked, or read from a scenario file by
/// the application.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Abort with `SimError::NotQuiescent` if an event is still pending past
    /// this tick.  Count-to-infinity without a metric ceiling hits this.
    pub max_ticks: u64,

    /// Ticks between `send` and delivery.  Must be at least 1.
    pub link_delay_ticks: u64,

    /// Protocol options applied to every agent.
    pub agent: AgentConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_ticks:        10_000,
            link_delay_ticks: 1,
            agent:            AgentConfig::default(),
        }
    }
}
