//! Declarative run description: topology, schedule, and config.
//!
//! With the `serde` feature this is the shape of a JSON scenario file:
//!
//! ```json
//! {
//!   "topology": { "node_count": 3, "links": [
//!     { "a": 0, "b": 1, "cost": 1 },
//!     { "a": 1, "b": 2, "cost": 1 } ] },
//!   "link_changes": [ { "tick": 20, "a": 1, "b": 2, "cost": 10 },
//!                     { "tick": 40, "a": 1, "b": 2 } ],
//!   "config": { "agent": { "poisoned_reverse": true, "max_metric": 16 } }
//! }
//! ```
//!
//! A link change without `cost` takes the link down.

use dv_core::{Cost, NodeId, Tick, Topology};

use crate::{SimBuilder, SimConfig};

/// One link-cost change, applied at `tick`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledLinkChange {
    pub tick: Tick,
    pub a:    NodeId,
    pub b:    NodeId,
    /// `None` = link down.
    pub cost: Option<u32>,
}

impl ScheduledLinkChange {
    #[inline]
    pub fn cost(&self) -> Cost {
        Cost::from(self.cost)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub topology: Topology,

    #[cfg_attr(feature = "serde", serde(default))]
    pub link_changes: Vec<ScheduledLinkChange>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub config: SimConfig,
}

impl Scenario {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            link_changes: Vec::new(),
            config:       SimConfig::default(),
        }
    }

    /// A builder preloaded with everything in this scenario.
    pub fn into_builder(self) -> SimBuilder {
        let mut builder = SimBuilder::new(self.topology).config(self.config);
        for change in &self.link_changes {
            builder = builder.link_change(change.tick.0, change.a.0, change.b.0, change.cost());
        }
        builder
    }
}
