//! `dv-agent` — the per-node routing agent of the `rust_dv` simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`table`]       | `DistanceTable` (N×N beliefs), `PredecessorVector`        |
//! | [`neighbours`]  | `NeighbourSet` (ordered, drives the tie-break)            |
//! | [`config`]      | `AgentConfig` (poisoned reverse, metric ceiling)          |
//! | [`agent`]       | `RoutingAgent` — event handlers and recomputation         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `AgentConfig`.          |

pub mod agent;
pub mod config;
pub mod neighbours;
pub mod table;


pub use agent::RoutingAgent;
pub use config::AgentConfig;
pub use neighbours::NeighbourSet;
pub use table::{DistanceTable, PredecessorVector};
