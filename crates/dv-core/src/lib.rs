//! `dv-core` — foundational types for the `rust_dv` distance-vector simulator.
//!
//! Every other `dv-*` crate depends on this one.  It has no `dv-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `NodeId`                                                   |
//! | [`cost`]        | `Cost` with the saturating `INFINITY` sentinel             |
//! | [`time`]        | `Tick`                                                     |
//! | [`packet`]      | `Packet` — one advertised distance vector                  |
//! | [`transport`]   | `Transport` — the per-node link capability                 |
//! | [`topology`]    | `Topology`, `LinkSpec`, reference all-pairs shortest paths |
//! | [`rng`]         | `SimRng` (seeded, for random topologies)                   |
//! | [`error`]       | `DvError`, `DvResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod cost;
pub mod error;
pub mod ids;
pub mod packet;
pub mod rng;
pub mod time;
pub mod topology;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cost::Cost;
pub use error::{DvError, DvResult};
pub use ids::NodeId;
pub use packet::Packet;
pub use rng::SimRng;
pub use time::Tick;
pub use topology::{LinkSpec, Topology};
pub use transport::Transport;
