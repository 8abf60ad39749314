//! `dv-sim` — the transport collaborator and run loop for `rust_dv`.
//!
//! # Event loop
//!
//! ```text
//! while the queue is not empty:
//!   ① Drain   — take every event queued for the earliest pending tick.
//!   ② Route   — link changes update the cost matrix and become inputs for
//!               both endpoints; packets become inputs for their destination.
//!   ③ Handle  — each agent with inputs handles them in arrival order
//!               through its own LinkPort (parallel with `parallel`).
//!   ④ Flush   — outboxes are enqueued at now + link_delay_ticks, in
//!               ascending node order.
//! ```
//!
//! An empty queue is quiescence: no agent has anything left to say.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs step ③ on Rayon's thread pool.                    |
//! | `serde`    | Serde derives on `SimConfig` and `Scenario`.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dv_core::Topology;
//! use dv_sim::{NoopObserver, SimBuilder};
//!
//! let topo = Topology::new(3).link(0, 1, 1).link(1, 2, 1);
//! let mut sim = SimBuilder::new(topo).link_change(5, 1, 2, 10).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod port;
pub mod queue;
pub mod scenario;
pub mod sim;


pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use port::LinkPort;
pub use queue::{Event, EventQueue};
pub use scenario::{Scenario, ScheduledLinkChange};
pub use sim::{PathTrace, Sim, SimReport};
