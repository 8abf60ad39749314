//! Simulation observer trait for tracing and data collection.

use dv_agent::RoutingAgent;
use dv_core::{Cost, NodeId, Tick};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] while it drains the
/// event queue.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — convergence printer
///
/// ```rust,ignore
/// struct PrintChanges;
///
/// impl SimObserver for PrintChanges {
///     fn on_vector_changed(&mut self, tick: Tick, agent: &RoutingAgent) {
///         println!("{tick}: {} -> {:?}", agent.id(), agent.distance_vector());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before any event of `tick` is handled.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when a scheduled link change is applied to the cost matrix,
    /// before either endpoint has reacted.
    fn on_link_change(&mut self, _tick: Tick, _a: NodeId, _b: NodeId, _cost: Cost) {}

    /// Called once per tick for every agent whose own vector changed, in
    /// ascending node order, after all of that tick's events were handled.
    fn on_vector_changed(&mut self, _tick: Tick, _agent: &RoutingAgent) {}

    /// Called after `tick` is done.  `delivered` counts packets handed to
    /// agents this tick.
    fn on_tick_end(&mut self, _tick: Tick, _delivered: usize) {}

    /// Called once the queue is empty.
    fn on_quiescent(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
