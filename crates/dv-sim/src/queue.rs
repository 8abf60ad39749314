//! `EventQueue` — ordered delivery of packets and link changes.
//!
//! Events are keyed by tick.  Within a tick they come out in the order they
//! went in, so two packets sent over the same link in the same tick arrive
//! in send order.

use std::collections::{BTreeMap, VecDeque};

use dv_core::{Cost, NodeId, Packet, Tick};

/// Something the transport delivers to agents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Hand a vector packet to `packet.destination()`.
    Deliver(Packet),

    /// The undirected link `a <-> b` now costs `cost` (`INFINITY` = down).
    LinkChange { a: NodeId, b: NodeId, cost: Cost },
}

/// Tick-ordered FIFO of pending events.
#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<Tick, VecDeque<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event` to the events pending at `tick`.
    pub fn push(&mut self, tick: Tick, event: Event) {
        self.inner.entry(tick).or_default().push_back(event);
        self.total += 1;
    }

    /// Remove and return the earliest pending tick and its events.
    pub fn pop_tick(&mut self) -> Option<(Tick, VecDeque<Event>)> {
        let (tick, events) = self.inner.pop_first()?;
        self.total -= events.len();
        Some((tick, events))
    }

    /// The earliest tick with at least one pending event.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total number of pending events across all ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct ticks with pending events.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }
}
