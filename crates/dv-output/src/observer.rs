//! `TraceObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use dv_agent::RoutingAgent;
use dv_core::Tick;
use dv_sim::SimObserver;

use crate::row::{TickSummaryRow, VectorUpdateRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records every vector change and a per-tick
/// summary through any [`OutputWriter`].
///
/// Errors from the writer are stored because `SimObserver` methods have no
/// return value.  After `sim.run()` returns, check with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TraceObserver<W> {
    fn on_vector_changed(&mut self, tick: Tick, agent: &RoutingAgent) {
        let rows = VectorUpdateRow::from_agent(tick, agent);
        let result = self.writer.write_vector_updates(&rows);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, delivered: usize) {
        let row = TickSummaryRow { tick: tick.0, packets_delivered: delivered as u64 };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_quiescent(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
