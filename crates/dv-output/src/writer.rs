//! The `OutputWriter` trait implemented by trace backends.

use crate::{OutputResult, TickSummaryRow, VectorUpdateRow};

/// Sink for convergence trace rows.
///
/// Errors are surfaced to [`TraceObserver`][crate::TraceObserver], which
/// keeps the first one for [`take_error`][crate::TraceObserver::take_error].
pub trait OutputWriter {
    /// Write the rows describing one changed vector.
    fn write_vector_updates(&mut self, rows: &[VectorUpdateRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
