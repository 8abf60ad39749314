//! `dv-output` — convergence trace writers for the dv workspace.
//!
//! | Backend | Files created                                  |
//! |---------|------------------------------------------------|
//! | CSV     | `vector_updates.csv`, `tick_summaries.csv`     |
//!
//! Writers implement [`OutputWriter`] and are driven by [`TraceObserver`],
//! which implements `dv_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dv_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./trace"))?;
//! let mut obs = TraceObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{TickSummaryRow, VectorUpdateRow};
pub use writer::OutputWriter;
