//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vector_updates.csv`
//! - `tick_summaries.csv`
//!
//! Unreachable costs are written as `inf`; a missing predecessor is an empty
//! field.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, VectorUpdateRow};

/// Writes a convergence trace to two CSV files.
pub struct CsvWriter {
    updates:   Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut updates = Writer::from_path(dir.join("vector_updates.csv"))?;
        updates.write_record(["tick", "node", "destination", "cost", "predecessor"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "packets_delivered"])?;

        Ok(Self {
            updates,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_vector_updates(&mut self, rows: &[VectorUpdateRow]) -> OutputResult<()> {
        for row in rows {
            self.updates.write_record(&[
                row.tick.to_string(),
                row.node.to_string(),
                row.destination.to_string(),
                row.cost.map_or_else(|| "inf".to_owned(), |c| c.to_string()),
                row.predecessor.map(|p| p.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[row.tick.to_string(), row.packets_delivered.to_string()])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.updates.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
