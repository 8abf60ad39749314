//! Integration tests for dv-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{TickSummaryRow, VectorUpdateRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(dir: &TempDir, name: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read(&dir, "vector_updates.csv");
        assert_eq!(headers, ["tick", "node", "destination", "cost", "predecessor"]);
        assert!(rows.is_empty());

        let (headers, _) = read(&dir, "tick_summaries.csv");
        assert_eq!(headers, ["tick", "packets_delivered"]);
    }

    #[test]
    fn sentinels_written_as_inf_and_empty() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_vector_updates(&[
            VectorUpdateRow { tick: 4, node: 0, destination: 1, cost: Some(3), predecessor: Some(2) },
            VectorUpdateRow { tick: 4, node: 0, destination: 5, cost: None, predecessor: None },
        ])
        .unwrap();
        w.write_tick_summary(&TickSummaryRow { tick: 4, packets_delivered: 7 }).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir, "vector_updates.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "3");
        assert_eq!(&rows[0][4], "2");
        assert_eq!(&rows[1][3], "inf");
        assert_eq!(&rows[1][4], "");

        let (_, rows) = read(&dir, "tick_summaries.csv");
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][1], "7");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use dv_agent::AgentConfig;
    use dv_core::{Cost, Topology};
    use dv_sim::{SimBuilder, SimConfig};

    use crate::row::{TickSummaryRow, VectorUpdateRow};
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, OutputResult, TraceObserver};

    /// In-memory writer for checking what the observer emits.
    #[derive(Default)]
    struct Collect {
        updates:   Vec<VectorUpdateRow>,
        summaries: Vec<TickSummaryRow>,
        finished:  usize,
    }

    impl OutputWriter for Collect {
        fn write_vector_updates(&mut self, rows: &[VectorUpdateRow]) -> OutputResult<()> {
            self.updates.extend_from_slice(rows);
            Ok(())
        }
        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    /// Fails every write.
    struct Broken;

    impl OutputWriter for Broken {
        fn write_vector_updates(&mut self, _rows: &[VectorUpdateRow]) -> OutputResult<()> {
            Err(std::io::Error::other("disk full").into())
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Err(std::io::Error::other("disk full").into())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    fn line() -> Topology {
        Topology::new(3).link(0, 1, 1).link(1, 2, 1)
    }

    #[test]
    fn records_changed_vectors_and_summaries() {
        let mut sim = SimBuilder::new(line()).build().unwrap();
        let mut obs = TraceObserver::new(Collect::default());
        let report = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let out = obs.into_writer();
        assert_eq!(out.finished, 1);
        // Nodes 0 and 2 change at tick 1, three destinations each.
        assert_eq!(out.updates.len(), 6);
        let last_of_0 = out.updates[2];
        assert_eq!(last_of_0, VectorUpdateRow {
            tick:        1,
            node:        0,
            destination: 2,
            cost:        Some(2),
            predecessor: Some(1),
        });
        assert_eq!(out.updates[0].predecessor, None);

        let delivered: u64 = out.summaries.iter().map(|s| s.packets_delivered).sum();
        assert_eq!(delivered, report.packets_delivered);
        assert_eq!(out.summaries.last().map(|s| s.tick), Some(report.final_tick.0));
    }

    #[test]
    fn unreachable_rows_after_partition() {
        let config = SimConfig { agent: AgentConfig::rip_like(16), ..SimConfig::default() };
        let mut sim = SimBuilder::new(line())
            .config(config)
            .link_change(20, 1, 2, Cost::INFINITY)
            .build()
            .unwrap();
        let mut obs = TraceObserver::new(Collect::default());
        sim.run(&mut obs).unwrap();

        let out = obs.into_writer();
        let final_0_to_2 = out
            .updates
            .iter()
            .filter(|r| r.node == 0 && r.destination == 2)
            .last()
            .copied()
            .unwrap();
        assert_eq!(final_0_to_2.cost, None);
        assert_eq!(final_0_to_2.predecessor, None);
    }

    #[test]
    fn first_write_error_is_kept() {
        let mut sim = SimBuilder::new(line()).build().unwrap();
        let mut obs = TraceObserver::new(Broken);
        sim.run(&mut obs).unwrap();
        assert!(matches!(obs.take_error(), Some(crate::OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn integration_csv() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let mut sim = SimBuilder::new(line()).link_change(10, 0, 1, 4).build().unwrap();
        let mut obs = TraceObserver::new(CsvWriter::new(dir.path()).unwrap());
        let report = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("vector_updates.csv")).unwrap();
        let rows = rdr.records().count() as u64;
        assert_eq!(rows, report.vector_changes * 3);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert!(rdr.records().count() > 0);
    }
}
