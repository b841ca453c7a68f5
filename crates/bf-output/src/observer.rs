//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use bf_sim::{SimObserver, Snapshot, StepReport};

use crate::row::{StationSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every post-step snapshot and step summary
/// to any [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  Check them with [`take_error`][Self::take_error],
/// or call [`finish`][Self::finish] once the run is over.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Finish the writer and return it, or the first error seen.
    pub fn finish(mut self) -> OutputResult<W> {
        let result = self.writer.finish();
        self.store_err(result);
        match self.last_error {
            Some(e) => Err(e),
            None => Ok(self.writer),
        }
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

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, report: &StepReport, snapshot: &Snapshot) {
        let rows = StationSnapshotRow::from_snapshot(snapshot);
        let result = self.writer.write_stations(&rows);
        self.store_err(result);

        let result = self.writer.write_step_summary(&StepSummaryRow::new(report, snapshot));
        self.store_err(result);
    }
}
