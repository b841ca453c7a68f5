//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `station_snapshots.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, StationSnapshotRow, StepSummaryRow};

pub const STATION_HEADER: [&str; 7] =
    ["step", "hour", "station_id", "occupancy", "capacity", "x", "y"];

pub const SUMMARY_HEADER: [&str; 9] = [
    "step",
    "hour",
    "weather",
    "total_bikes",
    "departures",
    "moved",
    "redirected",
    "returned",
    "dropped",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    stations:  Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut stations = Writer::from_path(dir.join("station_snapshots.csv"))?;
        stations.write_record(STATION_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            stations,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_stations(&mut self, rows: &[StationSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.stations.write_record(&[
                row.step.to_string(),
                row.hour.to_string(),
                row.station_id.to_string(),
                row.occupancy.to_string(),
                row.capacity.to_string(),
                row.x.to_string(),
                row.y.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.hour.to_string(),
            row.weather.as_str().to_owned(),
            row.total_bikes.to_string(),
            row.departures.to_string(),
            row.moved.to_string(),
            row.redirected.to_string(),
            row.returned.to_string(),
            row.dropped.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stations.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
