//! `bf-output` — simulation output writers for bikeflow.
//!
//! | Feature   | Backend | Files created                                    |
//! |-----------|---------|--------------------------------------------------|
//! | *(none)*  | CSV     | `station_snapshots.csv`, `step_summaries.csv`    |
//! | *(none)*  | JSON    | caller-chosen file, array of snapshots           |
//! | `sqlite`  | SQLite  | `output.db`                                      |
//!
//! The tabular backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `bf_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bf_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! let day = sim.simulate_day_with(RoutingStrategy::Categorical, &mut obs)?;
//! obs.finish()?;
//! bf_output::json::write_snapshots(Path::new("day.json"), &day)?;
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{StationSnapshotRow, StepSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
