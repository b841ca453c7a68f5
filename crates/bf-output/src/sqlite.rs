//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `station_snapshots` and `step_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, StationSnapshotRow, StepSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS station_snapshots (
                 step       INTEGER NOT NULL,
                 hour       INTEGER NOT NULL,
                 station_id INTEGER NOT NULL,
                 occupancy  INTEGER NOT NULL,
                 capacity   INTEGER NOT NULL,
                 x          REAL    NOT NULL,
                 y          REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS step_summaries (
                 step        INTEGER PRIMARY KEY,
                 hour        INTEGER NOT NULL,
                 weather     TEXT    NOT NULL,
                 total_bikes INTEGER NOT NULL,
                 departures  INTEGER NOT NULL,
                 moved       INTEGER NOT NULL,
                 redirected  INTEGER NOT NULL,
                 returned    INTEGER NOT NULL,
                 dropped     INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_stations(&mut self, rows: &[StationSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO station_snapshots \
                 (step, hour, station_id, occupancy, capacity, x, y) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.step as i64,
                    row.hour,
                    row.station_id,
                    row.occupancy,
                    row.capacity,
                    row.x,
                    row.y,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO step_summaries \
             (step, hour, weather, total_bikes, departures, moved, redirected, returned, dropped) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.step as i64,
                row.hour,
                row.weather.as_str(),
                row.total_bikes as i64,
                row.departures,
                row.moved,
                row.redirected,
                row.returned,
                row.dropped,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
