//! JSON interchange for snapshots.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bf_sim::Snapshot;

use crate::OutputResult;

/// Compact single-line JSON for one snapshot.
pub fn snapshot_to_string(snapshot: &Snapshot) -> OutputResult<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Write `snapshots` to `path` as a pretty-printed JSON array.
pub fn write_snapshots(path: &Path, snapshots: &[Snapshot]) -> OutputResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, snapshots)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

pub fn read_snapshots(path: &Path) -> OutputResult<Vec<Snapshot>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
