//! Plain data row types written by output backends.

use bf_core::Weather;
use bf_sim::{Snapshot, StepReport};

/// One station's state in one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationSnapshotRow {
    pub step:       u64,
    /// Clock hour when the snapshot was taken.
    pub hour:       u8,
    pub station_id: u32,
    pub occupancy:  u32,
    pub capacity:   u32,
    pub x:          f64,
    pub y:          f64,
}

impl StationSnapshotRow {
    /// One row per station, in id order.
    pub fn from_snapshot(snapshot: &Snapshot) -> Vec<Self> {
        snapshot
            .stations
            .iter()
            .map(|s| Self {
                step:       snapshot.step,
                hour:       snapshot.hour.get(),
                station_id: s.id.0,
                occupancy:  s.occupancy,
                capacity:   s.capacity,
                x:          s.location.x,
                y:          s.location.y,
            })
            .collect()
    }
}

/// Totals for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSummaryRow {
    pub step:        u64,
    /// Hour the step ran at.
    pub hour:        u8,
    pub weather:     Weather,
    /// Bikes docked after the step.
    pub total_bikes: u64,
    pub departures:  u32,
    pub moved:       u32,
    pub redirected:  u32,
    pub returned:    u32,
    pub dropped:     u32,
}

impl StepSummaryRow {
    pub fn new(report: &StepReport, snapshot: &Snapshot) -> Self {
        Self {
            step:        report.step,
            hour:        report.hour.get(),
            weather:     report.weather,
            total_bikes: snapshot.total_bikes,
            departures:  report.departures,
            moved:       report.settlement.moved,
            redirected:  report.settlement.redirected,
            returned:    report.settlement.returned,
            dropped:     report.settlement.dropped,
        }
    }
}
