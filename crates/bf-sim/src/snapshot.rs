//! Read-only views of engine state handed to observers, writers, and callers.

use serde::{Deserialize, Serialize};

use bf_core::{HourOfDay, Point, StationId, Weather};
use bf_network::Station;
use bf_routing::RoutingStrategy;

use crate::SettlementReport;

/// One station as seen in a [`Snapshot`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationView {
    pub id:          StationId,
    pub occupancy:   u32,
    pub capacity:    u32,
    pub location:    Point,
    /// `occupancy / capacity`.
    pub utilization: f64,
}

impl From<&Station> for StationView {
    fn from(s: &Station) -> Self {
        Self {
            id:          s.id,
            occupancy:   s.occupancy,
            capacity:    s.capacity,
            location:    s.location,
            utilization: s.utilization(),
        }
    }
}

/// Full network state at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub stations:      Vec<StationView>,
    pub hour:          HourOfDay,
    pub weather:       Weather,
    /// Time-of-day demand factor at `hour`.
    pub demand_factor: f64,
    /// Steps executed since initialization.
    pub step:          u64,
    /// Bikes currently docked.
    pub total_bikes:   u64,
    /// Bikes removed by `OverflowPolicy::Drop` since initialization.
    pub dropped_bikes: u64,
    /// Bikes that changed station during the operation that produced this
    /// snapshot (0 for anything but a step).
    pub movement:      u32,
}

impl Snapshot {
    /// Occupancy per station, indexed by `StationId`.
    pub fn occupancy(&self) -> Vec<u32> {
        self.stations.iter().map(|s| s.occupancy).collect()
    }

    pub fn station(&self, id: StationId) -> Option<&StationView> {
        self.stations.get(id.index())
    }
}

/// Everything that happened during one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// 1-based index of this step since initialization.
    pub step:       u64,
    /// Hour the step ran at.
    pub hour:       HourOfDay,
    pub weather:    Weather,
    pub strategy:   RoutingStrategy,
    /// Bikes that left their dock.
    pub departures: u32,
    /// Departures routed back to their own source.
    pub stayed:     u32,
    #[serde(flatten)]
    pub settlement: SettlementReport,
}

impl StepReport {
    #[inline]
    pub fn moved(&self) -> u32 {
        self.settlement.moved
    }
}
