//! Station records.

use bf_core::{Point, StationId};

/// Caller-supplied description of a station, before ids are assigned.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationSpec {
    pub location: Point,
    pub capacity: u32,
}

impl StationSpec {
    pub fn new(location: Point, capacity: u32) -> Self {
        Self { location, capacity }
    }
}

/// A capacity-bounded dock holding bikes at a fixed location.
///
/// `location` and `capacity` never change after the network is built.
/// `occupancy` is only rewritten by a validated commit
/// ([`StationNetwork::commit_occupancy`][crate::StationNetwork::commit_occupancy]),
/// which keeps `0 ≤ occupancy ≤ capacity`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub id:        StationId,
    pub location:  Point,
    pub capacity:  u32,
    pub occupancy: u32,
}

impl Station {
    /// `occupancy / capacity` in `[0, 1]`.
    #[inline]
    pub fn utilization(&self) -> f64 {
        self.occupancy as f64 / self.capacity as f64
    }
}
