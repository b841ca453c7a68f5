//! Station network representation and builder.
//!
//! # Data layout
//!
//! Distances are stored as a dense row-major `n × n` table:
//!
//! ```text
//! distance(a, b) = distances[a * n + b]
//! ```
//!
//! The table is symmetric with a zero diagonal and is computed once at build
//! time, as is each station's *nearest order*: every other station sorted by
//! ascending distance, ties broken by ascending `StationId`.  Overflow
//! redistribution walks these lists directly, so no sorting happens on the
//! per-step path.

use log::debug;

use bf_core::{Point, StationId};

use crate::{NetworkError, NetworkResult, Station, StationSpec};

// ── StationNetwork ────────────────────────────────────────────────────────────

/// An ordered collection of stations plus derived geometry.
///
/// Do not construct directly; use [`StationNetworkBuilder`].
#[derive(Clone, Debug)]
pub struct StationNetwork {
    stations:  Vec<Station>,
    distances: Vec<f64>,
    nearest:   Vec<Vec<StationId>>,
}

impl StationNetwork {
    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[inline]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    /// Euclidean distance between two stations.
    ///
    /// # Panics
    /// Panics if either id is out of range.
    #[inline]
    pub fn distance(&self, a: StationId, b: StationId) -> f64 {
        self.distances[a.index() * self.len() + b.index()]
    }

    /// Row `a` of the distance table.
    #[inline]
    pub fn distances_from(&self, a: StationId) -> &[f64] {
        let n = self.len();
        &self.distances[a.index() * n..(a.index() + 1) * n]
    }

    /// Every station except `id`, nearest first (ties → lowest id).
    #[inline]
    pub fn nearest_order(&self, id: StationId) -> &[StationId] {
        &self.nearest[id.index()]
    }

    /// Current occupancy of every station, indexed by `StationId`.
    pub fn occupancy(&self) -> Vec<u32> {
        self.stations.iter().map(|s| s.occupancy).collect()
    }

    /// Capacity of every station, indexed by `StationId`.
    pub fn capacities(&self) -> Vec<u32> {
        self.stations.iter().map(|s| s.capacity).collect()
    }

    pub fn total_occupancy(&self) -> u64 {
        self.stations.iter().map(|s| s.occupancy as u64).sum()
    }

    pub fn total_capacity(&self) -> u64 {
        self.stations.iter().map(|s| s.capacity as u64).sum()
    }

    /// Replace every station's occupancy in one step.
    ///
    /// Validates the whole vector before writing anything, so on error the
    /// network is unchanged.
    pub fn commit_occupancy(&mut self, occupancy: &[u32]) -> NetworkResult<()> {
        check_occupancy(&self.stations, occupancy)?;
        for (station, &occ) in self.stations.iter_mut().zip(occupancy) {
            station.occupancy = occ;
        }
        Ok(())
    }
}

fn check_occupancy(stations: &[Station], occupancy: &[u32]) -> NetworkResult<()> {
    if occupancy.len() != stations.len() {
        return Err(NetworkError::LengthMismatch {
            expected: stations.len(),
            got:      occupancy.len(),
            what:     "occupancy",
        });
    }
    for (station, &occ) in stations.iter().zip(occupancy) {
        if occ > station.capacity {
            return Err(NetworkError::OccupancyExceedsCapacity {
                station:   station.id,
                occupancy: occ,
                capacity:  station.capacity,
            });
        }
    }
    Ok(())
}

// ── StationNetworkBuilder ─────────────────────────────────────────────────────

/// Incremental builder for [`StationNetwork`].
///
/// # Usage
///
/// ```rust
/// use bf_core::Point;
/// use bf_network::StationNetworkBuilder;
///
/// let mut b = StationNetworkBuilder::new();
/// let a = b.add_station(Point::new(0.0, 0.0), 5);
/// let c = b.add_station(Point::new(3.0, 4.0), 5);
/// let net = b.occupancy(vec![5, 0]).build().unwrap();
/// assert_eq!(net.distance(a, c), 5.0);
/// assert_eq!(net.total_occupancy(), 5);
/// ```
#[derive(Default)]
pub struct StationNetworkBuilder {
    specs:     Vec<StationSpec>,
    occupancy: Option<Vec<u32>>,
}

impl StationNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-filled with `specs`, ids assigned in order.
    pub fn from_specs(specs: Vec<StationSpec>) -> Self {
        Self { specs, occupancy: None }
    }

    /// Add a station and return its id.
    pub fn add_station(&mut self, location: Point, capacity: u32) -> StationId {
        let id = StationId(self.specs.len() as u32);
        self.specs.push(StationSpec { location, capacity });
        id
    }

    /// Initial occupancy per station.  Defaults to all zeros.
    pub fn occupancy(mut self, occupancy: Vec<u32>) -> Self {
        self.occupancy = Some(occupancy);
        self
    }

    /// Validate the stations and derive the distance table and nearest order.
    pub fn build(self) -> NetworkResult<StationNetwork> {
        if self.specs.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }

        let stations: Vec<Station> = self
            .specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Station {
                id:        StationId(i as u32),
                location:  spec.location,
                capacity:  spec.capacity,
                occupancy: 0,
            })
            .collect();

        for s in &stations {
            if s.capacity == 0 {
                return Err(NetworkError::ZeroCapacity(s.id));
            }
            if !s.location.is_finite() {
                return Err(NetworkError::NonFiniteLocation(s.id));
            }
        }

        let mut stations = stations;
        if let Some(occ) = self.occupancy {
            check_occupancy(&stations, &occ)?;
            for (s, o) in stations.iter_mut().zip(occ) {
                s.occupancy = o;
            }
        }

        let locations: Vec<Point> = stations.iter().map(|s| s.location).collect();
        let distances = distance_table(&locations);
        let nearest = nearest_orders(&distances, locations.len());

        debug!(
            "network built: {} stations, {} docks, {} bikes",
            stations.len(),
            stations.iter().map(|s| s.capacity as u64).sum::<u64>(),
            stations.iter().map(|s| s.occupancy as u64).sum::<u64>()
        );

        Ok(StationNetwork { stations, distances, nearest })
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

pub(crate) fn distance_row(locations: &[Point], a: usize, row: &mut [f64]) {
    for (b, d) in row.iter_mut().enumerate() {
        *d = if a == b { 0.0 } else { locations[a].distance(locations[b]) };
    }
}

#[cfg(not(feature = "parallel"))]
fn distance_table(locations: &[Point]) -> Vec<f64> {
    let n = locations.len();
    let mut table = vec![0.0; n * n];
    for (a, row) in table.chunks_mut(n).enumerate() {
        distance_row(locations, a, row);
    }
    table
}

#[cfg(feature = "parallel")]
fn distance_table(locations: &[Point]) -> Vec<f64> {
    use rayon::prelude::*;

    let n = locations.len();
    let mut table = vec![0.0; n * n];
    table
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(a, row)| distance_row(locations, a, row));
    table
}

fn nearest_orders(distances: &[f64], n: usize) -> Vec<Vec<StationId>> {
    (0..n)
        .map(|a| {
            let row = &distances[a * n..(a + 1) * n];
            let mut others: Vec<StationId> = (0..n)
                .filter(|&b| b != a)
                .map(|b| StationId(b as u32))
                .collect();
            others.sort_by(|x, y| {
                row[x.index()]
                    .total_cmp(&row[y.index()])
                    .then(x.cmp(y))
            });
            others
        })
        .collect()
}
