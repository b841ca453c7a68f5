//! Applying a step's proposed moves to station occupancy.
//!
//! # Order of settlement
//!
//! ```text
//! ① Departures — every move's source loses one bike (all at once, before
//!                any arrival is placed).
//! ② Arrivals   — destinations in ascending id order; within a destination,
//!                bikes in ascending source order.  A destination accepts
//!                bikes until it is full.  Every destination takes its own
//!                arrivals before any overflow moves.
//! ③ Overflow   — rejected bikes, by ascending destination id, cascade to
//!                the destination's nearest stations with a free dock,
//!                optionally limited to a radius.
//! ④ Unresolved — bikes the cascade could not place follow the
//!                `OverflowPolicy`.
//! ```
//!
//! The ordering makes settlement a pure function of the pre-step network
//! and the move list.

use log::warn;

use bf_core::{OverflowPolicy, StationId};
use bf_network::StationNetwork;
use bf_routing::Move;

use crate::{SimError, SimResult};

/// Counters describing how one step's moves were settled.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SettlementReport {
    /// Bikes docked at the station they were routed to.
    pub accepted:   u32,
    /// Overflow bikes docked at a station near their full destination.
    pub redirected: u32,
    /// Bikes that found no dock within reach and went back to (or near) their
    /// source.
    pub returned:   u32,
    /// Bikes that found no dock within reach and left the system.
    pub dropped:    u32,
    /// Overflow bikes the cascade could not place (`returned + dropped`).
    pub unresolved: u32,
    /// Bikes whose final station differs from the one they left.
    pub moved:      u32,
}

/// Post-step occupancy plus the counters that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Settlement {
    pub occupancy: Vec<u32>,
    pub report:    SettlementReport,
}

/// Settle `moves` against the network's current occupancy.
///
/// The network itself is not modified; commit the returned occupancy with
/// [`StationNetwork::commit_occupancy`].
pub fn settle(
    network:       &StationNetwork,
    moves:         &[Move],
    policy:        OverflowPolicy,
    cascade_reach: Option<f64>,
) -> SimResult<Settlement> {
    let n = network.len();
    let capacity = network.capacities();
    let mut occupancy = network.occupancy();
    let mut report = SettlementReport::default();

    // ── ① Departures ──────────────────────────────────────────────────────
    let mut departures = vec![0u32; n];
    let mut incoming: Vec<Vec<StationId>> = vec![Vec::new(); n];
    for m in moves {
        if m.source.index() >= n {
            return Err(SimError::UnknownStation(m.source));
        }
        if m.destination.index() >= n {
            return Err(SimError::UnknownStation(m.destination));
        }
        departures[m.source.index()] += 1;
        incoming[m.destination.index()].push(m.source);
    }
    for (i, (&leaving, occ)) in departures.iter().zip(occupancy.iter_mut()).enumerate() {
        if leaving > *occ {
            return Err(SimError::DeparturesExceedOccupancy {
                station:    StationId(i as u32),
                departures: leaving,
                occupancy:  *occ,
            });
        }
        *occ -= leaving;
    }

    // ── ② Arrivals ────────────────────────────────────────────────────────
    let mut overflows: Vec<(StationId, Vec<StationId>)> = Vec::new();
    for (dest, mut sources) in incoming.into_iter().enumerate() {
        if sources.is_empty() {
            continue;
        }
        sources.sort_unstable();

        let free = (capacity[dest] - occupancy[dest]) as usize;
        let taken = free.min(sources.len());
        occupancy[dest] += taken as u32;
        report.accepted += taken as u32;
        report.moved += taken as u32;

        if taken < sources.len() {
            overflows.push((StationId(dest as u32), sources.split_off(taken)));
        }
    }

    // ── ③ Overflow ────────────────────────────────────────────────────────
    let mut stranded: Vec<StationId> = Vec::new();
    for (dest, overflow) in overflows {
        let placed = cascade(
            network,
            dest,
            &overflow,
            cascade_reach,
            &capacity,
            &mut occupancy,
        );
        for (&source, station) in overflow.iter().zip(&placed) {
            report.redirected += 1;
            if *station != source {
                report.moved += 1;
            }
        }
        stranded.extend_from_slice(&overflow[placed.len()..]);
    }

    // ── ④ Unresolved overflow ─────────────────────────────────────────────
    report.unresolved = stranded.len() as u32;
    if !stranded.is_empty() {
        warn!(
            "{} overflow bikes found no dock within reach ({:?})",
            stranded.len(),
            policy
        );
    }
    match policy {
        OverflowPolicy::Drop => report.dropped = report.unresolved,
        OverflowPolicy::ReturnToSource => {
            for source in stranded {
                if let Some(station) =
                    return_to_source(network, source, &capacity, &mut occupancy)
                {
                    report.returned += 1;
                    if station != source {
                        report.moved += 1;
                    }
                } else {
                    // Only reachable if total occupancy already exceeded total
                    // capacity before the step.
                    warn!("no free dock anywhere for a bike from station {source}");
                    report.dropped += 1;
                }
            }
        }
    }

    Ok(Settlement { occupancy, report })
}

/// Place `bikes` at stations near `from` (nearest first, ties by id), skipping
/// full stations and stopping at `reach`.  Returns the station each placed
/// bike went to, in order; bikes beyond the returned length were not placed.
fn cascade(
    network:   &StationNetwork,
    from:      StationId,
    bikes:     &[StationId],
    reach:     Option<f64>,
    capacity:  &[u32],
    occupancy: &mut [u32],
) -> Vec<StationId> {
    let mut placed = Vec::with_capacity(bikes.len());
    for &k in network.nearest_order(from) {
        if placed.len() == bikes.len() {
            break;
        }
        if let Some(r) = reach {
            if network.distance(from, k) > r {
                break;
            }
        }
        let free = (capacity[k.index()] - occupancy[k.index()]) as usize;
        let take = free.min(bikes.len() - placed.len());
        occupancy[k.index()] += take as u32;
        placed.extend(std::iter::repeat_n(k, take));
    }
    placed
}

/// Dock a stranded bike at its source, or at the station nearest to it with
/// a free dock if the source has filled up since the departure.
fn return_to_source(
    network:   &StationNetwork,
    source:    StationId,
    capacity:  &[u32],
    occupancy: &mut [u32],
) -> Option<StationId> {
    if occupancy[source.index()] < capacity[source.index()] {
        occupancy[source.index()] += 1;
        return Some(source);
    }
    cascade(network, source, &[source], None, capacity, occupancy)
        .first()
        .copied()
}
