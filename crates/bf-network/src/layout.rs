//! Random station layouts and initial bike placement.
//!
//! Generated stations cluster around four district centres (the quarter
//! points of the map), one district per station in round-robin order, with a
//! normally distributed scatter clamped to the map edges.

use rand_distr::Normal;

use bf_core::{Point, SimConfig, SimRng};

use crate::{NetworkError, NetworkResult, StationSpec};

/// District centres as fractions of the map side.
pub const DISTRICT_CENTRES: [(f64, f64); 4] = [(0.25, 0.25), (0.75, 0.75), (0.25, 0.75), (0.75, 0.25)];

/// Generate `config.station_count` stations.
///
/// Capacities are uniform in `[capacity_min, capacity_max)`.
pub fn generate_stations(config: &SimConfig, rng: &mut SimRng) -> NetworkResult<Vec<StationSpec>> {
    config.validate()?;

    let scatter = Normal::new(0.0, config.cluster_spread)
        .map_err(|e| NetworkError::Layout(e.to_string()))?;

    let specs = (0..config.station_count)
        .map(|i| {
            let capacity = rng.gen_range(config.capacity_min..config.capacity_max);
            let (cx, cy) = DISTRICT_CENTRES[i % DISTRICT_CENTRES.len()];
            let location = Point::new(
                cx * config.map_size + rng.sample(&scatter),
                cy * config.map_size + rng.sample(&scatter),
            )
            .clamp_to(config.map_size);
            StationSpec { location, capacity }
        })
        .collect();

    Ok(specs)
}

/// Spread `total` bikes over stations with the given capacities.
///
/// Walks stations in id order drawing a uniform count in
/// `[0, min(remaining, capacity)]` for all but the last station, puts the
/// remainder on the last one, then tops up any station with spare docks (in
/// id order) with whatever still did not fit.
pub fn distribute_bikes(capacities: &[u32], total: u32, rng: &mut SimRng) -> NetworkResult<Vec<u32>> {
    let Some((last, head)) = capacities.split_last() else {
        return Err(NetworkError::EmptyNetwork);
    };

    let aggregate: u64 = capacities.iter().map(|&c| c as u64).sum();
    if total as u64 > aggregate {
        return Err(NetworkError::BikesExceedCapacity {
            bikes:    total as u64,
            capacity: aggregate,
        });
    }

    let mut occupancy = Vec::with_capacity(capacities.len());
    let mut remaining = total;

    for &cap in head {
        let max = remaining.min(cap);
        let bikes = if max > 0 { rng.gen_range(0..=max) } else { 0 };
        occupancy.push(bikes);
        remaining -= bikes;
    }

    let on_last = remaining.min(*last);
    occupancy.push(on_last);
    remaining -= on_last;

    for (occ, &cap) in occupancy.iter_mut().zip(capacities) {
        if remaining == 0 {
            break;
        }
        let add = remaining.min(cap - *occ);
        *occ += add;
        remaining -= add;
    }

    debug_assert_eq!(remaining, 0);
    Ok(occupancy)
}
