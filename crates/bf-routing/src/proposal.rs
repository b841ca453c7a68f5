//! Turning one step's occupancy into a list of proposed moves.

use log::trace;

use bf_core::{SimRng, StationId};
use bf_network::TransitionMatrix;

use crate::{DepartureSampler, DestinationRouter};

/// One bike travelling from `source` to `destination` (never equal).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Move {
    pub source:      StationId,
    pub destination: StationId,
}

/// Everything the routing phase decided for a step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Proposal {
    /// Cross-station moves, grouped by ascending source id.
    pub moves:      Vec<Move>,
    /// Bikes that left their dock, including round trips.
    pub departures: u32,
    /// Departures routed back to their own source.
    pub stayed:     u32,
}

/// Sample departures for every station, then route each departing bike.
///
/// Stations are visited in ascending id order and bikes in departure order,
/// so RNG consumption is fixed for a given occupancy vector.  Empty
/// stations draw nothing.
pub fn propose_moves<R: DestinationRouter + ?Sized>(
    occupancy:      &[u32],
    matrix:         &TransitionMatrix,
    sampler:        &DepartureSampler,
    time_factor:    f64,
    weather_factor: f64,
    router:         &R,
    rng:            &mut SimRng,
) -> Proposal {
    let mut proposal = Proposal::default();

    for (source, &occ) in occupancy.iter().enumerate() {
        let leaving = sampler.sample(occ, time_factor, weather_factor, rng);
        if leaving == 0 {
            continue;
        }
        proposal.departures += leaving;
        trace!("station {source}: {leaving} of {occ} bikes departing");

        let row = matrix.row(source);
        for _ in 0..leaving {
            let dest = router.route(source, row, rng);
            if dest == source || dest >= occupancy.len() {
                proposal.stayed += 1;
            } else {
                proposal.moves.push(Move {
                    source:      StationId(source as u32),
                    destination: StationId(dest as u32),
                });
            }
        }
    }

    proposal
}
