use thiserror::Error;

use bf_core::{CoreError, StationId};
use bf_network::NetworkError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("station {station} cannot send {departures} bikes, it only holds {occupancy}")]
    DeparturesExceedOccupancy {
        station:    StationId,
        departures: u32,
        occupancy:  u32,
    },

    #[error("move references station {0}, which is not in the network")]
    UnknownStation(StationId),

    #[error("simulation lock poisoned by a panicking writer")]
    Poisoned,
}

impl SimError {
    /// `true` for an unrecognized weather condition (state was left unchanged).
    pub fn is_invalid_weather(&self) -> bool {
        matches!(self, SimError::Core(CoreError::InvalidWeather(_)))
    }

    /// `true` for errors that mean the run could not be set up.
    pub fn is_invalid_configuration(&self) -> bool {
        match self {
            SimError::Core(CoreError::InvalidConfiguration(_)) => true,
            SimError::Network(NetworkError::NegativeDiagonal { .. }) => false,
            SimError::Network(_) => true,
            _ => false,
        }
    }

    /// `true` when a generated layout has fewer docks than bikes to place.
    pub fn is_capacity_shortfall(&self) -> bool {
        matches!(self, SimError::Network(NetworkError::BikesExceedCapacity { .. }))
    }
}

pub type SimResult<T> = Result<T, SimError>;
