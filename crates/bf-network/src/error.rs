//! Network-subsystem error type.

use thiserror::Error;

use bf_core::{CoreError, StationId};

/// Errors produced by `bf-network`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("a network needs at least one station")]
    EmptyNetwork,

    #[error("station {0} has zero capacity")]
    ZeroCapacity(StationId),

    #[error("station {0} has a non-finite location")]
    NonFiniteLocation(StationId),

    #[error("station {station} holds {occupancy} bikes but only has {capacity} docks")]
    OccupancyExceedsCapacity {
        station:   StationId,
        occupancy: u32,
        capacity:  u32,
    },

    #[error("{bikes} bikes do not fit in an aggregate capacity of {capacity}")]
    BikesExceedCapacity { bikes: u64, capacity: u64 },

    #[error("{what} length {got} does not match station count {expected}")]
    LengthMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("row {row} would get a negative stay probability ({value})")]
    NegativeDiagonal { row: usize, value: f64 },

    #[error("routing scale must be a non-negative number, got {0}")]
    InvalidScale(f64),

    #[error("layout generation failed: {0}")]
    Layout(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
