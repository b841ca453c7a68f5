//! `bf-network` — stations, geometry, and routing matrices.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`station`] | `Station`, `StationSpec`                                     |
//! | [`network`] | `StationNetwork` (distance table + nearest order), builder   |
//! | [`matrix`]  | `TransitionMatrix`: base construction and time/weather modifiers |
//! | [`layout`]  | Random clustered layouts and initial bike distribution       |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Distance table and matrix rows computed with Rayon.       |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod error;
pub mod layout;
pub mod matrix;
pub mod network;
pub mod station;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use layout::{DISTRICT_CENTRES, distribute_bikes, generate_stations};
pub use matrix::{DISTANCE_EPSILON, ROW_TOLERANCE, TransitionMatrix};
pub use network::{StationNetwork, StationNetworkBuilder};
pub use station::{Station, StationSpec};
