//! `bf-core` — foundational types for the `bikeflow` station-network simulator.
//!
//! This crate is a dependency of every other `bf-*` crate.  It has no `bf-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `StationId`                                             |
//! | [`geo`]       | `Point`, Euclidean distance                             |
//! | [`weather`]   | `Weather` enum and its demand multipliers               |
//! | [`demand`]    | `DemandCurve` (24-entry time-of-day table)              |
//! | [`time`]      | `HourOfDay`, `SimClock`                                 |
//! | [`rng`]       | `SimRng` (seedable, single owner)                       |
//! | [`config`]    | `SimConfig`, `ScalePolicy`, `OverflowPolicy`            |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod demand;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod weather;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{OverflowPolicy, ScalePolicy, SimConfig};
pub use demand::DemandCurve;
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::StationId;
pub use rng::SimRng;
pub use time::{HourOfDay, SimClock};
pub use weather::Weather;
