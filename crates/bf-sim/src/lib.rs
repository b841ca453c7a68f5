//! `bf-sim` — the step engine for the bikeflow station-network simulator.
//!
//! # One step
//!
//! ```text
//! ① Departures — binomial draw per station, p = scale × time × weather.
//! ② Routing    — each departing bike picks a destination from its source's
//!                row of the effective matrix (categorical or amplitude).
//! ③ Settlement — departures leave, destinations accept in ascending id
//!                order until full, overflow cascades to the nearest station
//!                with a free dock, anything left follows OverflowPolicy.
//! ④ Commit     — occupancy is validated and written in one go.
//! ```
//!
//! Advancing the clock or changing the weather recomputes the effective
//! matrix; `simulate_day` runs 24 step + advance pairs and restores the hour.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`builder`]    | `SimBuilder`                                          |
//! | [`sim`]        | `BikeSim`: step, clock, day loop, lifecycle           |
//! | [`settlement`] | `settle`, `Settlement`, `SettlementReport`            |
//! | [`snapshot`]   | `Snapshot`, `StationView`, `StepReport`               |
//! | [`observer`]   | `SimObserver`, `NoopObserver`                         |
//! | [`handle`]     | `SimHandle`: lock-guarded engine for shared use       |
//! | [`error`]      | `SimError`, `SimResult<T>`                            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bf_core::SimConfig;
//! use bf_routing::RoutingStrategy;
//! use bf_sim::SimBuilder;
//!
//! let mut sim = SimBuilder::new(SimConfig::with_counts(10, 100, 42)).build()?;
//! sim.set_weather("rainy")?;
//! let day = sim.simulate_day(RoutingStrategy::Categorical)?;
//! assert_eq!(day.len(), 24);
//! ```

pub mod builder;
pub mod error;
pub mod handle;
pub mod observer;
pub mod settlement;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use handle::SimHandle;
pub use observer::{NoopObserver, SimObserver};
pub use settlement::{Settlement, SettlementReport, settle};
pub use sim::BikeSim;
pub use snapshot::{Snapshot, StationView, StepReport};
