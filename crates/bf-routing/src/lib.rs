//! `bf-routing` — who leaves, and where they go.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`departures`] | `DepartureSampler` (binomial departures per station)      |
//! | [`router`]     | `DestinationRouter` trait, `CategoricalRouter`, `AmplitudeRouter`, `RoutingStrategy` |
//! | [`proposal`]   | `Move`, `Proposal`, `propose_moves`                        |
//!
//! Both routers draw from the caller's [`SimRng`][bf_core::SimRng], so a
//! proposal is fully determined by the seed and the pre-step occupancy.

pub mod departures;
pub mod proposal;
pub mod router;


pub use departures::{DEFAULT_DEPARTURE_SCALE, DepartureSampler};
pub use proposal::{Move, Proposal, propose_moves};
pub use router::{AmplitudeRouter, CategoricalRouter, DestinationRouter, RoutingStrategy};
