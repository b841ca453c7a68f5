//! Engine observer trait for progress reporting and data collection.

use bf_core::HourOfDay;

use crate::{Snapshot, StepReport};

/// Callbacks invoked by the `*_with` methods of [`BikeSim`][crate::BikeSim].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — movement printer
///
/// ```rust,ignore
/// struct MovementPrinter;
///
/// impl SimObserver for MovementPrinter {
///     fn on_step_end(&mut self, report: &StepReport, _snapshot: &Snapshot) {
///         println!("{}: {} bikes moved", report.hour, report.moved());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before a step samples departures.
    fn on_step_start(&mut self, _step: u64, _hour: HourOfDay) {}

    /// Called after a step has been committed.
    fn on_step_end(&mut self, _report: &StepReport, _snapshot: &Snapshot) {}

    /// Called each time the clock moves to a new hour.
    fn on_hour(&mut self, _hour: HourOfDay) {}

    /// Called once after `simulate_day` has collected its 24 snapshots.
    fn on_day_end(&mut self, _snapshots: &[Snapshot]) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
