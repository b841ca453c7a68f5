//! The `BikeSim` engine and its step loop.

use log::{debug, info, warn};

use bf_core::{HourOfDay, SimClock, SimConfig, SimRng, Weather};
use bf_network::{StationNetwork, StationSpec, TransitionMatrix};
use bf_routing::{DepartureSampler, RoutingStrategy, propose_moves};

use crate::settlement::settle;
use crate::{NoopObserver, SimBuilder, SimObserver, SimResult, Snapshot, StationView, StepReport};

// ── BikeSim ───────────────────────────────────────────────────────────────────

/// One simulation instance: station network, clock, matrices, and RNG.
///
/// Every operation is synchronous.  A failed operation leaves station
/// occupancy, the clock, and the effective matrix as they were.  One step:
///
/// 1. **Departures**: a binomial draw per station with
///    `p = departure_scale × time_factor × weather_factor`.
/// 2. **Routing**: each departing bike picks a destination from its source's
///    row of the effective matrix, via the chosen [`RoutingStrategy`].
/// 3. **Settlement**: moves are committed against capacity, overflow
///    cascading to nearby stations (see [`settle`]).
///
/// Create via [`SimBuilder`] or [`BikeSim::initialize`].
pub struct BikeSim {
    pub(crate) config:            SimConfig,
    pub(crate) clock:             SimClock,
    pub(crate) network:           StationNetwork,
    /// Distance-derived routing weights; fixed for the life of the network.
    pub(crate) base:              TransitionMatrix,
    /// `base` rescaled for the current hour and weather.
    pub(crate) effective:         TransitionMatrix,
    pub(crate) sampler:           DepartureSampler,
    pub(crate) rng:               SimRng,
    pub(crate) step:              u64,
    pub(crate) dropped:           u64,
    pub(crate) initial_total:     u64,
    pub(crate) movement:          u32,
    pub(crate) last_report:       Option<StepReport>,
    /// Inputs kept so `reset` can rebuild the identical starting state.
    pub(crate) layout:            Vec<StationSpec>,
    pub(crate) initial_occupancy: Vec<u32>,
}

impl BikeSim {
    /// Generated layout with `station_count` stations and `total_bikes` bikes;
    /// every other setting at its default.
    pub fn initialize(station_count: usize, total_bikes: u32, seed: u64) -> SimResult<Self> {
        SimBuilder::new(SimConfig::with_counts(station_count, total_bikes, seed)).build()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn network(&self) -> &StationNetwork {
        &self.network
    }

    pub fn base_matrix(&self) -> &TransitionMatrix {
        &self.base
    }

    pub fn effective_matrix(&self) -> &TransitionMatrix {
        &self.effective
    }

    #[inline]
    pub fn hour(&self) -> HourOfDay {
        self.clock.hour
    }

    #[inline]
    pub fn weather(&self) -> Weather {
        self.clock.weather
    }

    /// Steps executed since initialization (or the last reset).
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Bikes removed under `OverflowPolicy::Drop` so far.
    #[inline]
    pub fn dropped_bikes(&self) -> u64 {
        self.dropped
    }

    /// Bike population at initialization.  Always equals
    /// `network().total_occupancy() + dropped_bikes()`.
    #[inline]
    pub fn initial_total(&self) -> u64 {
        self.initial_total
    }

    pub fn last_report(&self) -> Option<&StepReport> {
        self.last_report.as_ref()
    }

    // ── Step ──────────────────────────────────────────────────────────────

    /// Run one step with the current effective matrix and return the
    /// post-step snapshot.
    pub fn step(&mut self, strategy: RoutingStrategy) -> SimResult<Snapshot> {
        self.step_with(strategy, &mut NoopObserver)
    }

    pub fn step_with<O: SimObserver>(
        &mut self,
        strategy: RoutingStrategy,
        observer: &mut O,
    ) -> SimResult<Snapshot> {
        let report = self.run_step(strategy, observer)?;
        let snapshot = self.snapshot();
        observer.on_step_end(&report, &snapshot);
        Ok(snapshot)
    }

    fn run_step<O: SimObserver>(
        &mut self,
        strategy: RoutingStrategy,
        observer: &mut O,
    ) -> SimResult<StepReport> {
        let step = self.step + 1;
        let hour = self.clock.hour;
        observer.on_step_start(step, hour);

        let occupancy = self.network.occupancy();
        let proposal = propose_moves(
            &occupancy,
            &self.effective,
            &self.sampler,
            self.clock.time_factor(),
            self.clock.weather_factor(),
            &strategy,
            &mut self.rng,
        );
        let settlement = settle(
            &self.network,
            &proposal.moves,
            self.config.overflow_policy,
            self.config.max_cascade_distance,
        )?;
        self.network.commit_occupancy(&settlement.occupancy)?;

        let report = StepReport {
            step,
            hour,
            weather: self.clock.weather,
            strategy,
            departures: proposal.departures,
            stayed: proposal.stayed,
            settlement: settlement.report,
        };
        self.step = step;
        self.dropped += report.settlement.dropped as u64;
        self.movement = report.settlement.moved;

        debug!(
            "step {step} at {hour} ({strategy}): {} departures, {} moved, {} redirected, {} unresolved",
            report.departures,
            report.settlement.moved,
            report.settlement.redirected,
            report.settlement.unresolved
        );

        self.last_report = Some(report.clone());
        Ok(report)
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    /// Move the clock forward `hours` hours, one hour at a time.
    pub fn advance_time(&mut self, hours: u32) -> SimResult<Snapshot> {
        self.advance_with(hours, &mut NoopObserver)
    }

    /// As [`advance_time`](Self::advance_time), calling `on_hour` at every
    /// hour boundary.  If a matrix recomputation fails the clock and matrix
    /// are rolled back to where they were before the call.
    pub fn advance_with<O: SimObserver>(
        &mut self,
        hours: u32,
        observer: &mut O,
    ) -> SimResult<Snapshot> {
        let saved_hour = self.clock.hour;
        let saved_matrix = self.effective.clone();

        for _ in 0..hours {
            self.clock.advance();
            if let Err(e) = self.refresh_matrix() {
                self.clock.hour = saved_hour;
                self.effective = saved_matrix;
                return Err(e);
            }
            observer.on_hour(self.clock.hour);
        }

        self.movement = 0;
        Ok(self.snapshot())
    }

    /// Jump straight to `hour` and recompute the effective matrix.
    pub fn set_hour(&mut self, hour: u8) -> SimResult<Snapshot> {
        let hour = HourOfDay::new(hour)?;
        let mut clock = self.clock.clone();
        clock.hour = hour;
        self.swap_clock(clock)?;
        Ok(self.snapshot())
    }

    /// Parse `condition` and switch to that weather.
    ///
    /// Unknown conditions fail with `InvalidWeather` and leave the engine
    /// untouched.
    pub fn set_weather(&mut self, condition: &str) -> SimResult<Snapshot> {
        let weather: Weather = condition.parse().inspect_err(|e| {
            warn!("weather change rejected: {e}");
        })?;
        self.set_weather_condition(weather)
    }

    pub fn set_weather_condition(&mut self, weather: Weather) -> SimResult<Snapshot> {
        let mut clock = self.clock.clone();
        clock.weather = weather;
        self.swap_clock(clock)?;
        info!("weather is now {weather} (factor {})", weather.factor());
        Ok(self.snapshot())
    }

    // ── Day loop ──────────────────────────────────────────────────────────

    /// 24 `step` + `advance(1)` pairs.  Snapshot `k` is taken after the
    /// `k`-th advance, so its hour is `start + k + 1`.  The clock returns to
    /// its starting hour afterwards; occupancy changes are kept.
    pub fn simulate_day(&mut self, strategy: RoutingStrategy) -> SimResult<Vec<Snapshot>> {
        self.simulate_day_with(strategy, &mut NoopObserver)
    }

    pub fn simulate_day_with<O: SimObserver>(
        &mut self,
        strategy: RoutingStrategy,
        observer: &mut O,
    ) -> SimResult<Vec<Snapshot>> {
        let start = self.clock.hour;
        let result = self.run_day(strategy, observer);

        let mut clock = self.clock.clone();
        clock.hour = start;
        self.swap_clock(clock)?;

        let snapshots = result?;
        info!(
            "day from {start} complete: {} bikes docked, {} dropped",
            self.network.total_occupancy(),
            self.dropped
        );
        observer.on_day_end(&snapshots);
        Ok(snapshots)
    }

    fn run_day<O: SimObserver>(
        &mut self,
        strategy: RoutingStrategy,
        observer: &mut O,
    ) -> SimResult<Vec<Snapshot>> {
        let mut snapshots = Vec::with_capacity(HourOfDay::HOURS_PER_DAY as usize);
        for _ in 0..HourOfDay::HOURS_PER_DAY {
            let report = self.run_step(strategy, observer)?;
            let mut snapshot = self.advance_with(1, observer)?;
            snapshot.movement = report.settlement.moved;
            self.movement = report.settlement.moved;
            observer.on_step_end(&report, &snapshot);
            snapshots.push(snapshot);
        }
        Ok(snapshots)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Rebuild the starting state: same layout, same initial occupancy, RNG
    /// reseeded, clock back at the configured start.
    pub fn reset(&mut self) -> SimResult<Snapshot> {
        let fresh = SimBuilder::new(self.config.clone())
            .stations(self.layout.clone())
            .initial_occupancy(self.initial_occupancy.clone())
            .build()?;
        *self = fresh;
        Ok(self.snapshot())
    }

    /// Replace the whole simulation with one built from `config` (new
    /// generated layout).  On error the current simulation is kept.
    pub fn configure(&mut self, config: SimConfig) -> SimResult<Snapshot> {
        *self = SimBuilder::new(config).build()?;
        Ok(self.snapshot())
    }

    // ── Snapshot ──────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stations:      self.network.stations().iter().map(StationView::from).collect(),
            hour:          self.clock.hour,
            weather:       self.clock.weather,
            demand_factor: self.clock.time_factor(),
            step:          self.step,
            total_bikes:   self.network.total_occupancy(),
            dropped_bikes: self.dropped,
            movement:      self.movement,
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn refresh_matrix(&mut self) -> SimResult<()> {
        self.effective = self.base.apply_modifiers(
            self.clock.time_factor(),
            self.clock.weather_factor(),
            self.config.scale_policy,
        )?;
        Ok(())
    }

    /// Compute the matrix for `clock` first; only install both if that works.
    fn swap_clock(&mut self, clock: SimClock) -> SimResult<()> {
        let effective = self.base.apply_modifiers(
            clock.time_factor(),
            clock.weather_factor(),
            self.config.scale_policy,
        )?;
        self.clock = clock;
        self.effective = effective;
        self.movement = 0;
        Ok(())
    }
}

impl std::fmt::Debug for BikeSim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BikeSim")
            .field("stations", &self.network.len())
            .field("bikes", &self.network.total_occupancy())
            .field("clock", &self.clock)
            .field("step", &self.step)
            .finish()
    }
}
