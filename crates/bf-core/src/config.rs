//! Top-level simulation configuration.
//!
//! Typically loaded from a JSON file by the application and handed to the
//! simulation builder.  Every field has a default, so a partial JSON document
//! (e.g. `{"station_count": 20, "total_bikes": 250}`) is a valid config.

use crate::{CoreError, CoreResult, DemandCurve, HourOfDay, Weather};

// ── Policies ──────────────────────────────────────────────────────────────────

/// What to do when `time_factor × weather_factor` would push the off-diagonal
/// routing mass of a row above 1 (making the "stay" probability negative).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScalePolicy {
    /// Cap the scale per row so the diagonal bottoms out at 0.
    #[default]
    Clamp,
    /// Refuse the modifier; the caller keeps its previous matrix.
    Reject,
}

/// What happens to overflow bikes that find no dock within reach.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverflowPolicy {
    /// The bike never left: it goes back to its source station.
    /// Total occupancy is conserved exactly.
    #[default]
    ReturnToSource,
    /// The bike leaves the system and is counted as dropped.
    Drop,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Every tunable of a simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Stations to generate when the caller does not supply a layout.
    pub station_count: usize,

    /// Bike population.  Conserved for the lifetime of the run (up to
    /// `OverflowPolicy::Drop`).
    pub total_bikes: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Hour of day at initialization, `[0, 23]`.
    pub start_hour: u8,

    /// Weather at initialization.
    pub weather: Weather,

    /// Fraction of `time × weather` demand that turns into departures.
    pub departure_scale: f64,

    /// Inclusive lower bound of generated station capacities.
    pub capacity_min: u32,

    /// Exclusive upper bound of generated station capacities.
    pub capacity_max: u32,

    /// Side length of the square map; generated locations lie in
    /// `[0, map_size]²`.
    pub map_size: f64,

    /// Standard deviation of station scatter around district centres.
    pub cluster_spread: f64,

    pub scale_policy: ScalePolicy,

    pub overflow_policy: OverflowPolicy,

    /// Overflow only cascades to stations within this distance of the full
    /// destination.  `None` means any station.
    pub max_cascade_distance: Option<f64>,

    /// Time-of-day demand table.
    pub demand: DemandCurve,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            station_count:        10,
            total_bikes:          100,
            seed:                 42,
            start_hour:           8,
            weather:              Weather::Sunny,
            departure_scale:      0.3,
            capacity_min:         5,
            capacity_max:         20,
            map_size:             10.0,
            cluster_spread:       1.0,
            scale_policy:         ScalePolicy::Clamp,
            overflow_policy:      OverflowPolicy::ReturnToSource,
            max_cascade_distance: None,
            demand:               DemandCurve::default(),
        }
    }
}

impl SimConfig {
    /// Default config with the three values callers most often set.
    pub fn with_counts(station_count: usize, total_bikes: u32, seed: u64) -> Self {
        Self {
            station_count,
            total_bikes,
            seed,
            ..Self::default()
        }
    }

    /// Check every field.  Returns the first problem found.
    ///
    /// Aggregate capacity is checked later, once the layout is known.
    pub fn validate(&self) -> CoreResult<()> {
        let bad = |msg: String| Err(CoreError::InvalidConfiguration(msg));

        if self.station_count == 0 {
            return bad("station_count must be positive".into());
        }
        if self.total_bikes == 0 {
            return bad("total_bikes must be positive".into());
        }
        HourOfDay::new(self.start_hour)?;
        if self.capacity_min == 0 {
            return bad("capacity_min must be positive".into());
        }
        if self.capacity_min >= self.capacity_max {
            return bad(format!(
                "capacity range [{}, {}) is empty",
                self.capacity_min, self.capacity_max
            ));
        }
        if !self.departure_scale.is_finite() || self.departure_scale < 0.0 {
            return bad(format!(
                "departure_scale must be a non-negative number, got {}",
                self.departure_scale
            ));
        }
        if !self.map_size.is_finite() || self.map_size <= 0.0 {
            return bad(format!("map_size must be positive, got {}", self.map_size));
        }
        if !self.cluster_spread.is_finite() || self.cluster_spread < 0.0 {
            return bad(format!(
                "cluster_spread must be non-negative, got {}",
                self.cluster_spread
            ));
        }
        if let Some(r) = self.max_cascade_distance {
            if !r.is_finite() || r < 0.0 {
                return bad(format!("max_cascade_distance must be non-negative, got {r}"));
            }
        }
        Ok(())
    }

    /// The validated start hour.
    pub fn start_hour(&self) -> CoreResult<HourOfDay> {
        HourOfDay::new(self.start_hour)
    }
}
