//! Per-station departure sampling.

use rand_distr::Binomial;

use bf_core::SimRng;

/// Default fraction of `time × weather` demand that becomes departures.
pub const DEFAULT_DEPARTURE_SCALE: f64 = 0.3;

/// Draws how many bikes leave a station during one step.
///
/// Each docked bike leaves independently with probability
/// `time_factor × weather_factor × scale` (clamped to `[0, 1]`), so the count
/// is `Binomial(occupancy, p)` and can never exceed the occupancy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DepartureSampler {
    scale: f64,
}

impl DepartureSampler {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Per-bike departure probability.
    pub fn probability(&self, time_factor: f64, weather_factor: f64) -> f64 {
        let p = time_factor * weather_factor * self.scale;
        if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
    }

    /// Number of bikes leaving a station that holds `occupancy` bikes.
    ///
    /// Returns 0 without touching `rng` when the station is empty or the
    /// probability is zero.
    pub fn sample(
        &self,
        occupancy:      u32,
        time_factor:    f64,
        weather_factor: f64,
        rng:            &mut SimRng,
    ) -> u32 {
        let p = self.probability(time_factor, weather_factor);
        if occupancy == 0 || p == 0.0 {
            return 0;
        }
        match Binomial::new(occupancy as u64, p) {
            Ok(dist) => rng.sample(&dist).min(occupancy as u64) as u32,
            Err(_) => 0,
        }
    }
}

impl Default for DepartureSampler {
    fn default() -> Self {
        Self::new(DEFAULT_DEPARTURE_SCALE)
    }
}
