//! Simulation time model.
//!
//! # Design
//!
//! The simulator runs on a cyclic 24-hour clock.  One step of the engine is
//! one hour of simulated time, so the only state needed is the hour of day
//! plus the conditions that modulate demand during that hour (weather and the
//! time-of-day demand curve).
//!
//! `SimClock` is the single source of both scalars the engine multiplies
//! together: `time_factor × weather_factor`.

use std::fmt;

use crate::{CoreError, CoreResult, DemandCurve, Weather};

// ── HourOfDay ────────────────────────────────────────────────────────────────

/// An hour of the day in `[0, 23]`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct HourOfDay(u8);

impl HourOfDay {
    pub const MIDNIGHT: HourOfDay = HourOfDay(0);
    pub const HOURS_PER_DAY: u8 = 24;

    /// Fails with `InvalidConfiguration` if `hour > 23`.
    pub fn new(hour: u8) -> CoreResult<Self> {
        if hour < Self::HOURS_PER_DAY {
            Ok(HourOfDay(hour))
        } else {
            Err(CoreError::InvalidConfiguration(format!(
                "hour of day must be in [0, 23], got {hour}"
            )))
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The following hour, wrapping 23 → 0.
    #[inline]
    pub fn next(self) -> HourOfDay {
        HourOfDay((self.0 + 1) % Self::HOURS_PER_DAY)
    }

    /// The hour `n` hours later, wrapping modulo 24.
    #[inline]
    pub fn offset(self, n: u64) -> HourOfDay {
        HourOfDay(((self.0 as u64 + n) % Self::HOURS_PER_DAY as u64) as u8)
    }
}

impl TryFrom<u8> for HourOfDay {
    type Error = CoreError;
    fn try_from(h: u8) -> Result<Self, Self::Error> {
        HourOfDay::new(h)
    }
}

impl From<HourOfDay> for u8 {
    fn from(h: HourOfDay) -> u8 {
        h.0
    }
}

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Hour of day plus the conditions that scale demand at that hour.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub hour:    HourOfDay,
    pub weather: Weather,
    pub demand:  DemandCurve,
}

impl SimClock {
    pub fn new(hour: HourOfDay, weather: Weather, demand: DemandCurve) -> Self {
        Self { hour, weather, demand }
    }

    /// Advance the clock by exactly one hour.
    #[inline]
    pub fn advance(&mut self) {
        self.hour = self.hour.next();
    }

    /// Time-of-day demand factor for the current hour.
    #[inline]
    pub fn time_factor(&self) -> f64 {
        self.demand.factor(self.hour)
    }

    /// Multiplier for the current weather.
    #[inline]
    pub fn weather_factor(&self) -> f64 {
        self.weather.factor()
    }

    /// `time_factor × weather_factor`.
    #[inline]
    pub fn combined_factor(&self) -> f64 {
        self.time_factor() * self.weather_factor()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hour, self.weather)
    }
}
