//! Destination routing.
//!
//! # Pluggability
//!
//! The engine asks a [`DestinationRouter`] where each departing bike goes.
//! Two samplers ship with the crate and are selected per step through the
//! [`RoutingStrategy`] tag:
//!
//! | Strategy      | Sampler                                                   |
//! |---------------|-----------------------------------------------------------|
//! | `Categorical` | one weighted draw from the effective transition row       |
//! | `Amplitude`   | per-bit biased coins, `sin²(θ/2)` with θ from bit-masked row mass |
//!
//! Returning the source index means "no move": the bike ends its trip at the
//! station it left.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rand::distributions::WeightedIndex;

use bf_core::SimRng;

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable destination sampler.
///
/// # Contract
///
/// - `row` is the effective transition row of `source` (length = station
///   count, entries ≥ 0).
/// - The result is always a valid index `< row.len()`.
/// - Must be deterministic given the same `rng` state.
pub trait DestinationRouter {
    fn route(&self, source: usize, row: &[f64], rng: &mut SimRng) -> usize;
}

// ── CategoricalRouter ─────────────────────────────────────────────────────────

/// Standard weighted random choice over the row, diagonal included.
///
/// A degenerate row (all zero, negative or NaN weights) routes back to the
/// source.
pub struct CategoricalRouter;

impl DestinationRouter for CategoricalRouter {
    fn route(&self, source: usize, row: &[f64], rng: &mut SimRng) -> usize {
        match WeightedIndex::<f64>::new(row) {
            Ok(dist) => rng.sample(&dist),
            Err(_) => source,
        }
    }
}

// ── AmplitudeRouter ───────────────────────────────────────────────────────────

/// Amplitude-style sampler.
///
/// The destination index is encoded in `⌈log2 n⌉` bits.  For bit `b` the
/// rotation angle is
///
/// ```text
/// θ_b = π · Σ { row[j] : j ≠ source, bit b of j is set }
/// ```
///
/// and the bit reads 1 with probability `sin²(θ_b / 2)`.  The bits are
/// assembled into an integer and reduced modulo `n`.  Destinations carrying
/// more routing mass set their bits more often, so the draw leans towards
/// them without being an exact categorical sample.
///
/// Costs one coin per bit per bike instead of a single weighted draw.
pub struct AmplitudeRouter;

impl AmplitudeRouter {
    /// Number of bits needed to address `n` stations.
    pub fn bit_count(n: usize) -> u32 {
        if n <= 1 { 0 } else { usize::BITS - (n - 1).leading_zeros() }
    }

    /// Probability that bit `b` reads 1 for a bike leaving `source`.
    pub fn bit_bias(source: usize, row: &[f64], bit: u32) -> f64 {
        let mass: f64 = row
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != source && (j >> bit) & 1 == 1)
            .map(|(_, &w)| w.max(0.0))
            .sum();
        let theta = PI * mass.min(1.0);
        (theta / 2.0).sin().powi(2)
    }
}

impl DestinationRouter for AmplitudeRouter {
    fn route(&self, source: usize, row: &[f64], rng: &mut SimRng) -> usize {
        let n = row.len();
        if n <= 1 {
            return source;
        }
        let mut value = 0usize;
        for bit in 0..Self::bit_count(n) {
            if rng.gen_bool(Self::bit_bias(source, row, bit)) {
                value |= 1 << bit;
            }
        }
        value % n
    }
}

// ── RoutingStrategy ───────────────────────────────────────────────────────────

/// Per-step choice of router.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RoutingStrategy {
    #[default]
    Categorical,
    Amplitude,
}

impl RoutingStrategy {
    /// `true` selects the alternate (amplitude) router.
    pub fn from_flag(use_alternate: bool) -> Self {
        if use_alternate { Self::Amplitude } else { Self::Categorical }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Categorical => "categorical",
            Self::Amplitude   => "amplitude",
        }
    }
}

impl DestinationRouter for RoutingStrategy {
    #[inline]
    fn route(&self, source: usize, row: &[f64], rng: &mut SimRng) -> usize {
        match self {
            Self::Categorical => CategoricalRouter.route(source, row, rng),
            Self::Amplitude   => AmplitudeRouter.route(source, row, rng),
        }
    }
}

impl fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "categorical" | "classical" => Ok(Self::Categorical),
            "amplitude" | "quantum"     => Ok(Self::Amplitude),
            other => Err(format!("unknown routing strategy {other:?}")),
        }
    }
}
