//! Routing probability matrices.
//!
//! # Base matrix
//!
//! For every ordered pair `(i, j)`, `i ≠ j`, the raw weight is
//! `1 / (distance(i, j) + ε)`; each row is then normalized to sum to 1 and
//! the diagonal is 0.  Nearby stations attract more trips.
//!
//! # Effective matrix
//!
//! Each hour the base is rescaled by `time_factor × weather_factor`:
//!
//! ```text
//! effective[i][j] = base[i][j] · s        (j ≠ i)
//! effective[i][i] = 1 − Σ_{j≠i} effective[i][j]
//! ```
//!
//! The diagonal is the probability that a departing bike ends up back where
//! it started (a round trip), so quiet hours and bad weather shift mass onto
//! it.  When `s` exceeds 1 the diagonal would go negative; [`ScalePolicy`]
//! decides whether to clamp `s` or reject the modifier.

use log::{debug, warn};

use bf_core::{ScalePolicy, StationId};

use crate::{NetworkError, NetworkResult, StationNetwork};

/// Added to every distance so coincident stations get a finite weight.
pub const DISTANCE_EPSILON: f64 = 0.1;

/// Maximum allowed deviation of a row sum from 1.
pub const ROW_TOLERANCE: f64 = 1e-9;

/// A dense row-major `n × n` matrix of routing probabilities.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionMatrix {
    n:    usize,
    data: Vec<f64>,
}

impl TransitionMatrix {
    /// Inverse-distance routing weights, row-normalized, zero diagonal.
    ///
    /// A single-station network has nowhere to route to; its base row is
    /// all zeros and the effective matrix turns it into a pure "stay" row.
    pub fn build_base(network: &StationNetwork) -> Self {
        let n = network.len();
        let rows = map_rows(n, |i| base_row(network, i));
        debug!("base matrix built for {n} stations");
        Self { n, data: rows.concat() }
    }

    /// Rescale the off-diagonal mass by `time_factor × weather_factor` and
    /// recompute each diagonal so every row sums to 1.
    pub fn apply_modifiers(
        &self,
        time_factor:    f64,
        weather_factor: f64,
        policy:         ScalePolicy,
    ) -> NetworkResult<TransitionMatrix> {
        let scale = time_factor * weather_factor;
        if !scale.is_finite() || scale < 0.0 {
            return Err(NetworkError::InvalidScale(scale));
        }

        let n = self.n;
        let rows = map_rows(n, |i| effective_row(self.row(i), i, scale, policy))
            .into_iter()
            .collect::<NetworkResult<Vec<_>>>()
            .inspect_err(|e| warn!("scale {scale:.3} rejected: {e}"))?;

        Ok(Self { n, data: rows.concat() })
    }

    /// Number of stations (rows).
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Routing weights out of station `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Largest `|Σ row − 1|` over all rows.
    pub fn max_row_error(&self) -> f64 {
        (0..self.n)
            .map(|i| (self.row(i).iter().sum::<f64>() - 1.0).abs())
            .fold(0.0, f64::max)
    }

    /// `true` if every row sums to 1 within `tolerance` and no entry is
    /// negative.
    pub fn is_row_stochastic(&self, tolerance: f64) -> bool {
        self.data.iter().all(|&p| p >= 0.0) && self.max_row_error() <= tolerance
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

pub(crate) fn base_row(network: &StationNetwork, i: usize) -> Vec<f64> {
    let dist = network.distances_from(StationId(i as u32));
    let mut row: Vec<f64> = dist
        .iter()
        .enumerate()
        .map(|(j, d)| if i == j { 0.0 } else { 1.0 / (d + DISTANCE_EPSILON) })
        .collect();
    let total: f64 = row.iter().sum();
    if total > 0.0 {
        row.iter_mut().for_each(|w| *w /= total);
    }
    row
}

pub(crate) fn effective_row(
    base:   &[f64],
    i:      usize,
    scale:  f64,
    policy: ScalePolicy,
) -> NetworkResult<Vec<f64>> {
    let off: f64 = base
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(_, w)| w)
        .sum();

    let row_scale = match policy {
        ScalePolicy::Clamp if off > 0.0 => scale.min(1.0 / off),
        ScalePolicy::Clamp => scale,
        ScalePolicy::Reject => {
            let diag = 1.0 - scale * off;
            if diag < -ROW_TOLERANCE {
                return Err(NetworkError::NegativeDiagonal { row: i, value: diag });
            }
            scale
        }
    };

    let mut row: Vec<f64> = base
        .iter()
        .enumerate()
        .map(|(j, w)| if j == i { 0.0 } else { w * row_scale })
        .collect();
    let moved: f64 = row.iter().sum();
    // Anything within tolerance below zero is rounding noise.
    row[i] = (1.0 - moved).max(0.0);
    Ok(row)
}

// ── Row mapping (sequential or Rayon) ─────────────────────────────────────────

#[cfg(not(feature = "parallel"))]
fn map_rows<T, F>(n: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    (0..n).map(f).collect()
}

#[cfg(feature = "parallel")]
fn map_rows<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    use rayon::prelude::*;
    (0..n).into_par_iter().map(f).collect()
}
