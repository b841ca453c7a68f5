//! Time-of-day demand curve.

use crate::{CoreError, CoreResult, HourOfDay};

/// Hourly rental demand, hour 0 through hour 23.
///
/// The standard curve peaks at the 08:00 and 17:00 commutes and bottoms out
/// at 03:00.
const STANDARD: [f64; 24] = [
    0.1, 0.05, 0.02, 0.01, 0.02, 0.1, // 00–05
    0.3, 0.6, 0.9, 0.7, 0.5, 0.5,     // 06–11
    0.6, 0.5, 0.4, 0.5, 0.7, 0.9,     // 12–17
    0.8, 0.6, 0.5, 0.4, 0.3, 0.2,     // 18–23
];

/// A 24-entry table of demand factors, each in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct DemandCurve([f64; 24]);

impl DemandCurve {
    /// Build a curve from explicit hourly values.
    ///
    /// Fails if any value is non-finite or outside `[0, 1]`.
    pub fn new(values: [f64; 24]) -> CoreResult<Self> {
        for (hour, v) in values.iter().enumerate() {
            if !v.is_finite() || !(0.0..=1.0).contains(v) {
                return Err(CoreError::InvalidConfiguration(format!(
                    "demand factor for hour {hour} must be in [0, 1], got {v}"
                )));
            }
        }
        Ok(Self(values))
    }

    /// The time-of-day factor for `hour`.
    #[inline]
    pub fn factor(&self, hour: HourOfDay) -> f64 {
        self.0[hour.index()]
    }

    pub fn values(&self) -> &[f64; 24] {
        &self.0
    }
}

impl Default for DemandCurve {
    fn default() -> Self {
        Self(STANDARD)
    }
}

impl TryFrom<Vec<f64>> for DemandCurve {
    type Error = CoreError;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        let len = v.len();
        let values: [f64; 24] = v.try_into().map_err(|_| {
            CoreError::InvalidConfiguration(format!(
                "demand curve needs 24 hourly values, got {len}"
            ))
        })?;
        DemandCurve::new(values)
    }
}

impl From<DemandCurve> for Vec<f64> {
    fn from(c: DemandCurve) -> Vec<f64> {
        c.0.to_vec()
    }
}
