//! Weather conditions and their effect on rental demand.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// The fixed set of weather conditions the simulator understands.
///
/// Each condition maps to a positive multiplier applied to both departure
/// probability and off-diagonal routing mass.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Weather {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
}

impl Weather {
    /// Every condition, in declaration order.
    pub const ALL: [Weather; 5] = [
        Weather::Sunny,
        Weather::Cloudy,
        Weather::Rainy,
        Weather::Snowy,
        Weather::Stormy,
    ];

    /// Demand multiplier for this condition.
    pub fn factor(self) -> f64 {
        match self {
            Weather::Sunny  => 1.2,
            Weather::Cloudy => 1.0,
            Weather::Rainy  => 0.6,
            Weather::Snowy  => 0.3,
            Weather::Stormy => 0.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Sunny  => "sunny",
            Weather::Cloudy => "cloudy",
            Weather::Rainy  => "rainy",
            Weather::Snowy  => "snowy",
            Weather::Stormy => "stormy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Weather::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::InvalidWeather(s.to_owned()))
    }
}
