//! Planar map coordinates.
//!
//! Stations live on an abstract square map (default side 10.0), so distances
//! are plain Euclidean rather than great-circle.  `f64` keeps the inverse
//! distance weights of nearly coincident stations well conditioned.

/// A position on the simulation map.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Clamp both coordinates into `[0, extent]`.
    #[inline]
    pub fn clamp_to(self, extent: f64) -> Point {
        Point {
            x: self.x.clamp(0.0, extent),
            y: self.y.clamp(0.0, extent),
        }
    }

    /// `true` if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
