//! Strongly typed station identifier.
//!
//! Station ids are dense and 0-based: `StationId(i)` is the station stored at
//! index `i` of the network.  The inner integer is `pub` for direct indexing,
//! but callers should prefer [`StationId::index`] for clarity.

use std::fmt;

/// Index of a station in the network.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StationId(pub u32);

impl StationId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl From<StationId> for usize {
    #[inline(always)]
    fn from(id: StationId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for StationId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<StationId, Self::Error> {
        u32::try_from(n).map(StationId)
    }
}
