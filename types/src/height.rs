//! Height type used for all time-based gating.
//!
//! Heights are supplied by the caller (a block height or logical clock) and
//! are expected to be monotonic. The state machine never reads a wall clock.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A monotonically increasing height.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Height(u64);

impl Height {
    pub const ZERO: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The height `units` after this one, clamped at `u64::MAX`.
    pub fn saturating_add(self, units: u64) -> Self {
        Self(self.0.saturating_add(units))
    }

    /// Whether `now` has reached this height.
    pub fn reached_by(&self, now: Height) -> bool {
        now.0 >= self.0
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for Height {
    fn from(height: u64) -> Self {
        Self(height)
    }
}
