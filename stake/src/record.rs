//! Per-account stake record.

use serde::{Deserialize, Serialize};
use stakegov_types::Height;

/// Tokens an account has locked, and the height from which they may be withdrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecord {
    pub amount: u128,
    pub lock_until: Height,
}

impl StakeRecord {
    /// Whether the lock window has elapsed at `now`.
    pub fn is_unlocked(&self, now: Height) -> bool {
        self.lock_until.reached_by(now)
    }
}
