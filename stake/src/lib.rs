//! Stake manager.
//!
//! Staking moves tokens out of the staker's ledger balance into the custodial
//! account and records them against the staker. Every stake resets the lock
//! window to `now + LOCK_PERIOD`; tokens can only be withdrawn once the lock
//! height is reached. Staked amounts are the voting power used by governance.

pub mod engine;
pub mod error;
pub mod record;

pub use engine::StakeManager;
pub use error::StakeError;
pub use record::StakeRecord;
