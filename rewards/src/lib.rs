//! Reward distributor.
//!
//! `distribute` credits a pending reward and bumps the informational pool
//! counter; `claim` pays the pending amount out of the custodial ledger
//! account and deletes the entry. The pool counter is never debited.

pub mod distributor;
pub mod error;

pub use distributor::RewardDistributor;
pub use error::RewardError;
