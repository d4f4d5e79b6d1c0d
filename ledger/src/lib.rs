//! Fungible token ledger.
//!
//! Tracks one balance per account plus the total minted supply. The ledger
//! enforces conservation: `transfer` moves value, only `mint` creates it, and
//! nothing destroys it. Staked and reward funds live in the custodial
//! account ([`stakegov_types::AccountId::custody`]) like any other balance.

pub mod allowance;
pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::Ledger;
