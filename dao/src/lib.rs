//! The stakegov state machine.
//!
//! [`Dao`] owns every piece of state: the ledger, stake records, proposals,
//! rewards, the admin identity and the pause flag. Each operation takes the
//! caller identity and the current height from outside, runs its
//! authorization and precondition checks, then mutates. A failed operation
//! leaves the state exactly as it was.
//!
//! Operations are assumed to be linearized by the caller; [`OperationLog`]
//! replays such a sequence.

pub mod error;
pub mod genesis;
pub mod log;
pub mod operation;
pub mod state;

pub use error::DaoError;
pub use genesis::GenesisConfig;
pub use log::{LogError, OperationLog};
pub use operation::{Entry, Operation, Receipt};
pub use state::Dao;
