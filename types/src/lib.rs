//! Fundamental types for the stakegov state machine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identifiers, heights, the fixed protocol constants, amount formatting,
//! and the numeric error code table returned to callers.

pub mod account;
pub mod amount;
pub mod error;
pub mod height;
pub mod params;

pub use account::AccountId;
pub use amount::format_amount;
pub use error::ErrorCode;
pub use height::Height;
