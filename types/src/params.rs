//! Fixed protocol constants.
//!
//! None of these are runtime-settable. Amounts are in smallest units
//! (fixed point with [`DECIMALS`] fractional digits), durations in height units.

/// Number of fractional digits in a token amount.
pub const DECIMALS: u32 = 6;

/// Smallest units per whole token.
pub const UNIT: u128 = 10u128.pow(DECIMALS);

/// Upper bound on total supply, enforced by `mint`.
pub const MAX_SUPPLY: u128 = 1_000_000_000 * UNIT;

/// Percentage of total supply that must have voted for a proposal to pass.
pub const QUORUM_PERCENT: u128 = 10;

/// Voting window of a proposal, in height units.
pub const PROPOSAL_DURATION: u64 = 1440;

/// How long staked tokens stay locked after the most recent stake.
pub const LOCK_PERIOD: u64 = 144;

/// Maximum number of proposals that can ever be created.
pub const MAX_PROPOSALS: u64 = 100;

/// Free (unstaked) balance required to create a proposal.
pub const PROPOSAL_THRESHOLD: u128 = UNIT;

/// Maximum proposal description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 256;
