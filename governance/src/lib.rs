//! Governance engine.
//!
//! Lifecycle: Open (voting) → ClosedPending (window over, not finalized) →
//! Executed (finalized with a passing tally). A failing tally leaves the
//! proposal ClosedPending; re-finalizing yields the same outcome because
//! vote totals are frozen once the window closes.
//!
//! Voting power is stake. Each vote commits an amount up to the voter's
//! current stake and is weighted by the proposal's [`VoteType`]: linear
//! (weight = amount) or quadratic (weight = ⌊√amount⌋).

pub mod engine;
pub mod error;
pub mod proposal;
pub mod vote;

pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use proposal::{DescriptionTooLong, Proposal, ProposalDescription, ProposalId, ProposalStatus};
pub use vote::{integer_sqrt, Choice, Tally, VoteRecord, VoteType};
