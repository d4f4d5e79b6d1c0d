//! Governance proposals and their lifecycle.

use serde::{Deserialize, Serialize};
use stakegov_types::params::MAX_DESCRIPTION_LEN;
use stakegov_types::{AccountId, Height};
use thiserror::Error;

use crate::vote::{Tally, VoteType};

/// Proposal ids are allocated sequentially starting at 1.
pub type ProposalId = u64;

/// Where a proposal is in its lifecycle at a given height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Voting window still open.
    Open,
    /// Window closed, not (yet) finalized with a passing tally.
    ClosedPending,
    /// Finalized with a passing tally. Terminal.
    Executed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("description is {len} characters, maximum is {max}")]
pub struct DescriptionTooLong {
    pub len: usize,
    pub max: usize,
}

/// Proposal text, bounded to [`MAX_DESCRIPTION_LEN`] characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProposalDescription(String);

impl ProposalDescription {
    pub fn new(text: impl Into<String>) -> Result<Self, DescriptionTooLong> {
        let text = text.into();
        let len = text.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(DescriptionTooLong {
                len,
                max: MAX_DESCRIPTION_LEN,
            });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProposalDescription {
    type Error = DescriptionTooLong;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<ProposalDescription> for String {
    fn from(description: ProposalDescription) -> Self {
        description.0
    }
}

/// A governance proposal.
///
/// Everything except the vote totals and the executed flag is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub creator: AccountId,
    pub description: ProposalDescription,
    pub start_height: Height,
    /// First height at which voting is closed.
    pub end_height: Height,
    pub yes_votes: u128,
    pub no_votes: u128,
    pub executed: bool,
    pub vote_type: VoteType,
}

impl Proposal {
    /// Whether votes are still accepted at `now`.
    pub fn is_open(&self, now: Height) -> bool {
        !self.end_height.reached_by(now)
    }

    pub fn status(&self, now: Height) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if self.is_open(now) {
            ProposalStatus::Open
        } else {
            ProposalStatus::ClosedPending
        }
    }

    pub fn tally(&self) -> Tally {
        Tally {
            yes: self.yes_votes,
            no: self.no_votes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_length_is_bounded() {
        assert!(ProposalDescription::new("a".repeat(MAX_DESCRIPTION_LEN)).is_ok());
        let err = ProposalDescription::new("a".repeat(MAX_DESCRIPTION_LEN + 1)).unwrap_err();
        assert_eq!(err.len, MAX_DESCRIPTION_LEN + 1);
    }

    #[test]
    fn description_counts_characters_not_bytes() {
        assert!(ProposalDescription::new("é".repeat(MAX_DESCRIPTION_LEN)).is_ok());
    }

    #[test]
    fn oversized_description_fails_to_deserialize() {
        let json = format!("\"{}\"", "x".repeat(MAX_DESCRIPTION_LEN + 1));
        assert!(serde_json::from_str::<ProposalDescription>(&json).is_err());
        let ok: ProposalDescription = serde_json::from_str("\"fund the docs\"").unwrap();
        assert_eq!(ok.as_str(), "fund the docs");
    }
}
