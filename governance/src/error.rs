use stakegov_types::{AccountId, ErrorCode, Height};
use thiserror::Error;

use crate::proposal::ProposalId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("maximum of {max} proposals reached")]
    MaxProposalsReached { max: u64 },

    #[error("unknown vote type {0:?}, expected \"linear\" or \"quadratic\"")]
    InvalidVoteType(String),

    #[error("free balance {balance} is below the proposal threshold {threshold}")]
    BelowThreshold { balance: u128, threshold: u128 },

    #[error("voting on proposal {id} ended at {end}")]
    VotingEnded { id: ProposalId, end: Height },

    #[error("{voter} has already voted on proposal {id}")]
    AlreadyVoted { id: ProposalId, voter: AccountId },

    #[error("vote amount must be non-zero")]
    ZeroAmount,

    #[error("cannot commit {requested}: only {staked} staked")]
    ExceedsStake { requested: u128, staked: u128 },

    #[error("proposal {id} is still open until {end}")]
    StillActive { id: ProposalId, end: Height },

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(ProposalId),

    #[error("not enough votes: yes {yes}, no {no}, quorum {quorum}")]
    NotEnoughVotes { yes: u128, no: u128, quorum: u128 },

    #[error("arithmetic overflow in vote tally")]
    Overflow,
}

impl GovernanceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ProposalNotFound(_) | Self::AlreadyExecuted(_) => ErrorCode::InvalidProposal,
            Self::MaxProposalsReached { .. } => ErrorCode::MaxProposals,
            Self::InvalidVoteType(_) => ErrorCode::InvalidVoteType,
            Self::BelowThreshold { .. }
            | Self::ZeroAmount
            | Self::ExceedsStake { .. }
            | Self::Overflow => ErrorCode::InvalidAmount,
            Self::VotingEnded { .. } => ErrorCode::ProposalEnded,
            Self::AlreadyVoted { .. } => ErrorCode::AlreadyVoted,
            Self::StillActive { .. } => ErrorCode::ProposalActive,
            Self::NotEnoughVotes { .. } => ErrorCode::NotEnoughVotes,
        }
    }
}
