//! Numeric result codes returned to callers.

use thiserror::Error;

/// Every failure the state machine can report, with its stable wire code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[repr(u32)]
pub enum ErrorCode {
    #[error("[100] unauthorized")]
    Unauthorized = 100,

    #[error("[101] operations paused")]
    Paused = 101,

    #[error("[102] invalid amount")]
    InvalidAmount = 102,

    #[error("[103] invalid recipient")]
    InvalidRecipient = 103,

    #[error("[104] invalid proposal")]
    InvalidProposal = 104,

    #[error("[105] already voted")]
    AlreadyVoted = 105,

    #[error("[106] proposal ended")]
    ProposalEnded = 106,

    #[error("[107] not enough votes")]
    NotEnoughVotes = 107,

    #[error("[108] invalid stake")]
    InvalidStake = 108,

    #[error("[109] stake locked")]
    StakeLocked = 109,

    #[error("[110] no rewards")]
    NoRewards = 110,

    #[error("[111] proposal active")]
    ProposalActive = 111,

    #[error("[112] max proposals reached")]
    MaxProposals = 112,

    #[error("[113] invalid vote type")]
    InvalidVoteType = 113,
}

impl ErrorCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}
