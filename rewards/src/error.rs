use stakegov_ledger::LedgerError;
use stakegov_types::{AccountId, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardError {
    #[error("reward amount must be non-zero")]
    ZeroAmount,

    #[error("{0} has no pending rewards")]
    NoRewards(AccountId),

    #[error("arithmetic overflow in reward accounting")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl RewardError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ZeroAmount | Self::Overflow => ErrorCode::InvalidAmount,
            Self::NoRewards(_) => ErrorCode::NoRewards,
            Self::Ledger(e) => e.code(),
        }
    }
}
