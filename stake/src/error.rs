//! Stake-specific errors.

use stakegov_ledger::LedgerError;
use stakegov_types::{AccountId, ErrorCode, Height};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakeError {
    #[error("stake amount must be non-zero")]
    ZeroAmount,

    #[error("{0} has no stake")]
    NoStake(AccountId),

    #[error("cannot unstake {requested}: only {staked} staked")]
    ExceedsStake { requested: u128, staked: u128 },

    #[error("stake locked until {until} (now {now})")]
    Locked { until: Height, now: Height },

    #[error("arithmetic overflow in stake computation")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl StakeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ZeroAmount | Self::NoStake(_) => ErrorCode::InvalidStake,
            Self::ExceedsStake { .. } | Self::Overflow => ErrorCode::InvalidAmount,
            Self::Locked { .. } => ErrorCode::StakeLocked,
            Self::Ledger(e) => e.code(),
        }
    }
}
