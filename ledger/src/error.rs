use stakegov_types::{AccountId, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("{0} is not an authorized minter")]
    NotMinter(AccountId),

    #[error("caller {caller} cannot move funds owned by {owner}")]
    CallerMismatch { caller: AccountId, owner: AccountId },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("insufficient balance in {account}: need {needed}, available {available}")]
    InsufficientBalance {
        account: AccountId,
        needed: u128,
        available: u128,
    },

    #[error("insufficient allowance: need {needed}, available {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("minting {requested} would exceed the supply cap (remaining {remaining})")]
    SupplyCapExceeded { requested: u128, remaining: u128 },

    #[error("{0} is not a valid recipient")]
    InvalidRecipient(AccountId),

    #[error("arithmetic overflow in balance computation")]
    Overflow,
}

impl LedgerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotMinter(_) | Self::CallerMismatch { .. } => ErrorCode::Unauthorized,
            Self::ZeroAmount
            | Self::InsufficientBalance { .. }
            | Self::InsufficientAllowance { .. }
            | Self::SupplyCapExceeded { .. }
            | Self::Overflow => ErrorCode::InvalidAmount,
            Self::InvalidRecipient(_) => ErrorCode::InvalidRecipient,
        }
    }
}
