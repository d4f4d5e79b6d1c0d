use stakegov_governance::GovernanceError;
use stakegov_ledger::LedgerError;
use stakegov_rewards::RewardError;
use stakegov_stake::StakeError;
use stakegov_types::{AccountId, ErrorCode};
use thiserror::Error;

/// Every way a state-machine operation can fail.
///
/// All variants are recoverable; [`DaoError::code`] gives the numeric code
/// reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DaoError {
    #[error("{caller} is not the admin")]
    NotAdmin { caller: AccountId },

    #[error("operations are paused")]
    Paused,

    #[error("{0} is a reserved system account")]
    ReservedAccount(AccountId),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Stake(#[from] StakeError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Reward(#[from] RewardError),
}

impl DaoError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotAdmin { .. } | Self::ReservedAccount(_) => ErrorCode::Unauthorized,
            Self::Paused => ErrorCode::Paused,
            Self::Ledger(e) => e.code(),
            Self::Stake(e) => e.code(),
            Self::Governance(e) => e.code(),
            Self::Reward(e) => e.code(),
        }
    }
}
