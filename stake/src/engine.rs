//! Core stake engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stakegov_ledger::Ledger;
use stakegov_types::params::LOCK_PERIOD;
use stakegov_types::{AccountId, Height};

use crate::error::StakeError;
use crate::record::StakeRecord;

/// Stake records for every account that has ever staked.
///
/// The tokens themselves sit in the custodial ledger account, so the sum of
/// all record amounts never exceeds the custodial balance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeManager {
    records: BTreeMap<AccountId, StakeRecord>,
}

impl StakeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stake record of `account`, if it has ever staked.
    pub fn stake_of(&self, account: &AccountId) -> Option<&StakeRecord> {
        self.records.get(account)
    }

    /// Currently staked amount; absence means zero.
    pub fn staked_amount(&self, account: &AccountId) -> u128 {
        self.records.get(account).map_or(0, |r| r.amount)
    }

    /// Sum of all staked amounts.
    pub fn total_staked(&self) -> u128 {
        self.records.values().map(|r| r.amount).sum()
    }

    /// Lock `amount` of `staker`'s balance.
    ///
    /// Adds to any existing stake and resets the lock to `now + LOCK_PERIOD`.
    pub fn stake(
        &mut self,
        ledger: &mut Ledger,
        staker: &AccountId,
        amount: u128,
        now: Height,
    ) -> Result<StakeRecord, StakeError> {
        if amount == 0 {
            return Err(StakeError::ZeroAmount);
        }
        let new_amount = self
            .staked_amount(staker)
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;

        ledger.move_funds(staker, &AccountId::custody(), amount)?;

        let record = StakeRecord {
            amount: new_amount,
            lock_until: now.saturating_add(LOCK_PERIOD),
        };
        self.records.insert(staker.clone(), record);
        tracing::debug!(%staker, amount, total = new_amount, lock_until = %record.lock_until, "staked");
        Ok(record)
    }

    /// Return `amount` of `staker`'s stake to their ledger balance.
    ///
    /// The lock height is left as is.
    pub fn unstake(
        &mut self,
        ledger: &mut Ledger,
        staker: &AccountId,
        amount: u128,
        now: Height,
    ) -> Result<StakeRecord, StakeError> {
        let current = self
            .records
            .get(staker)
            .copied()
            .ok_or_else(|| StakeError::NoStake(staker.clone()))?;
        if amount == 0 {
            return Err(StakeError::ZeroAmount);
        }
        if amount > current.amount {
            return Err(StakeError::ExceedsStake {
                requested: amount,
                staked: current.amount,
            });
        }
        if !current.is_unlocked(now) {
            return Err(StakeError::Locked {
                until: current.lock_until,
                now,
            });
        }

        ledger.move_funds(&AccountId::custody(), staker, amount)?;

        let record = StakeRecord {
            amount: current.amount - amount,
            ..current
        };
        self.records.insert(staker.clone(), record);
        tracing::debug!(%staker, amount, remaining = record.amount, "unstaked");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakegov_types::ErrorCode;

    fn acct(name: &str) -> AccountId {
        AccountId::new(name)
    }

    fn setup(balance: u128) -> (Ledger, StakeManager) {
        let mut ledger = Ledger::new();
        ledger.set_minter(acct("minter"), true);
        ledger.mint(&acct("minter"), &acct("alice"), balance).unwrap();
        (ledger, StakeManager::new())
    }

    #[test]
    fn stake_moves_funds_into_custody() {
        let (mut ledger, mut stakes) = setup(1000);
        let record = stakes
            .stake(&mut ledger, &acct("alice"), 400, Height::new(10))
            .unwrap();
        assert_eq!(record.amount, 400);
        assert_eq!(record.lock_until, Height::new(10 + LOCK_PERIOD));
        assert_eq!(ledger.balance_of(&acct("alice")), 600);
        assert_eq!(ledger.balance_of(&AccountId::custody()), 400);
        assert_eq!(stakes.total_staked(), 400);
    }

    #[test]
    fn restake_accumulates_and_resets_lock() {
        let (mut ledger, mut stakes) = setup(1000);
        stakes
            .stake(&mut ledger, &acct("alice"), 100, Height::new(0))
            .unwrap();
        let record = stakes
            .stake(&mut ledger, &acct("alice"), 50, Height::new(100))
            .unwrap();
        assert_eq!(record.amount, 150);
        assert_eq!(record.lock_until, Height::new(100 + LOCK_PERIOD));
    }

    #[test]
    fn stake_rejects_zero_and_overdraft() {
        let (mut ledger, mut stakes) = setup(10);
        let zero = stakes
            .stake(&mut ledger, &acct("alice"), 0, Height::new(0))
            .unwrap_err();
        assert_eq!(zero.code(), ErrorCode::InvalidStake);
        let overdraft = stakes
            .stake(&mut ledger, &acct("alice"), 11, Height::new(0))
            .unwrap_err();
        assert_eq!(overdraft.code(), ErrorCode::InvalidAmount);
        assert!(stakes.stake_of(&acct("alice")).is_none());
    }

    #[test]
    fn unstake_without_record_is_invalid_stake() {
        let (mut ledger, mut stakes) = setup(10);
        let err = stakes
            .unstake(&mut ledger, &acct("bob"), 1, Height::new(1000))
            .unwrap_err();
        assert_eq!(err, StakeError::NoStake(acct("bob")));
        assert_eq!(err.code(), ErrorCode::InvalidStake);
    }

    #[test]
    fn unstake_respects_lock_boundary() {
        let (mut ledger, mut stakes) = setup(5000);
        stakes
            .stake(&mut ledger, &acct("alice"), 1000, Height::new(1000))
            .unwrap();

        let locked = stakes
            .unstake(&mut ledger, &acct("alice"), 1000, Height::new(1143))
            .unwrap_err();
        assert_eq!(locked.code(), ErrorCode::StakeLocked);

        let record = stakes
            .unstake(&mut ledger, &acct("alice"), 1000, Height::new(1144))
            .unwrap();
        assert_eq!(record.amount, 0);
        assert_eq!(record.lock_until, Height::new(1144));
        assert_eq!(ledger.balance_of(&acct("alice")), 5000);
    }

    #[test]
    fn unstake_cannot_exceed_stake() {
        let (mut ledger, mut stakes) = setup(100);
        stakes
            .stake(&mut ledger, &acct("alice"), 60, Height::new(0))
            .unwrap();
        let err = stakes
            .unstake(&mut ledger, &acct("alice"), 61, Height::new(10_000))
            .unwrap_err();
        assert_eq!(
            err,
            StakeError::ExceedsStake {
                requested: 61,
                staked: 60
            }
        );
        assert_eq!(stakes.staked_amount(&acct("alice")), 60);
    }
}
