//! Pending-reward ledger and pool counter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stakegov_ledger::Ledger;
use stakegov_types::AccountId;

use crate::error::RewardError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDistributor {
    /// Total ever allocated. Informational only; claims do not debit it.
    pool: u128,
    pending: BTreeMap<AccountId, u128>,
}

impl RewardDistributor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reward_pool(&self) -> u128 {
        self.pool
    }

    /// Pending reward of `account`; zero when there is no entry.
    pub fn pending_reward(&self, account: &AccountId) -> u128 {
        self.pending.get(account).copied().unwrap_or(0)
    }

    /// Credit `amount` to `beneficiary` and grow the pool counter.
    ///
    /// Returns the beneficiary's new pending total. No tokens move here;
    /// payout happens from the custodial balance at claim time.
    pub fn distribute(
        &mut self,
        beneficiary: &AccountId,
        amount: u128,
    ) -> Result<u128, RewardError> {
        if amount == 0 {
            return Err(RewardError::ZeroAmount);
        }
        let pool = self.pool.checked_add(amount).ok_or(RewardError::Overflow)?;
        let pending = self
            .pending_reward(beneficiary)
            .checked_add(amount)
            .ok_or(RewardError::Overflow)?;

        self.pool = pool;
        self.pending.insert(beneficiary.clone(), pending);
        tracing::debug!(%beneficiary, amount, pending, pool, "reward credited");
        Ok(pending)
    }

    /// Pay out and clear `claimant`'s pending reward.
    ///
    /// If the custodial account cannot cover the payout the entry is kept.
    pub fn claim(&mut self, ledger: &mut Ledger, claimant: &AccountId) -> Result<u128, RewardError> {
        let amount = self.pending_reward(claimant);
        if amount == 0 {
            return Err(RewardError::NoRewards(claimant.clone()));
        }
        ledger.move_funds(&AccountId::custody(), claimant, amount)?;
        self.pending.remove(claimant);
        tracing::debug!(%claimant, amount, "reward claimed");
        Ok(amount)
    }
}
