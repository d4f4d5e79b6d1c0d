//! Balance table, minter set and total supply.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stakegov_types::params::MAX_SUPPLY;
use stakegov_types::AccountId;

use crate::error::LedgerError;

/// The token ledger.
///
/// Maps are ordered so that snapshots and iteration are deterministic.
/// Unknown accounts simply have a zero balance; entries are created lazily.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balances: BTreeMap<AccountId, u128>,
    total_supply: u128,
    minters: BTreeMap<AccountId, bool>,
    /// owner -> spender -> remaining allowance.
    pub(crate) allowances: BTreeMap<AccountId, BTreeMap<AccountId, u128>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// Balance of `account`, zero if the account has never been credited.
    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn is_minter(&self, account: &AccountId) -> bool {
        self.minters.get(account).copied().unwrap_or(false)
    }

    /// Iterate over every account with a recorded balance.
    pub fn balances(&self) -> impl Iterator<Item = (&AccountId, u128)> {
        self.balances.iter().map(|(account, balance)| (account, *balance))
    }

    /// Sum of all recorded balances, or `None` on overflow.
    ///
    /// Equal to [`Ledger::total_supply`] whenever the ledger is consistent.
    pub fn sum_of_balances(&self) -> Option<u128> {
        self.balances
            .values()
            .try_fold(0u128, |acc, balance| acc.checked_add(*balance))
    }

    // ── Minting ─────────────────────────────────────────────────────────

    /// Grant or revoke the minter flag. Authorization is the caller's concern.
    pub fn set_minter(&mut self, account: AccountId, allowed: bool) {
        if allowed {
            self.minters.insert(account, true);
        } else {
            self.minters.remove(&account);
        }
    }

    /// Create `amount` new tokens in `recipient`'s balance.
    pub fn mint(
        &mut self,
        minter: &AccountId,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if !self.is_minter(minter) {
            return Err(LedgerError::NotMinter(minter.clone()));
        }
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let remaining = MAX_SUPPLY.saturating_sub(self.total_supply);
        if amount > remaining {
            return Err(LedgerError::SupplyCapExceeded {
                requested: amount,
                remaining,
            });
        }
        let new_balance = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.total_supply += amount;
        self.balances.insert(recipient.clone(), new_balance);
        tracing::debug!(%minter, %recipient, amount, supply = self.total_supply, "minted");
        Ok(())
    }

    // ── Transfers ───────────────────────────────────────────────────────

    /// Transfer initiated by `caller`, who must own the source balance.
    ///
    /// Allowances are never consulted here; see [`Ledger::transfer_from`].
    pub fn transfer(
        &mut self,
        caller: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if caller != from {
            return Err(LedgerError::CallerMismatch {
                caller: caller.clone(),
                owner: from.clone(),
            });
        }
        self.move_funds(from, to, amount)
    }

    /// Move funds on behalf of the system (staking, unstaking, reward payout).
    ///
    /// Performs every check `transfer` does except the caller match. All
    /// checks run before the first write, so a failure leaves the ledger
    /// untouched.
    pub fn move_funds(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if to.is_null() {
            return Err(LedgerError::InvalidRecipient(to.clone()));
        }
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from.clone(),
                needed: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let new_to = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.balances.insert(from.clone(), available - amount);
        self.balances.insert(to.clone(), new_to);
        tracing::debug!(%from, %to, amount, "transferred");
        Ok(())
    }
}
