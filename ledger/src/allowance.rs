//! Delegated transfers: `approve` / `allowance` / `transfer_from`.
//!
//! An owner grants a spender the right to move up to a fixed amount of the
//! owner's balance. `approve` overwrites any previous allowance; it never adds.

use stakegov_types::AccountId;

use crate::error::LedgerError;
use crate::ledger::Ledger;

impl Ledger {
    /// Remaining amount `spender` may move out of `owner`'s balance.
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Set the allowance of `spender` over `owner`'s funds. Zero clears it.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: u128) {
        if amount == 0 {
            if let Some(spenders) = self.allowances.get_mut(owner) {
                spenders.remove(spender);
                if spenders.is_empty() {
                    self.allowances.remove(owner);
                }
            }
        } else {
            self.allowances
                .entry(owner.clone())
                .or_default()
                .insert(spender.clone(), amount);
        }
        tracing::debug!(%owner, %spender, amount, "allowance set");
    }

    /// Move `amount` from `owner` to `to` using `spender`'s allowance.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let available = self.allowance(owner, spender);
        if amount > available {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available,
            });
        }
        self.move_funds(owner, to, amount)?;
        self.approve(owner, spender, available - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(name: &str) -> AccountId {
        AccountId::new(name)
    }

    fn funded() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.set_minter(acct("minter"), true);
        ledger.mint(&acct("minter"), &acct("alice"), 100).unwrap();
        ledger
    }

    #[test]
    fn approve_overwrites() {
        let mut ledger = funded();
        ledger.approve(&acct("alice"), &acct("bob"), 30);
        ledger.approve(&acct("alice"), &acct("bob"), 10);
        assert_eq!(ledger.allowance(&acct("alice"), &acct("bob")), 10);
        ledger.approve(&acct("alice"), &acct("bob"), 0);
        assert_eq!(ledger.allowance(&acct("alice"), &acct("bob")), 0);
    }

    #[test]
    fn transfer_from_spends_allowance() {
        let mut ledger = funded();
        ledger.approve(&acct("alice"), &acct("bob"), 30);
        ledger
            .transfer_from(&acct("bob"), &acct("alice"), &acct("carol"), 20)
            .unwrap();
        assert_eq!(ledger.balance_of(&acct("carol")), 20);
        assert_eq!(ledger.balance_of(&acct("alice")), 80);
        assert_eq!(ledger.allowance(&acct("alice"), &acct("bob")), 10);
    }

    #[test]
    fn transfer_from_beyond_allowance_fails() {
        let mut ledger = funded();
        ledger.approve(&acct("alice"), &acct("bob"), 5);
        let before = ledger.clone();
        let err = ledger
            .transfer_from(&acct("bob"), &acct("alice"), &acct("bob"), 6)
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientAllowance {
                needed: 6,
                available: 5
            }
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn transfer_from_keeps_allowance_when_balance_short() {
        let mut ledger = funded();
        ledger.approve(&acct("alice"), &acct("bob"), 500);
        assert!(ledger
            .transfer_from(&acct("bob"), &acct("alice"), &acct("bob"), 200)
            .is_err());
        assert_eq!(ledger.allowance(&acct("alice"), &acct("bob")), 500);
    }

    #[test]
    fn plain_transfer_ignores_allowance() {
        let mut ledger = funded();
        ledger.approve(&acct("alice"), &acct("bob"), 50);
        assert!(ledger
            .transfer(&acct("bob"), &acct("alice"), &acct("bob"), 10)
            .is_err());
    }
}
