//! The single owned state object and its operations.

use serde::{Deserialize, Serialize};
use stakegov_governance::{
    Choice, GovernanceEngine, Proposal, ProposalDescription, ProposalId, ProposalStatus, Tally,
    VoteRecord, VoteType,
};
use stakegov_ledger::Ledger;
use stakegov_rewards::RewardDistributor;
use stakegov_stake::{StakeManager, StakeRecord};
use stakegov_types::{format_amount, AccountId, Height};

use crate::error::DaoError;
use crate::genesis::GenesisConfig;

/// All state of the system.
///
/// Pause gates the user-facing mutations (mint, transfer, approve,
/// transfer_from, stake, unstake, proposal creation, voting). Finalization,
/// claims and admin calls stay available while paused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dao {
    admin: AccountId,
    paused: bool,
    ledger: Ledger,
    stakes: StakeManager,
    governance: GovernanceEngine,
    rewards: RewardDistributor,
}

impl Dao {
    /// Initialize the system: the deployer becomes admin and sole minter and
    /// receives the initial supply.
    pub fn genesis(config: &GenesisConfig) -> Result<Self, DaoError> {
        ensure_user(&config.deployer)?;
        let mut ledger = Ledger::new();
        ledger.set_minter(config.deployer.clone(), true);
        if config.initial_supply > 0 {
            let supply = u128::from(config.initial_supply);
            ledger.mint(&config.deployer, &config.deployer, supply)?;
        }
        tracing::info!(
            deployer = %config.deployer,
            supply = %format_amount(ledger.total_supply()),
            "genesis"
        );
        Ok(Self {
            admin: config.deployer.clone(),
            paused: false,
            ledger,
            stakes: StakeManager::new(),
            governance: GovernanceEngine::new(),
            rewards: RewardDistributor::new(),
        })
    }

    // ── Guards ──────────────────────────────────────────────────────────

    fn ensure_not_paused(&self) -> Result<(), DaoError> {
        if self.paused {
            return Err(DaoError::Paused);
        }
        Ok(())
    }

    fn ensure_admin(&self, caller: &AccountId) -> Result<(), DaoError> {
        if *caller != self.admin {
            return Err(DaoError::NotAdmin {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    // ── Ledger ──────────────────────────────────────────────────────────

    pub fn mint(
        &mut self,
        caller: &AccountId,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<(), DaoError> {
        ensure_user(caller)?;
        self.ensure_not_paused()?;
        self.ledger.mint(caller, recipient, amount)?;
        tracing::info!(%caller, %recipient, amount = %format_amount(amount), "mint");
        Ok(())
    }

    pub fn transfer(
        &mut self,
        caller: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), DaoError> {
        ensure_user(caller)?;
        self.ensure_not_paused()?;
        self.ledger.transfer(caller, from, to, amount)?;
        tracing::info!(%from, %to, amount = %format_amount(amount), "transfer");
        Ok(())
    }

    pub fn approve(
        &mut self,
        caller: &AccountId,
        spender: &AccountId,
        amount: u128,
    ) -> Result<(), DaoError> {
        ensure_user(caller)?;
        self.ensure_not_paused()?;
        self.ledger.approve(caller, spender, amount);
        tracing::info!(owner = %caller, %spender, amount = %format_amount(amount), "approve");
        Ok(())
    }

    pub fn transfer_from(
        &mut self,
        caller: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), DaoError> {
        ensure_user(caller)?;
        self.ensure_not_paused()?;
        self.ledger.transfer_from(caller, owner, to, amount)?;
        tracing::info!(spender = %caller, %owner, %to, amount = %format_amount(amount), "transfer_from");
        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────

    pub fn stake(
        &mut self,
        caller: &AccountId,
        amount: u128,
        now: Height,
    ) -> Result<StakeRecord, DaoError> {
        ensure_user(caller)?;
        self.ensure_not_paused()?;
        let record = self.stakes.stake(&mut self.ledger, caller, amount, now)?;
        tracing::info!(
            staker = %caller,
            amount = %format_amount(amount),
            lock_until = %record.lock_until,
            "stake"
        );
        Ok(record)
    }

    pub fn unstake(
        &mut self,
        caller: &AccountId,
        amount: u128,
        now: Height,
    ) -> Result<StakeRecord, DaoError> {
        ensure_user(caller)?;
        self.ensure_not_paused()?;
        let record = self.stakes.unstake(&mut self.ledger, caller, amount, now)?;
        tracing::info!(staker = %caller, amount = %format_amount(amount), "unstake");
        Ok(record)
    }

    // ── Governance ──────────────────────────────────────────────────────

    pub fn create_proposal(
        &mut self,
        caller: &AccountId,
        description: ProposalDescription,
        vote_type: VoteType,
        now: Height,
    ) -> Result<ProposalId, DaoError> {
        ensure_user(caller)?;
        self.ensure_not_paused()?;
        let id = self
            .governance
            .create_proposal(&self.ledger, caller, description, vote_type, now)?;
        tracing::info!(id, creator = %caller, %vote_type, "proposal created");
        Ok(id)
    }

    /// [`Dao::create_proposal`] with the vote type given as its wire tag.
    ///
    /// An unknown tag is reported after the pause and capacity checks, in
    /// the same position a typed call would check it.
    pub fn create_proposal_tagged(
        &mut self,
        caller: &AccountId,
        description: ProposalDescription,
        vote_type: &str,
        now: Height,
    ) -> Result<ProposalId, DaoError> {
        ensure_user(caller)?;
        self.ensure_not_paused()?;
        self.governance.ensure_capacity()?;
        let vote_type = vote_type.parse::<VoteType>()?;
        self.create_proposal(caller, description, vote_type, now)
    }

    pub fn vote(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
        choice: Choice,
        amount: u128,
        now: Height,
    ) -> Result<VoteRecord, DaoError> {
        ensure_user(caller)?;
        self.ensure_not_paused()?;
        let record = self
            .governance
            .vote(&self.stakes, caller, id, choice, amount, now)?;
        tracing::info!(id, voter = %caller, ?choice, weight = record.weight, "vote");
        Ok(record)
    }

    /// Finalize proposal `id`. Open to any caller, and not gated by pause.
    pub fn end_proposal(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
        now: Height,
    ) -> Result<Tally, DaoError> {
        ensure_user(caller)?;
        let tally = self.governance.end_proposal(&self.ledger, id, now)?;
        tracing::info!(id, %caller, yes = tally.yes, no = tally.no, "proposal executed");
        Ok(tally)
    }

    // ── Rewards ─────────────────────────────────────────────────────────

    /// Admin-only. Credits `amount` to the admin's own pending reward.
    ///
    /// No tokens move: payout at claim time comes out of the custodial
    /// balance, which the admin funds separately (e.g. by a transfer to
    /// [`AccountId::custody`]).
    pub fn distribute(&mut self, caller: &AccountId, amount: u128) -> Result<u128, DaoError> {
        self.ensure_admin(caller)?;
        let pending = self.rewards.distribute(caller, amount)?;
        tracing::info!(
            admin = %caller,
            amount = %format_amount(amount),
            pool = %format_amount(self.rewards.reward_pool()),
            "distribute"
        );
        Ok(pending)
    }

    /// Pay out the caller's pending reward. Not gated by pause.
    pub fn claim(&mut self, caller: &AccountId) -> Result<u128, DaoError> {
        ensure_user(caller)?;
        let amount = self.rewards.claim(&mut self.ledger, caller)?;
        tracing::info!(%caller, amount = %format_amount(amount), "claim");
        Ok(amount)
    }

    // ── Admin ───────────────────────────────────────────────────────────

    pub fn set_paused(&mut self, caller: &AccountId, paused: bool) -> Result<(), DaoError> {
        self.ensure_admin(caller)?;
        self.paused = paused;
        tracing::info!(paused, "pause flag set");
        Ok(())
    }

    pub fn set_minter(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
        allowed: bool,
    ) -> Result<(), DaoError> {
        self.ensure_admin(caller)?;
        ensure_user(account)?;
        self.ledger.set_minter(account.clone(), allowed);
        tracing::info!(%account, allowed, "minter flag set");
        Ok(())
    }

    /// Hand the admin role to `new_admin`. Minter flags are untouched.
    pub fn transfer_admin(
        &mut self,
        caller: &AccountId,
        new_admin: &AccountId,
    ) -> Result<(), DaoError> {
        self.ensure_admin(caller)?;
        ensure_user(new_admin)?;
        self.admin = new_admin.clone();
        tracing::info!(from = %caller, to = %new_admin, "admin transferred");
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.ledger.balance_of(account)
    }

    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    pub fn is_minter(&self, account: &AccountId) -> bool {
        self.ledger.is_minter(account)
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.ledger.allowance(owner, spender)
    }

    pub fn custodial_balance(&self) -> u128 {
        self.ledger.balance_of(&AccountId::custody())
    }

    pub fn stake_of(&self, account: &AccountId) -> Option<&StakeRecord> {
        self.stakes.stake_of(account)
    }

    pub fn get_proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.governance.get_proposal(id)
    }

    pub fn get_vote(&self, id: ProposalId, voter: &AccountId) -> Option<&VoteRecord> {
        self.governance.get_vote(id, voter)
    }

    pub fn proposal_count(&self) -> u64 {
        self.governance.proposal_count()
    }

    pub fn proposal_status(&self, id: ProposalId, now: Height) -> Option<ProposalStatus> {
        self.governance.status(id, now)
    }

    pub fn tally(&self, id: ProposalId) -> Option<Tally> {
        self.governance.get_proposal(id).map(Proposal::tally)
    }

    pub fn pending_reward(&self, account: &AccountId) -> u128 {
        self.rewards.pending_reward(account)
    }

    pub fn reward_pool(&self) -> u128 {
        self.rewards.reward_pool()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn stakes(&self) -> &StakeManager {
        &self.stakes
    }

    pub fn governance(&self) -> &GovernanceEngine {
        &self.governance
    }

    /// Sum of all balances (custody included) equals total supply.
    pub fn check_conservation(&self) -> bool {
        self.ledger.sum_of_balances() == Some(self.ledger.total_supply())
    }
}

/// System accounts never act as callers and cannot be granted roles.
fn ensure_user(account: &AccountId) -> Result<(), DaoError> {
    if account.is_reserved() {
        return Err(DaoError::ReservedAccount(account.clone()));
    }
    Ok(())
}
