//! Core governance engine: proposal creation, voting and finalization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stakegov_ledger::Ledger;
use stakegov_stake::StakeManager;
use stakegov_types::params::{MAX_PROPOSALS, PROPOSAL_DURATION, PROPOSAL_THRESHOLD};
use stakegov_types::{AccountId, Height};

use crate::error::GovernanceError;
use crate::proposal::{Proposal, ProposalDescription, ProposalId, ProposalStatus};
use crate::vote::{Choice, Tally, VoteRecord, VoteType};

/// Proposals and the votes cast on them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceEngine {
    next_id: ProposalId,
    proposals: BTreeMap<ProposalId, Proposal>,
    /// proposal -> voter -> vote. Entries are never removed.
    votes: BTreeMap<ProposalId, BTreeMap<AccountId, VoteRecord>>,
}

impl Default for GovernanceEngine {
    fn default() -> Self {
        Self {
            next_id: 1,
            proposals: BTreeMap::new(),
            votes: BTreeMap::new(),
        }
    }
}

impl GovernanceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn get_proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    pub fn get_vote(&self, id: ProposalId, voter: &AccountId) -> Option<&VoteRecord> {
        self.votes.get(&id).and_then(|votes| votes.get(voter))
    }

    /// Number of proposals created so far.
    pub fn proposal_count(&self) -> u64 {
        self.next_id - 1
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }

    pub fn status(&self, id: ProposalId, now: Height) -> Option<ProposalStatus> {
        self.proposals.get(&id).map(|p| p.status(now))
    }

    /// Fails if another proposal would exceed [`MAX_PROPOSALS`].
    pub fn ensure_capacity(&self) -> Result<(), GovernanceError> {
        if self.next_id > MAX_PROPOSALS {
            return Err(GovernanceError::MaxProposalsReached { max: MAX_PROPOSALS });
        }
        Ok(())
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Open a new proposal, voting from `now` until `now + PROPOSAL_DURATION`.
    ///
    /// The creator's free (unstaked) ledger balance must meet
    /// [`PROPOSAL_THRESHOLD`]; the balance is only checked, never locked.
    pub fn create_proposal(
        &mut self,
        ledger: &Ledger,
        creator: &AccountId,
        description: ProposalDescription,
        vote_type: VoteType,
        now: Height,
    ) -> Result<ProposalId, GovernanceError> {
        self.ensure_capacity()?;
        let balance = ledger.balance_of(creator);
        if balance < PROPOSAL_THRESHOLD {
            return Err(GovernanceError::BelowThreshold {
                balance,
                threshold: PROPOSAL_THRESHOLD,
            });
        }

        let id = self.next_id;
        let proposal = Proposal {
            id,
            creator: creator.clone(),
            description,
            start_height: now,
            end_height: now.saturating_add(PROPOSAL_DURATION),
            yes_votes: 0,
            no_votes: 0,
            executed: false,
            vote_type,
        };
        tracing::debug!(id, %creator, %vote_type, end = %proposal.end_height, "proposal created");
        self.proposals.insert(id, proposal);
        self.next_id += 1;
        Ok(id)
    }

    /// Cast `voter`'s one vote on proposal `id`, committing `amount` of stake.
    ///
    /// The stake is not consumed: the same stake may back votes on other
    /// proposals.
    pub fn vote(
        &mut self,
        stakes: &StakeManager,
        voter: &AccountId,
        id: ProposalId,
        choice: Choice,
        amount: u128,
        now: Height,
    ) -> Result<VoteRecord, GovernanceError> {
        let proposal = self
            .proposals
            .get(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if !proposal.is_open(now) {
            return Err(GovernanceError::VotingEnded {
                id,
                end: proposal.end_height,
            });
        }
        if self.get_vote(id, voter).is_some() {
            return Err(GovernanceError::AlreadyVoted {
                id,
                voter: voter.clone(),
            });
        }
        if amount == 0 {
            return Err(GovernanceError::ZeroAmount);
        }
        let staked = stakes.staked_amount(voter);
        if amount > staked {
            return Err(GovernanceError::ExceedsStake {
                requested: amount,
                staked,
            });
        }

        let weight = proposal.vote_type.weight(amount);
        let mut tally = proposal.tally();
        let side = match choice {
            Choice::Yes => &mut tally.yes,
            Choice::No => &mut tally.no,
        };
        *side = side.checked_add(weight).ok_or(GovernanceError::Overflow)?;

        let record = VoteRecord { choice, weight };
        if let Some(proposal) = self.proposals.get_mut(&id) {
            proposal.yes_votes = tally.yes;
            proposal.no_votes = tally.no;
        }
        self.votes
            .entry(id)
            .or_default()
            .insert(voter.clone(), record);
        tracing::debug!(id, %voter, ?choice, amount, weight, "vote recorded");
        Ok(record)
    }

    /// Finalize a closed proposal. Anyone may call this.
    ///
    /// Passes when yes > no and yes + no ≥ `QUORUM_PERCENT`% of total supply.
    /// A failing tally changes nothing and may be retried.
    pub fn end_proposal(
        &mut self,
        ledger: &Ledger,
        id: ProposalId,
        now: Height,
    ) -> Result<Tally, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if proposal.is_open(now) {
            return Err(GovernanceError::StillActive {
                id,
                end: proposal.end_height,
            });
        }
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(id));
        }

        let tally = proposal.tally();
        let supply = ledger.total_supply();
        if !tally.passes(supply)? {
            let quorum = Tally::quorum_for(supply).ok_or(GovernanceError::Overflow)?;
            return Err(GovernanceError::NotEnoughVotes {
                yes: tally.yes,
                no: tally.no,
                quorum,
            });
        }

        proposal.executed = true;
        tracing::debug!(id, yes = tally.yes, no = tally.no, "proposal executed");
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakegov_types::params::UNIT;
    use stakegov_types::ErrorCode;

    fn acct(name: &str) -> AccountId {
        AccountId::new(name)
    }

    fn desc(text: &str) -> ProposalDescription {
        ProposalDescription::new(text).unwrap()
    }

    /// alice holds 10 tokens free; bob has 100 units staked.
    fn setup() -> (Ledger, StakeManager, GovernanceEngine) {
        let mut ledger = Ledger::new();
        ledger.set_minter(acct("minter"), true);
        ledger
            .mint(&acct("minter"), &acct("alice"), 10 * UNIT)
            .unwrap();
        ledger.mint(&acct("minter"), &acct("bob"), 100).unwrap();
        let mut stakes = StakeManager::new();
        stakes
            .stake(&mut ledger, &acct("bob"), 100, Height::new(0))
            .unwrap();
        (ledger, stakes, GovernanceEngine::new())
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let (ledger, _, mut gov) = setup();
        let first = gov
            .create_proposal(&ledger, &acct("alice"), desc("a"), VoteType::Linear, Height::new(5))
            .unwrap();
        let second = gov
            .create_proposal(&ledger, &acct("alice"), desc("b"), VoteType::Linear, Height::new(6))
            .unwrap();
        assert_eq!((first, second), (1, 2));
        assert_eq!(gov.proposal_count(), 2);

        let p = gov.get_proposal(1).unwrap();
        assert_eq!(p.start_height, Height::new(5));
        assert_eq!(p.end_height, Height::new(5 + PROPOSAL_DURATION));
        assert_eq!(p.tally(), Tally::default());
    }

    #[test]
    fn creation_requires_free_balance_threshold() {
        let (ledger, _, mut gov) = setup();
        let err = gov
            .create_proposal(&ledger, &acct("bob"), desc("x"), VoteType::Linear, Height::new(0))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidAmount);
        assert_eq!(gov.proposal_count(), 0);
    }

    #[test]
    fn creation_stops_at_max_proposals() {
        let (ledger, _, mut gov) = setup();
        for _ in 0..MAX_PROPOSALS {
            gov.create_proposal(&ledger, &acct("alice"), desc("p"), VoteType::Linear, Height::new(0))
                .unwrap();
        }
        let err = gov
            .create_proposal(&ledger, &acct("alice"), desc("p"), VoteType::Linear, Height::new(0))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MaxProposals);
        assert_eq!(gov.proposal_count(), MAX_PROPOSALS);
    }

    #[test]
    fn quadratic_vote_records_weight() {
        let (ledger, stakes, mut gov) = setup();
        let id = gov
            .create_proposal(&ledger, &acct("alice"), desc("q"), VoteType::Quadratic, Height::new(0))
            .unwrap();
        let record = gov
            .vote(&stakes, &acct("bob"), id, Choice::Yes, 100, Height::new(1))
            .unwrap();
        assert_eq!(record.weight, 10);
        assert_eq!(gov.get_proposal(id).unwrap().yes_votes, 10);
        assert_eq!(gov.get_vote(id, &acct("bob")), Some(&record));
    }

    #[test]
    fn vote_checks_in_order() {
        let (ledger, stakes, mut gov) = setup();
        let id = gov
            .create_proposal(&ledger, &acct("alice"), desc("v"), VoteType::Linear, Height::new(0))
            .unwrap();

        let unknown = gov
            .vote(&stakes, &acct("bob"), 99, Choice::Yes, 1, Height::new(1))
            .unwrap_err();
        assert_eq!(unknown.code(), ErrorCode::InvalidProposal);

        let too_much = gov
            .vote(&stakes, &acct("bob"), id, Choice::Yes, 101, Height::new(1))
            .unwrap_err();
        assert_eq!(too_much.code(), ErrorCode::InvalidAmount);

        gov.vote(&stakes, &acct("bob"), id, Choice::No, 40, Height::new(1))
            .unwrap();
        let again = gov
            .vote(&stakes, &acct("bob"), id, Choice::Yes, 1_000_000, Height::new(2))
            .unwrap_err();
        assert_eq!(again.code(), ErrorCode::AlreadyVoted);

        let late = gov
            .vote(&stakes, &acct("carol"), id, Choice::Yes, 1, Height::new(PROPOSAL_DURATION))
            .unwrap_err();
        assert_eq!(late.code(), ErrorCode::ProposalEnded);
        assert_eq!(gov.get_proposal(id).unwrap().tally(), Tally { yes: 0, no: 40 });
    }

    #[test]
    fn end_proposal_lifecycle() {
        let mut ledger = Ledger::new();
        ledger.set_minter(acct("minter"), true);
        ledger.mint(&acct("minter"), &acct("alice"), 1000 * UNIT).unwrap();
        let mut stakes = StakeManager::new();
        stakes
            .stake(&mut ledger, &acct("alice"), 200 * UNIT, Height::new(0))
            .unwrap();
        let mut gov = GovernanceEngine::new();
        let id = gov
            .create_proposal(&ledger, &acct("alice"), desc("e"), VoteType::Linear, Height::new(0))
            .unwrap();

        let active = gov.end_proposal(&ledger, id, Height::new(10)).unwrap_err();
        assert_eq!(active.code(), ErrorCode::ProposalActive);
        assert_eq!(gov.status(id, Height::new(10)), Some(ProposalStatus::Open));

        gov.vote(&stakes, &acct("alice"), id, Choice::Yes, 150 * UNIT, Height::new(10))
            .unwrap();
        let end = Height::new(PROPOSAL_DURATION);
        assert_eq!(gov.status(id, end), Some(ProposalStatus::ClosedPending));

        let tally = gov.end_proposal(&ledger, id, end).unwrap();
        assert_eq!(tally.yes, 150 * UNIT);
        assert_eq!(gov.status(id, end), Some(ProposalStatus::Executed));

        let twice = gov.end_proposal(&ledger, id, end).unwrap_err();
        assert_eq!(twice, GovernanceError::AlreadyExecuted(id));
    }

    #[test]
    fn failed_finalization_is_repeatable() {
        let (ledger, stakes, mut gov) = setup();
        let id = gov
            .create_proposal(&ledger, &acct("alice"), desc("f"), VoteType::Linear, Height::new(0))
            .unwrap();
        gov.vote(&stakes, &acct("bob"), id, Choice::Yes, 1, Height::new(1))
            .unwrap();
        let end = Height::new(PROPOSAL_DURATION + 5);
        let before = gov.clone();
        let first = gov.end_proposal(&ledger, id, end).unwrap_err();
        let second = gov.end_proposal(&ledger, id, end).unwrap_err();
        assert_eq!(first.code(), ErrorCode::NotEnoughVotes);
        assert_eq!(first, second);
        assert_eq!(gov, before);
    }
}
