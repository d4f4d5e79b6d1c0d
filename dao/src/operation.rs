//! Serializable operations and their receipts.
//!
//! One [`Entry`] is one linearized request: who is calling, at what height,
//! and what they ask for. JSON form:
//!
//! ```json
//! {"caller": "alice", "height": 1000, "op": {"stake": {"amount": 1000}}}
//! {"caller": "alice", "height": 1200, "op": "claim"}
//! ```

use serde::{Deserialize, Serialize};
use stakegov_governance::{Choice, ProposalDescription, ProposalId, Tally, VoteRecord};
use stakegov_stake::StakeRecord;
use stakegov_types::{AccountId, Height};

use crate::error::DaoError;
use crate::state::Dao;

/// Every mutating call of the state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Mint {
        recipient: AccountId,
        amount: u128,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: u128,
    },
    Approve {
        spender: AccountId,
        amount: u128,
    },
    TransferFrom {
        owner: AccountId,
        to: AccountId,
        amount: u128,
    },
    Stake {
        amount: u128,
    },
    Unstake {
        amount: u128,
    },
    CreateProposal {
        description: ProposalDescription,
        /// Wire tag, validated on apply: `"linear"` or `"quadratic"`.
        vote_type: String,
    },
    Vote {
        proposal_id: ProposalId,
        choice: Choice,
        amount: u128,
    },
    EndProposal {
        proposal_id: ProposalId,
    },
    Distribute {
        amount: u128,
    },
    Claim,
    SetPaused {
        paused: bool,
    },
    SetMinter {
        account: AccountId,
        allowed: bool,
    },
    TransferAdmin {
        new_admin: AccountId,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mint { .. } => "mint",
            Self::Transfer { .. } => "transfer",
            Self::Approve { .. } => "approve",
            Self::TransferFrom { .. } => "transfer_from",
            Self::Stake { .. } => "stake",
            Self::Unstake { .. } => "unstake",
            Self::CreateProposal { .. } => "create_proposal",
            Self::Vote { .. } => "vote",
            Self::EndProposal { .. } => "end_proposal",
            Self::Distribute { .. } => "distribute",
            Self::Claim => "claim",
            Self::SetPaused { .. } => "set_paused",
            Self::SetMinter { .. } => "set_minter",
            Self::TransferAdmin { .. } => "transfer_admin",
        }
    }
}

/// A request as it arrives from the sequencing layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub caller: AccountId,
    pub height: Height,
    pub op: Operation,
}

/// Success value of an applied [`Entry`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Receipt {
    Done,
    Staked { record: StakeRecord },
    Unstaked { record: StakeRecord },
    ProposalCreated { proposal_id: ProposalId },
    Voted { record: VoteRecord },
    ProposalExecuted { tally: Tally },
    Distributed { pending: u128 },
    Claimed { amount: u128 },
}

impl Dao {
    /// Apply one entry. On error, nothing has changed.
    pub fn apply(&mut self, entry: &Entry) -> Result<Receipt, DaoError> {
        let caller = &entry.caller;
        let now = entry.height;
        let result = match &entry.op {
            Operation::Mint { recipient, amount } => {
                self.mint(caller, recipient, *amount).map(|()| Receipt::Done)
            }
            Operation::Transfer { from, to, amount } => {
                self.transfer(caller, from, to, *amount).map(|()| Receipt::Done)
            }
            Operation::Approve { spender, amount } => {
                self.approve(caller, spender, *amount).map(|()| Receipt::Done)
            }
            Operation::TransferFrom { owner, to, amount } => self
                .transfer_from(caller, owner, to, *amount)
                .map(|()| Receipt::Done),
            Operation::Stake { amount } => self
                .stake(caller, *amount, now)
                .map(|record| Receipt::Staked { record }),
            Operation::Unstake { amount } => self
                .unstake(caller, *amount, now)
                .map(|record| Receipt::Unstaked { record }),
            Operation::CreateProposal {
                description,
                vote_type,
            } => self
                .create_proposal_tagged(caller, description.clone(), vote_type, now)
                .map(|proposal_id| Receipt::ProposalCreated { proposal_id }),
            Operation::Vote {
                proposal_id,
                choice,
                amount,
            } => self
                .vote(caller, *proposal_id, *choice, *amount, now)
                .map(|record| Receipt::Voted { record }),
            Operation::EndProposal { proposal_id } => self
                .end_proposal(caller, *proposal_id, now)
                .map(|tally| Receipt::ProposalExecuted { tally }),
            Operation::Distribute { amount } => self
                .distribute(caller, *amount)
                .map(|pending| Receipt::Distributed { pending }),
            Operation::Claim => self.claim(caller).map(|amount| Receipt::Claimed { amount }),
            Operation::SetPaused { paused } => {
                self.set_paused(caller, *paused).map(|()| Receipt::Done)
            }
            Operation::SetMinter { account, allowed } => self
                .set_minter(caller, account, *allowed)
                .map(|()| Receipt::Done),
            Operation::TransferAdmin { new_admin } => {
                self.transfer_admin(caller, new_admin).map(|()| Receipt::Done)
            }
        };
        if let Err(e) = &result {
            tracing::debug!(
                op = entry.op.name(),
                %caller,
                height = %now,
                code = e.code().as_u32(),
                "rejected: {e}"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_parse_from_json() {
        let entry: Entry = serde_json::from_str(
            r#"{"caller":"alice","height":1000,"op":{"stake":{"amount":1000}}}"#,
        )
        .unwrap();
        assert_eq!(entry.op, Operation::Stake { amount: 1000 });
        assert_eq!(entry.height, Height::new(1000));

        let claim: Entry =
            serde_json::from_str(r#"{"caller":"admin","height":5,"op":"claim"}"#).unwrap();
        assert_eq!(claim.op, Operation::Claim);

        let vote: Entry = serde_json::from_str(
            r#"{"caller":"bob","height":7,"op":{"vote":{"proposal_id":1,"choice":"yes","amount":100}}}"#,
        )
        .unwrap();
        assert_eq!(vote.op.name(), "vote");
    }

    #[test]
    fn receipts_serialize_with_result_tag() {
        let json = serde_json::to_string(&Receipt::Claimed { amount: 5 }).unwrap();
        assert_eq!(json, r#"{"result":"claimed","amount":5}"#);
    }
}
