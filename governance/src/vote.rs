//! Vote records, vote types and weighting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stakegov_types::params::QUORUM_PERCENT;

use crate::error::GovernanceError;

/// How committed amounts translate into vote weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// weight = amount
    Linear,
    /// weight = ⌊√amount⌋
    Quadratic,
}

impl VoteType {
    /// Weight of a vote committing `amount` under this scheme.
    ///
    /// The quadratic transform applies to the amount committed to this one
    /// vote, not to the voter's total power.
    pub fn weight(self, amount: u128) -> u128 {
        match self {
            Self::Linear => amount,
            Self::Quadratic => integer_sqrt(amount),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
        }
    }
}

impl FromStr for VoteType {
    type Err = GovernanceError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "linear" => Ok(Self::Linear),
            "quadratic" => Ok(Self::Quadratic),
            other => Err(GovernanceError::InvalidVoteType(other.to_string())),
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ⌊√n⌋ by Newton's method on integers.
pub fn integer_sqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = n / 2 + 1;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Yes,
    No,
}

/// A voter's single, final vote on a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub choice: Choice,
    /// Weighted amount added to the tally (not the raw committed amount).
    pub weight: u128,
}

/// Yes/no totals of a proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub yes: u128,
    pub no: u128,
}

impl Tally {
    pub fn total(&self) -> Option<u128> {
        self.yes.checked_add(self.no)
    }

    /// Minimum total vote weight for a supply of `total_supply`.
    ///
    /// Truncating integer division, evaluated against total supply rather
    /// than total stake.
    pub fn quorum_for(total_supply: u128) -> Option<u128> {
        total_supply
            .checked_mul(QUORUM_PERCENT)
            .map(|scaled| scaled / 100)
    }

    /// Majority and quorum both met.
    pub fn passes(&self, total_supply: u128) -> Result<bool, GovernanceError> {
        let total = self.total().ok_or(GovernanceError::Overflow)?;
        let quorum = Self::quorum_for(total_supply).ok_or(GovernanceError::Overflow)?;
        Ok(self.yes > self.no && total >= quorum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_of_perfect_squares() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(1), 1);
        assert_eq!(integer_sqrt(100), 10);
        assert_eq!(integer_sqrt(10_000), 100);
    }

    #[test]
    fn sqrt_floors() {
        assert_eq!(integer_sqrt(2), 1);
        assert_eq!(integer_sqrt(99), 9);
        assert_eq!(integer_sqrt(10_001), 100);
        assert_eq!(integer_sqrt(u128::MAX), u64::MAX as u128);
    }

    #[test]
    fn weights_by_type() {
        assert_eq!(VoteType::Linear.weight(100), 100);
        assert_eq!(VoteType::Quadratic.weight(100), 10);
        assert_eq!(VoteType::Quadratic.weight(10_000), 100);
    }

    #[test]
    fn parses_known_tags_only() {
        assert_eq!("linear".parse::<VoteType>().unwrap(), VoteType::Linear);
        assert_eq!("quadratic".parse::<VoteType>().unwrap(), VoteType::Quadratic);
        let err = "ranked".parse::<VoteType>().unwrap_err();
        assert_eq!(err.code(), stakegov_types::ErrorCode::InvalidVoteType);
    }

    #[test]
    fn quorum_is_ten_percent_of_supply() {
        let supply = 1_000_000_000_000;
        assert_eq!(Tally::quorum_for(supply), Some(100_000_000_000));

        let short = Tally {
            yes: 60_000_000_000,
            no: 10_000_000_000,
        };
        assert!(!short.passes(supply).unwrap());

        let enough = Tally {
            yes: 95_000_000_000,
            no: 10_000_000_000,
        };
        assert!(enough.passes(supply).unwrap());
    }

    #[test]
    fn tie_does_not_pass() {
        let tie = Tally { yes: 50, no: 50 };
        assert!(!tie.passes(100).unwrap());
    }
}
