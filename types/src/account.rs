//! Opaque account identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An account identifier supplied by the (external) authentication layer.
///
/// The state machine never interprets the string. Two identifiers are
/// reserved for the system itself and are recognised by their prefix.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Prefix shared by every system-owned identifier.
    pub const RESERVED_PREFIX: &'static str = "stakegov:";

    const NULL: &'static str = "stakegov:null";
    const CUSTODY: &'static str = "stakegov:custody";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The disallowed sentinel recipient. Tokens sent here would be unrecoverable.
    pub fn null() -> Self {
        Self(Self::NULL.to_string())
    }

    /// The custodial account holding staked and reward funds.
    pub fn custody() -> Self {
        Self(Self::CUSTODY.to_string())
    }

    pub fn is_null(&self) -> bool {
        self.0 == Self::NULL
    }

    pub fn is_custody(&self) -> bool {
        self.0 == Self::CUSTODY
    }

    /// Whether this identifier belongs to the system rather than a user.
    pub fn is_reserved(&self) -> bool {
        self.0.starts_with(Self::RESERVED_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
