//! Initial state of the system.

use serde::{Deserialize, Serialize};
use stakegov_types::params::UNIT;
use stakegov_types::AccountId;

/// Who deploys the system and how much they are bootstrap-minted.
///
/// The deployer becomes the admin and the first minter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    #[serde(default = "default_deployer")]
    pub deployer: AccountId,

    /// Smallest units minted to the deployer at initialization.
    /// `u64` because TOML integers are 64-bit.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: u64,
}

fn default_deployer() -> AccountId {
    AccountId::new("deployer")
}

fn default_initial_supply() -> u64 {
    1_000_000 * UNIT as u64
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            deployer: default_deployer(),
            initial_supply: default_initial_supply(),
        }
    }
}
