//! Lifecycle configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokenlife_types::{TokenAmount, MAX_DECIMALS};

use crate::error::ConfigError;

/// Amounts and decimals for a lifecycle run.
///
/// Amounts are in whole tokens; [`LifecycleConfig::raw`] scales them by
/// `decimals`. Loaded via [`LifecycleConfig::from_toml_file`] or built
/// programmatically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u8,

    /// Issued to the team account in the growth phase.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: u64,

    /// Moved from the team account to the user account in the growth phase.
    #[serde(default = "default_transfer_amount")]
    pub transfer_amount: u64,

    /// Issued to the user account by the delegated mint authority.
    #[serde(default = "default_delegated_supply")]
    pub delegated_supply: u64,
}

fn default_decimals() -> u8 {
    9
}

fn default_initial_supply() -> u64 {
    1_000
}

fn default_transfer_amount() -> u64 {
    100
}

fn default_delegated_supply() -> u64 {
    500
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            initial_supply: default_initial_supply(),
            transfer_amount: default_transfer_amount(),
            delegated_supply: default_delegated_supply(),
        }
    }
}

impl LifecycleConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the lifecycle cannot complete.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "decimals {} exceeds the maximum of {MAX_DECIMALS}",
                self.decimals
            )));
        }
        for (name, value) in [
            ("initial_supply", self.initial_supply),
            ("transfer_amount", self.transfer_amount),
            ("delegated_supply", self.delegated_supply),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
            }
            self.raw(value)?;
        }
        if self.transfer_amount > self.initial_supply {
            return Err(ConfigError::Invalid(format!(
                "transfer_amount {} exceeds initial_supply {}",
                self.transfer_amount, self.initial_supply
            )));
        }
        let total = self
            .initial_supply
            .checked_add(self.delegated_supply)
            .ok_or_else(|| ConfigError::Invalid("total supply overflows".to_string()))?;
        self.raw(total)?;
        Ok(())
    }

    /// Scale a whole-token amount to base units.
    pub fn raw(&self, whole: u64) -> Result<TokenAmount, ConfigError> {
        TokenAmount::from_whole(whole, self.decimals).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "{whole} tokens at {} decimals overflows the amount range",
                self.decimals
            ))
        })
    }
}
