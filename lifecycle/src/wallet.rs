//! Signer wallets loaded from the environment.

use tokenlife_crypto::keypair_from_base58;
use tokenlife_types::{Identity, KeyPair};

use crate::error::ConfigError;

pub const WALLET_A_VAR: &str = "WALLET_A_SECRET_KEY";
pub const WALLET_B_VAR: &str = "WALLET_B_SECRET_KEY";
pub const WALLET_C_VAR: &str = "WALLET_C_SECRET_KEY";

/// The part a wallet plays in the lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Initial mint authority, payer and team account holder.
    AuthorityA,
    /// Freeze authority from genesis, mint authority after delegation.
    AuthorityB,
    /// Holder of the user account.
    User,
}

impl Role {
    pub fn env_var(&self) -> &'static str {
        match self {
            Role::AuthorityA => WALLET_A_VAR,
            Role::AuthorityB => WALLET_B_VAR,
            Role::User => WALLET_C_VAR,
        }
    }
}

/// The three signers the lifecycle needs.
pub struct WalletConfig {
    authority_a: KeyPair,
    authority_b: KeyPair,
    user: KeyPair,
}

impl WalletConfig {
    /// Wallets must be three distinct keys.
    pub fn new(authority_a: KeyPair, authority_b: KeyPair, user: KeyPair) -> Result<Self, ConfigError> {
        let (a, b, c) = (authority_a.identity(), authority_b.identity(), user.identity());
        if a == b || a == c || b == c {
            return Err(ConfigError::Invalid(
                "wallets A, B and C must be distinct keys".to_string(),
            ));
        }
        Ok(Self {
            authority_a,
            authority_b,
            user,
        })
    }

    /// Read `WALLET_{A,B,C}_SECRET_KEY` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load secrets through `lookup`, failing on the first missing or malformed one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load = |role: Role| -> Result<KeyPair, ConfigError> {
            let var = role.env_var();
            let secret = lookup(var)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .ok_or(ConfigError::MissingVar(var))?;
            keypair_from_base58(&secret).map_err(|source| ConfigError::InvalidSecret { var, source })
        };
        Self::new(
            load(Role::AuthorityA)?,
            load(Role::AuthorityB)?,
            load(Role::User)?,
        )
    }

    pub fn keypair(&self, role: Role) -> &KeyPair {
        match role {
            Role::AuthorityA => &self.authority_a,
            Role::AuthorityB => &self.authority_b,
            Role::User => &self.user,
        }
    }

    pub fn identity(&self, role: Role) -> Identity {
        self.keypair(role).identity()
    }
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("authority_a", &self.identity(Role::AuthorityA))
            .field("authority_b", &self.identity(Role::AuthorityB))
            .field("user", &self.identity(Role::User))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn secrets() -> HashMap<&'static str, String> {
        HashMap::from([
            (WALLET_A_VAR, bs58_seed(1)),
            (WALLET_B_VAR, bs58_seed(2)),
            (WALLET_C_VAR, bs58_seed(3)),
        ])
    }

    fn bs58_seed(n: u8) -> String {
        tokenlife_types::Identity::new([n; 32]).to_base58()
    }

    #[test]
    fn loads_three_distinct_wallets() {
        let env = secrets();
        let wallets = WalletConfig::from_lookup(|v| env.get(v).cloned()).unwrap();
        assert_ne!(wallets.identity(Role::AuthorityA), wallets.identity(Role::User));
    }

    #[test]
    fn missing_secret_names_the_variable() {
        let mut env = secrets();
        env.remove(WALLET_B_VAR);
        let err = WalletConfig::from_lookup(|v| env.get(v).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(WALLET_B_VAR)));
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        let mut env = secrets();
        env.insert(WALLET_C_VAR, "   ".to_string());
        let err = WalletConfig::from_lookup(|v| env.get(v).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(WALLET_C_VAR)));
    }

    #[test]
    fn malformed_secret_is_invalid() {
        let mut env = secrets();
        env.insert(WALLET_A_VAR, "not-base58-0OIl".to_string());
        let err = WalletConfig::from_lookup(|v| env.get(v).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSecret { var: WALLET_A_VAR, .. }));
    }

    #[test]
    fn duplicate_wallets_are_rejected() {
        let mut env = secrets();
        env.insert(WALLET_C_VAR, bs58_seed(1));
        let err = WalletConfig::from_lookup(|v| env.get(v).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
