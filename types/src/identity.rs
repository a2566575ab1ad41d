//! Identity type shared by signers, holders, mints and token accounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;
use crate::keys::PublicKey;

/// A 32-byte ledger identity, displayed in base58.
///
/// Signers and holders use their Ed25519 public key directly. Token accounts
/// use an identity derived from `(mint, holder)`, see
/// `tokenlife_crypto::derive_token_account`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity([u8; 32]);

impl Identity {
    pub const LEN: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self(public_key.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The public key this identity verifies signatures with.
    pub fn to_public_key(&self) -> PublicKey {
        PublicKey(self.0)
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl From<&PublicKey> for Identity {
    fn from(public_key: &PublicKey) -> Self {
        Self::from_public_key(public_key)
    }
}

impl FromStr for Identity {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| TypesError::InvalidIdentity(format!("{s}: {e}")))?;
        let arr: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            TypesError::InvalidIdentity(format!("{s}: expected 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = self.to_base58();
        write!(f, "Identity({}..)", &full[..full.len().min(8)])
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base58_roundtrip_through_from_str() {
        let id = Identity::new([7u8; 32]);
        let parsed: Identity = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_wrong_length() {
        let short = bs58::encode([1u8; 16]).into_string();
        assert!(matches!(
            short.parse::<Identity>(),
            Err(TypesError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn rejects_non_base58_characters() {
        assert!("0OIl".parse::<Identity>().is_err());
    }

    #[test]
    fn public_key_conversion_preserves_bytes() {
        let pk = PublicKey([3u8; 32]);
        let id = Identity::from(&pk);
        assert_eq!(id.to_public_key(), pk);
    }
}
