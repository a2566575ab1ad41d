//! Ed25519 key generation and secret decoding.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use thiserror::Error;
use tokenlife_types::{KeyPair, PrivateKey, PublicKey};
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("secret is not valid base58: {0}")]
    Base58(String),

    #[error("secret must be 32 or 64 bytes, got {0}")]
    Length(usize),

    #[error("public half of the 64-byte keypair does not match its secret")]
    PublicMismatch,
}

/// Generate a new Ed25519 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&private.0);
    PublicKey(signing_key.verifying_key().to_bytes())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = public_from_private(&private);
    KeyPair { public, private }
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    keypair_from_private(PrivateKey(*seed))
}

/// Decode a base58 signer secret.
///
/// Accepts either the 64-byte `seed || public` layout that wallet exports use,
/// or a bare 32-byte seed. For the 64-byte form the embedded public key must
/// match the one derived from the seed.
pub fn keypair_from_base58(secret: &str) -> Result<KeyPair, KeyError> {
    let bytes = Zeroizing::new(
        bs58::decode(secret.trim())
            .into_vec()
            .map_err(|e| KeyError::Base58(e.to_string()))?,
    );
    match bytes.len() {
        32 => {
            let mut seed = [0u8; 32];
            seed.copy_from_slice(&bytes);
            Ok(keypair_from_private(PrivateKey(seed)))
        }
        64 => {
            let mut seed = [0u8; 32];
            seed.copy_from_slice(&bytes[..32]);
            let keypair = keypair_from_private(PrivateKey(seed));
            if keypair.public.0[..] != bytes[32..] {
                return Err(KeyError::PublicMismatch);
            }
            Ok(keypair)
        }
        other => Err(KeyError::Length(other)),
    }
}
