//! Cryptographic primitives for the token lifecycle.
//!
//! - **Ed25519** for signing operations and verifying signers
//! - **Blake2b** for token-account derivation and confirmation tokens
//! - **base58** decoding of signer secrets as exported by common wallets

pub mod derive;
pub mod hash;
pub mod keys;
pub mod sign;

pub use derive::derive_token_account;
pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{
    generate_keypair, keypair_from_base58, keypair_from_private, keypair_from_seed,
    public_from_private, KeyError,
};
pub use sign::{sign_message, verify_signature};
