//! Fundamental types for the token lifecycle workspace.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! identities, authorities, token amounts, key material and ledger confirmations.

pub mod amount;
pub mod authority;
pub mod confirmation;
pub mod error;
pub mod identity;
pub mod keys;

pub use amount::{TokenAmount, MAX_DECIMALS};
pub use authority::{Authority, AuthorityType};
pub use confirmation::Confirmation;
pub use error::TypesError;
pub use identity::Identity;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
