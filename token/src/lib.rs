//! Token mint state machine.
//!
//! A mint tracks total supply, decimals and two administrative authorities
//! (mint and freeze). Token accounts hold per-holder balances against exactly
//! one mint and can be frozen by the freeze authority.
//!
//! - [`MintRegistry`] owns mint state and supply issuance.
//! - [`AccountLedger`] owns balances, transfers and the frozen flag.
//! - [`AuthorityEngine`] is the only place the authority rules live: the
//!   current authority signs every change, and `Revoked` is terminal.
//! - [`TokenState`] applies a signed [`Operation`] against both, atomically.

pub mod accounts;
pub mod authority;
pub mod error;
pub mod operation;
pub mod registry;
pub mod state;

pub use accounts::{AccountLedger, FreezeTransition, TokenAccount};
pub use authority::{AuthorityEngine, AuthorityTransition};
pub use error::{AuthorityError, BalanceError, StateError, TokenError, ValueError};
pub use operation::{Operation, Outcome};
pub use registry::{Mint, MintRegistry};
pub use state::TokenState;
