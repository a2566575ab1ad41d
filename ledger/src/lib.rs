//! The ledger capability the token lifecycle submits to.
//!
//! The core never talks to a network directly. Everything that crosses into
//! the ledger goes through [`LedgerClient`]: submitting a signed
//! [`Transaction`] and reading back [`MintSnapshot`]/[`AccountSnapshot`]
//! to verify post-conditions.
//!
//! [`LocalLedger`] is an in-process ledger that validates and applies
//! transactions with the same state machine the orchestrator uses.
//! [`Retrying`] layers a retry policy for transient network failures on
//! top of any client.

pub mod client;
pub mod error;
pub mod local;
pub mod retry;
pub mod snapshot;
pub mod transaction;

pub use client::LedgerClient;
pub use error::{SubmitError, TransactionError};
pub use local::{LocalLedger, DEFAULT_FEE_LAMPORTS};
pub use retry::{RetryPolicy, Retrying};
pub use snapshot::{AccountSnapshot, MintSnapshot};
pub use transaction::Transaction;
