//! Nullable infrastructure for deterministic testing.
//!
//! The ledger is the lifecycle's only external dependency, reached through
//! `LedgerClient`. [`NullLedger`] implements that trait in memory and can be
//! controlled programmatically:
//! - every submitted transaction is recorded for assertions
//! - failures can be scripted for the Nth submission or query
//! - nothing touches the network
//!
//! Usage: pass a `NullLedger` wherever a real client would go.

pub mod ledger;

pub use ledger::NullLedger;
