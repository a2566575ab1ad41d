//! The token lifecycle workflow.
//!
//! Drives a fresh mint through six phases against a [`LedgerClient`]:
//! genesis, growth, delegation, a freeze cycle, delegated growth and
//! finalization. Every step is validated locally, signed, submitted, and
//! committed to local state only once the ledger confirms it.
//!
//! [`LedgerClient`]: tokenlife_ledger::LedgerClient

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod phase;
pub mod report;
pub mod wallet;

pub use config::LifecycleConfig;
pub use error::{ConfigError, LifecycleError, LifecycleFailure};
pub use orchestrator::LifecycleOrchestrator;
pub use phase::Phase;
pub use report::{LifecycleReport, StepConfirmation};
pub use wallet::{Role, WalletConfig, WALLET_A_VAR, WALLET_B_VAR, WALLET_C_VAR};
