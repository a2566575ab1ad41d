//! Lifecycle error types.

use thiserror::Error;
use tokenlife_crypto::KeyError;
use tokenlife_ledger::{SubmitError, TransactionError};
use tokenlife_token::TokenError;

use crate::phase::Phase;

/// Startup configuration problems. Always fatal, raised before any ledger call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("{var} does not hold a valid secret key: {source}")]
    InvalidSecret {
        var: &'static str,
        #[source]
        source: KeyError,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Why a lifecycle step failed.
#[derive(Debug, Error)]
pub enum LifecycleFailure {
    /// Local validation rejected the operation; nothing was submitted.
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Encode(#[from] TransactionError),

    /// The ledger reports state that differs from the locally committed state.
    #[error("ledger diverged from local state: {0}")]
    Diverged(String),
}

/// A failed step, tagged with where the workflow halted.
#[derive(Debug, Error)]
#[error("{phase} failed at step '{step}'")]
pub struct LifecycleError {
    pub phase: Phase,
    pub step: &'static str,
    #[source]
    pub source: LifecycleFailure,
}

impl LifecycleError {
    pub fn new(phase: Phase, step: &'static str, source: impl Into<LifecycleFailure>) -> Self {
        Self {
            phase,
            step,
            source: source.into(),
        }
    }

    /// True if the failure came from the ledger rather than local validation.
    pub fn is_ledger_failure(&self) -> bool {
        matches!(
            self.source,
            LifecycleFailure::Submit(_) | LifecycleFailure::Diverged(_)
        )
    }
}
