//! Errors raised while parsing or constructing fundamental types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
}
