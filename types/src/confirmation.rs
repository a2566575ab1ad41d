//! Ledger confirmation tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque token returned by the ledger once a transaction is confirmed.
///
/// Ledgers derive it from the signed transaction bytes; callers only compare
/// and display it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Confirmation([u8; 32]);

impl Confirmation {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = bs58::encode(self.0).into_string();
        write!(f, "Confirmation({}..)", &full[..full.len().min(8)])
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}
