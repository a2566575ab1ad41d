use thiserror::Error;

/// Why the ledger did not confirm a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Transport failure; the transaction may or may not have landed.
    #[error("network error: {0}")]
    Network(String),

    /// The signer cannot pay the transaction fee (native balance, not tokens).
    #[error("insufficient funds for fee: need {needed} lamports, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    /// The ledger validated the transaction and refused it.
    #[error("rejected by ledger: {0}")]
    RejectedByLedger(String),
}

impl SubmitError {
    /// Only transport failures are worth retrying; the rest will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Network(_))
    }
}

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("failed to encode operation: {0}")]
    Encode(#[from] bincode::Error),
}
