//! Nullable ledger — applies transactions in memory and injects scripted failures.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tokenlife_ledger::{
    AccountSnapshot, LedgerClient, LocalLedger, MintSnapshot, SubmitError, Transaction,
};
use tokenlife_token::TokenState;
use tokenlife_types::{Confirmation, Identity};

/// A test ledger that records submissions and fails on demand.
///
/// Backed by a fee-free [`LocalLedger`] so accepted transactions really
/// change state and queries reflect them.
pub struct NullLedger {
    backend: LocalLedger,
    submitted: Mutex<Vec<Transaction>>,
    /// Submission index (0-based) -> error returned instead of applying.
    submit_failures: Mutex<HashMap<usize, SubmitError>>,
    /// Error returned by every query while set.
    query_failure: Mutex<Option<SubmitError>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            backend: LocalLedger::new(0),
            submitted: Mutex::new(Vec::new()),
            submit_failures: Mutex::new(HashMap::new()),
            query_failure: Mutex::new(None),
        }
    }

    /// Fail the submission with the given 0-based index.
    pub fn fail_submit_at(&self, index: usize, error: SubmitError) {
        self.submit_failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(index, error);
    }

    /// Fail every query until [`clear_query_failure`](Self::clear_query_failure).
    pub fn fail_queries(&self, error: SubmitError) {
        *self.query_failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    pub fn clear_query_failure(&self) {
        *self.query_failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// All transactions passed to `submit`, including failed ones.
    pub fn submitted(&self) -> Vec<Transaction> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of the submitted operations, in order.
    pub fn submitted_operations(&self) -> Vec<&'static str> {
        self.submitted().iter().map(|tx| tx.operation.name()).collect()
    }

    /// Confirmations the backend accepted, in order.
    pub fn confirmed(&self) -> Vec<Confirmation> {
        self.backend.history()
    }

    /// A copy of the ledger-side token state.
    pub fn token_state(&self) -> TokenState {
        self.backend.token_state()
    }

    fn query_guard(&self) -> Result<(), SubmitError> {
        match self
            .query_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for NullLedger {
    async fn submit(&self, transaction: Transaction) -> Result<Confirmation, SubmitError> {
        let index = {
            let mut submitted = self.submitted.lock().unwrap_or_else(PoisonError::into_inner);
            submitted.push(transaction.clone());
            submitted.len() - 1
        };
        let scripted = self
            .submit_failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&index);
        if let Some(error) = scripted {
            tracing::debug!(index, %error, "null ledger: scripted submit failure");
            return Err(error);
        }
        self.backend.submit(transaction).await
    }

    async fn query_mint(&self, mint: &Identity) -> Result<MintSnapshot, SubmitError> {
        self.query_guard()?;
        self.backend.query_mint(mint).await
    }

    async fn query_account(&self, account: &Identity) -> Result<AccountSnapshot, SubmitError> {
        self.query_guard()?;
        self.backend.query_account(account).await
    }

    async fn query_lamports(&self, owner: &Identity) -> Result<u64, SubmitError> {
        self.query_guard()?;
        self.backend.query_lamports(owner).await
    }
}
