//! Retry policy for transient ledger failures.
//!
//! Only `SubmitError::Network` is retried, with exponential backoff. Ledger
//! rejections and fee shortfalls are returned on the first attempt.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokenlife_types::{Confirmation, Identity};

use crate::client::LedgerClient;
use crate::error::SubmitError;
use crate::snapshot::{AccountSnapshot, MintSnapshot};
use crate::transaction::Transaction;

#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts including the first. Zero is treated as one.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Upper bound for a single attempt; elapsed attempts count as network errors.
    pub attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
            attempt_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl RetryPolicy {
    /// Never retry and never time out.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            attempt_timeout: None,
        }
    }

    /// Backoff before retry number `retry` (1-based), doubling up to `max_backoff`.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// A client wrapper that retries network failures of the inner client.
pub struct Retrying<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: LedgerClient> Retrying<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    async fn attempt<T, Fut>(&self, what: &str, fut: Fut) -> Result<T, SubmitError>
    where
        Fut: Future<Output = Result<T, SubmitError>>,
    {
        match self.policy.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.unwrap_or_else(|_| {
                Err(SubmitError::Network(format!("{what} timed out after {limit:?}")))
            }),
            None => fut.await,
        }
    }

    async fn with_retry<T, F, Fut>(&self, what: &str, call: F) -> Result<T, SubmitError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, SubmitError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.attempt(what, call()).await {
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = self.policy.backoff(attempt);
                    tracing::warn!(
                        what,
                        attempt,
                        max_attempts,
                        ?delay,
                        error = %e,
                        "ledger call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[async_trait]
impl<C: LedgerClient> LedgerClient for Retrying<C> {
    async fn submit(&self, transaction: Transaction) -> Result<Confirmation, SubmitError> {
        self.with_retry("submit", || self.inner.submit(transaction.clone()))
            .await
    }

    async fn query_mint(&self, mint: &Identity) -> Result<MintSnapshot, SubmitError> {
        self.with_retry("query_mint", || self.inner.query_mint(mint)).await
    }

    async fn query_account(&self, account: &Identity) -> Result<AccountSnapshot, SubmitError> {
        self.with_retry("query_account", || self.inner.query_account(account))
            .await
    }

    async fn query_lamports(&self, owner: &Identity) -> Result<u64, SubmitError> {
        self.with_retry("query_lamports", || self.inner.query_lamports(owner))
            .await
    }
}
