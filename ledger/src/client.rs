//! The `LedgerClient` capability.

use async_trait::async_trait;
use std::sync::Arc;
use tokenlife_types::{Confirmation, Identity};

use crate::error::SubmitError;
use crate::snapshot::{AccountSnapshot, MintSnapshot};
use crate::transaction::Transaction;

/// Everything the lifecycle needs from a ledger.
///
/// Each call is a suspension point and may block, fail, or be cancelled.
/// Implementations own timeout and retry policy; callers never retry implicitly.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submit a signed transaction and wait for confirmation.
    async fn submit(&self, transaction: Transaction) -> Result<Confirmation, SubmitError>;

    async fn query_mint(&self, mint: &Identity) -> Result<MintSnapshot, SubmitError>;

    async fn query_account(&self, account: &Identity) -> Result<AccountSnapshot, SubmitError>;

    /// Native (fee-paying) balance of a wallet, in lamports.
    async fn query_lamports(&self, owner: &Identity) -> Result<u64, SubmitError>;
}

#[async_trait]
impl<T: LedgerClient + ?Sized> LedgerClient for Arc<T> {
    async fn submit(&self, transaction: Transaction) -> Result<Confirmation, SubmitError> {
        (**self).submit(transaction).await
    }

    async fn query_mint(&self, mint: &Identity) -> Result<MintSnapshot, SubmitError> {
        (**self).query_mint(mint).await
    }

    async fn query_account(&self, account: &Identity) -> Result<AccountSnapshot, SubmitError> {
        (**self).query_account(account).await
    }

    async fn query_lamports(&self, owner: &Identity) -> Result<u64, SubmitError> {
        (**self).query_lamports(owner).await
    }
}
