//! In-process ledger.
//!
//! Validates signatures, charges a flat per-transaction fee in lamports and
//! applies operations to its own `TokenState`. One lock guards all state, so
//! at most one mutating transaction is in flight at a time.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokenlife_token::TokenState;
use tokenlife_types::{Confirmation, Identity};

use crate::client::LedgerClient;
use crate::error::SubmitError;
use crate::snapshot::{AccountSnapshot, MintSnapshot};
use crate::transaction::Transaction;

/// Flat fee charged to the signer of every confirmed transaction.
pub const DEFAULT_FEE_LAMPORTS: u64 = 5_000;

#[derive(Default)]
struct LedgerState {
    tokens: TokenState,
    lamports: HashMap<Identity, u64>,
    confirmed: HashSet<Confirmation>,
    history: Vec<Confirmation>,
}

pub struct LocalLedger {
    state: Mutex<LedgerState>,
    fee_lamports: u64,
}

impl LocalLedger {
    pub fn new(fee_lamports: u64) -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
            fee_lamports,
        }
    }

    pub fn fee_lamports(&self) -> u64 {
        self.fee_lamports
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Credit native lamports to a wallet so it can pay fees.
    pub fn airdrop(&self, owner: &Identity, lamports: u64) {
        let mut state = self.lock();
        let balance = state.lamports.entry(*owner).or_default();
        *balance = balance.saturating_add(lamports);
        tracing::debug!(%owner, lamports, "airdrop");
    }

    /// Confirmations in the order the ledger accepted them.
    pub fn history(&self) -> Vec<Confirmation> {
        self.lock().history.clone()
    }

    /// A copy of the ledger's token state.
    pub fn token_state(&self) -> TokenState {
        self.lock().tokens.clone()
    }

    fn process(&self, transaction: &Transaction) -> Result<Confirmation, SubmitError> {
        if !transaction.verify() {
            return Err(SubmitError::RejectedByLedger(
                "signature verification failed".to_string(),
            ));
        }
        if !transaction.is_signed_by_required_signer() {
            return Err(SubmitError::RejectedByLedger(format!(
                "{} requires a signature from {}, got {}",
                transaction.operation.name(),
                transaction.operation.signer(),
                transaction.signer_identity()
            )));
        }

        let confirmation = transaction.confirmation();
        let mut state = self.lock();

        // Replays of a confirmed transaction return the original confirmation.
        if state.confirmed.contains(&confirmation) {
            return Ok(confirmation);
        }

        let payer = transaction.signer_identity();
        let available = state.lamports.get(&payer).copied().unwrap_or(0);
        if available < self.fee_lamports {
            return Err(SubmitError::InsufficientFunds {
                needed: self.fee_lamports,
                available,
            });
        }

        let outcome = state
            .tokens
            .apply(&transaction.operation)
            .map_err(|e| SubmitError::RejectedByLedger(e.to_string()))?;

        state.lamports.insert(payer, available - self.fee_lamports);
        state.confirmed.insert(confirmation);
        state.history.push(confirmation);
        tracing::debug!(
            operation = transaction.operation.name(),
            %confirmation,
            ?outcome,
            "transaction confirmed"
        );
        Ok(confirmation)
    }
}

impl Default for LocalLedger {
    fn default() -> Self {
        Self::new(DEFAULT_FEE_LAMPORTS)
    }
}

#[async_trait]
impl LedgerClient for LocalLedger {
    async fn submit(&self, transaction: Transaction) -> Result<Confirmation, SubmitError> {
        self.process(&transaction)
    }

    async fn query_mint(&self, mint: &Identity) -> Result<MintSnapshot, SubmitError> {
        let state = self.lock();
        state
            .tokens
            .mint(mint)
            .map(MintSnapshot::from)
            .map_err(|e| SubmitError::RejectedByLedger(e.to_string()))
    }

    async fn query_account(&self, account: &Identity) -> Result<AccountSnapshot, SubmitError> {
        let state = self.lock();
        state
            .tokens
            .account(account)
            .map(AccountSnapshot::from)
            .map_err(|e| SubmitError::RejectedByLedger(e.to_string()))
    }

    async fn query_lamports(&self, owner: &Identity) -> Result<u64, SubmitError> {
        Ok(self.lock().lamports.get(owner).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenlife_crypto::keypair_from_seed;
    use tokenlife_token::Operation;
    use tokenlife_types::{Authority, KeyPair, TokenAmount};

    fn create_mint(payer: &KeyPair, mint: Identity) -> Operation {
        Operation::CreateMint {
            mint,
            payer: payer.identity(),
            mint_authority: payer.identity(),
            freeze_authority: None,
            decimals: 6,
        }
    }

    #[tokio::test]
    async fn confirms_and_charges_fee() {
        let ledger = LocalLedger::new(100);
        let a = keypair_from_seed(&[1u8; 32]);
        ledger.airdrop(&a.identity(), 1_000);

        let mint = Identity::new([50u8; 32]);
        let tx = Transaction::sign(create_mint(&a, mint), 0, &a).unwrap();
        let confirmation = ledger.submit(tx).await.unwrap();

        assert_eq!(ledger.history(), vec![confirmation]);
        assert_eq!(ledger.query_lamports(&a.identity()).await.unwrap(), 900);
        let snapshot = ledger.query_mint(&mint).await.unwrap();
        assert_eq!(snapshot.mint_authority, Authority::Active(a.identity()));
        assert_eq!(snapshot.freeze_authority, Authority::Revoked);
        assert_eq!(snapshot.supply, TokenAmount::ZERO);
    }

    #[tokio::test]
    async fn replay_returns_same_confirmation_without_reapplying() {
        let ledger = LocalLedger::new(100);
        let a = keypair_from_seed(&[1u8; 32]);
        ledger.airdrop(&a.identity(), 1_000);

        let tx = Transaction::sign(create_mint(&a, Identity::new([50u8; 32])), 0, &a).unwrap();
        let first = ledger.submit(tx.clone()).await.unwrap();
        let second = ledger.submit(tx).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(ledger.history().len(), 1);
        assert_eq!(ledger.query_lamports(&a.identity()).await.unwrap(), 900);
    }

    #[tokio::test]
    async fn replay_with_swapped_signer_is_rejected() {
        let ledger = LocalLedger::new(100);
        let a = keypair_from_seed(&[1u8; 32]);
        let b = keypair_from_seed(&[2u8; 32]);
        ledger.airdrop(&a.identity(), 1_000);
        ledger.airdrop(&b.identity(), 1_000);

        let tx = Transaction::sign(create_mint(&a, Identity::new([50u8; 32])), 0, &a).unwrap();
        ledger.submit(tx.clone()).await.unwrap();

        let mut forged = tx;
        forged.signer = b.public;
        assert!(matches!(
            ledger.submit(forged).await,
            Err(SubmitError::RejectedByLedger(_))
        ));
        assert_eq!(ledger.history().len(), 1);
        assert_eq!(ledger.query_lamports(&b.identity()).await.unwrap(), 1_000);
    }

    #[tokio::test]
    async fn unfunded_signer_gets_insufficient_funds() {
        let ledger = LocalLedger::new(100);
        let a = keypair_from_seed(&[1u8; 32]);
        let tx = Transaction::sign(create_mint(&a, Identity::new([50u8; 32])), 0, &a).unwrap();
        let err = ledger.submit(tx).await.unwrap_err();
        assert_eq!(err, SubmitError::InsufficientFunds { needed: 100, available: 0 });
        assert!(ledger.token_state().mints.is_empty());
    }

    #[tokio::test]
    async fn wrong_signer_is_rejected() {
        let ledger = LocalLedger::new(0);
        let a = keypair_from_seed(&[1u8; 32]);
        let b = keypair_from_seed(&[2u8; 32]);
        let tx = Transaction::sign(create_mint(&a, Identity::new([50u8; 32])), 0, &b).unwrap();
        assert!(matches!(
            ledger.submit(tx).await,
            Err(SubmitError::RejectedByLedger(_))
        ));
    }

    #[tokio::test]
    async fn invalid_operation_is_rejected_and_free() {
        let ledger = LocalLedger::new(100);
        let a = keypair_from_seed(&[1u8; 32]);
        ledger.airdrop(&a.identity(), 1_000);

        let op = Operation::MintTo {
            mint: Identity::new([50u8; 32]),
            destination: Identity::new([51u8; 32]),
            authority: a.identity(),
            amount: TokenAmount::new(1),
        };
        let tx = Transaction::sign(op, 0, &a).unwrap();
        let err = ledger.submit(tx).await.unwrap_err();
        assert!(matches!(err, SubmitError::RejectedByLedger(msg) if msg.contains("not found")));
        assert_eq!(ledger.query_lamports(&a.identity()).await.unwrap(), 1_000);
    }

    #[tokio::test]
    async fn querying_unknown_account_is_rejected() {
        let ledger = LocalLedger::default();
        assert!(ledger.query_account(&Identity::new([3u8; 32])).await.is_err());
        assert_eq!(ledger.fee_lamports(), DEFAULT_FEE_LAMPORTS);
    }
}
