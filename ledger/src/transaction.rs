//! Signed transactions.

use serde::{Deserialize, Serialize};
use tokenlife_crypto::{blake2b_256_multi, sign_message, verify_signature};
use tokenlife_token::Operation;
use tokenlife_types::{Confirmation, Identity, KeyPair, PublicKey, Signature};

use crate::error::TransactionError;

/// One operation, signed by the identity that authorizes it.
///
/// The signer also pays the transaction fee. `nonce` distinguishes two
/// otherwise identical operations so the ledger does not treat the second
/// as a replay of the first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub operation: Operation,
    pub nonce: u64,
    pub signer: PublicKey,
    pub signature: Signature,
}

impl Transaction {
    /// The bytes a signer commits to.
    pub fn message(operation: &Operation, nonce: u64) -> Result<Vec<u8>, TransactionError> {
        Ok(bincode::serialize(&(operation, nonce))?)
    }

    pub fn sign(operation: Operation, nonce: u64, keypair: &KeyPair) -> Result<Self, TransactionError> {
        let message = Self::message(&operation, nonce)?;
        let signature = sign_message(&message, &keypair.private);
        Ok(Self {
            operation,
            nonce,
            signer: keypair.public,
            signature,
        })
    }

    pub fn signer_identity(&self) -> Identity {
        Identity::from_public_key(&self.signer)
    }

    /// Whether the signature is valid for this operation and nonce.
    pub fn verify(&self) -> bool {
        match Self::message(&self.operation, self.nonce) {
            Ok(message) => verify_signature(&message, &self.signature, &self.signer),
            Err(_) => false,
        }
    }

    /// Whether the signature comes from the identity the operation requires.
    pub fn is_signed_by_required_signer(&self) -> bool {
        self.signer_identity() == *self.operation.signer()
    }

    /// Deterministic confirmation token for this exact transaction.
    ///
    /// Covers the signer key as well, so swapping the signer changes it.
    pub fn confirmation(&self) -> Confirmation {
        let message = Self::message(&self.operation, self.nonce).unwrap_or_default();
        Confirmation::new(blake2b_256_multi(&[
            &message,
            self.signer.as_bytes(),
            self.signature.as_bytes(),
        ]))
    }
}
