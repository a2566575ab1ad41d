//! Token state machine errors.
//!
//! Each family is its own enum so callers can match on exactly the class of
//! failure they care about; [`TokenError`] wraps them for `?` propagation.

use thiserror::Error;
use tokenlife_types::{AuthorityType, Identity};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    #[error("{signer} is not the current {kind} authority ({authority})")]
    Unauthorized {
        kind: AuthorityType,
        signer: Identity,
        authority: Identity,
    },

    #[error("{0} authority has been revoked")]
    Revoked(AuthorityType),

    #[error("{signer} does not own token account {account} (owner {owner})")]
    NotOwner {
        account: Identity,
        signer: Identity,
        owner: Identity,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("decimals {0} exceeds the maximum of 18")]
    InvalidDecimals(u8),

    #[error("amount overflows the supply range")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("insufficient balance: need {needed}, have {available}")]
    Insufficient { needed: u64, available: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("token account {0} is frozen")]
    Frozen(Identity),

    #[error("token account {0} is already frozen")]
    AlreadyFrozen(Identity),

    #[error("token account {0} is already thawed")]
    AlreadyThawed(Identity),

    #[error("token account {account} belongs to mint {actual}, not {expected}")]
    MintMismatch {
        account: Identity,
        expected: Identity,
        actual: Identity,
    },

    #[error("mint {0} not found")]
    UnknownMint(Identity),

    #[error("token account {0} not found")]
    UnknownAccount(Identity),

    #[error("mint {0} already exists")]
    MintExists(Identity),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error(transparent)]
    Authority(#[from] AuthorityError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Balance(#[from] BalanceError),

    #[error(transparent)]
    State(#[from] StateError),
}
