//! Operations that mutate token state, and their outcomes.

use serde::{Deserialize, Serialize};
use tokenlife_types::{AuthorityType, Identity, TokenAmount};

use crate::accounts::FreezeTransition;
use crate::authority::AuthorityTransition;

/// A single state-changing request against a mint or its accounts.
///
/// Every variant carries the identity that must sign it; see [`Operation::signer`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    CreateMint {
        mint: Identity,
        payer: Identity,
        mint_authority: Identity,
        freeze_authority: Option<Identity>,
        decimals: u8,
    },
    CreateAccount {
        mint: Identity,
        holder: Identity,
        payer: Identity,
    },
    MintTo {
        mint: Identity,
        destination: Identity,
        authority: Identity,
        amount: TokenAmount,
    },
    Transfer {
        source: Identity,
        destination: Identity,
        owner: Identity,
        amount: TokenAmount,
    },
    SetAuthority {
        mint: Identity,
        kind: AuthorityType,
        current: Identity,
        new: Option<Identity>,
    },
    FreezeAccount {
        account: Identity,
        mint: Identity,
        authority: Identity,
    },
    ThawAccount {
        account: Identity,
        mint: Identity,
        authority: Identity,
    },
}

impl Operation {
    /// The identity whose signature authorizes this operation.
    pub fn signer(&self) -> &Identity {
        match self {
            Operation::CreateMint { payer, .. } => payer,
            Operation::CreateAccount { payer, .. } => payer,
            Operation::MintTo { authority, .. } => authority,
            Operation::Transfer { owner, .. } => owner,
            Operation::SetAuthority { current, .. } => current,
            Operation::FreezeAccount { authority, .. } => authority,
            Operation::ThawAccount { authority, .. } => authority,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateMint { .. } => "create_mint",
            Operation::CreateAccount { .. } => "create_account",
            Operation::MintTo { .. } => "mint_to",
            Operation::Transfer { .. } => "transfer",
            Operation::SetAuthority { .. } => "set_authority",
            Operation::FreezeAccount { .. } => "freeze_account",
            Operation::ThawAccount { .. } => "thaw_account",
        }
    }
}

/// What an applied operation changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    MintCreated {
        mint: Identity,
    },
    /// `created` is false when the account already existed.
    AccountReady {
        account: Identity,
        created: bool,
    },
    Issued {
        account: Identity,
        amount: TokenAmount,
        supply: TokenAmount,
    },
    Transferred {
        source: Identity,
        destination: Identity,
        amount: TokenAmount,
    },
    AuthorityChanged(AuthorityTransition),
    FreezeChanged(FreezeTransition),
}
