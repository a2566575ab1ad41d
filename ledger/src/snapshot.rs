//! Read-only views of ledger state, used to verify post-conditions.

use serde::{Deserialize, Serialize};
use tokenlife_token::{Mint, TokenAccount};
use tokenlife_types::{Authority, Identity, TokenAmount};

/// A mint as the ledger currently reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintSnapshot {
    pub address: Identity,
    pub decimals: u8,
    pub supply: TokenAmount,
    pub mint_authority: Authority,
    pub freeze_authority: Authority,
}

impl From<&Mint> for MintSnapshot {
    fn from(mint: &Mint) -> Self {
        Self {
            address: mint.address,
            decimals: mint.decimals,
            supply: mint.total_supply,
            mint_authority: mint.mint_authority,
            freeze_authority: mint.freeze_authority,
        }
    }
}

/// A token account as the ledger currently reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub address: Identity,
    pub mint: Identity,
    pub owner: Identity,
    pub amount: TokenAmount,
    pub is_frozen: bool,
}

impl From<&TokenAccount> for AccountSnapshot {
    fn from(account: &TokenAccount) -> Self {
        Self {
            address: account.address,
            mint: account.mint,
            owner: account.owner,
            amount: account.balance,
            is_frozen: account.frozen,
        }
    }
}
