//! Mint registry: supply and authority state for each mint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokenlife_types::{Authority, AuthorityType, Identity, TokenAmount, MAX_DECIMALS};

use crate::authority::{AuthorityEngine, AuthorityTransition};
use crate::error::{StateError, TokenError, ValueError};

/// A token mint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mint {
    /// Address of the mint.
    pub address: Identity,
    /// Decimal places of the smallest unit. Fixed at creation.
    pub decimals: u8,
    /// Total issued supply. Never decreases.
    pub total_supply: TokenAmount,
    /// Who may increase supply.
    pub mint_authority: Authority,
    /// Who may freeze and thaw token accounts.
    pub freeze_authority: Authority,
}

impl Mint {
    pub fn authority(&self, kind: AuthorityType) -> &Authority {
        match kind {
            AuthorityType::MintTokens => &self.mint_authority,
            AuthorityType::FreezeAccount => &self.freeze_authority,
        }
    }

    fn authority_mut(&mut self, kind: AuthorityType) -> &mut Authority {
        match kind {
            AuthorityType::MintTokens => &mut self.mint_authority,
            AuthorityType::FreezeAccount => &mut self.freeze_authority,
        }
    }
}

/// Owns every mint's mutable state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MintRegistry {
    mints: HashMap<Identity, Mint>,
}

impl MintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new mint with zero supply.
    ///
    /// `freeze_authority = None` creates the mint with freezing already revoked.
    pub fn create_mint(
        &mut self,
        address: Identity,
        mint_authority: Identity,
        freeze_authority: Option<Identity>,
        decimals: u8,
    ) -> Result<&Mint, TokenError> {
        if decimals > MAX_DECIMALS {
            return Err(ValueError::InvalidDecimals(decimals).into());
        }
        if self.mints.contains_key(&address) {
            return Err(StateError::MintExists(address).into());
        }
        let mint = Mint {
            address,
            decimals,
            total_supply: TokenAmount::ZERO,
            mint_authority: Authority::Active(mint_authority),
            freeze_authority: Authority::from_option(freeze_authority),
        };
        Ok(self.mints.entry(address).or_insert(mint))
    }

    pub fn get(&self, address: &Identity) -> Option<&Mint> {
        self.mints.get(address)
    }

    /// Like [`get`](Self::get), but an unknown mint is an error.
    pub fn mint(&self, address: &Identity) -> Result<&Mint, StateError> {
        self.mints
            .get(address)
            .ok_or(StateError::UnknownMint(*address))
    }

    fn mint_mut(&mut self, address: &Identity) -> Result<&mut Mint, StateError> {
        self.mints
            .get_mut(address)
            .ok_or(StateError::UnknownMint(*address))
    }

    pub fn len(&self) -> usize {
        self.mints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mints.is_empty()
    }

    /// Replace the authority in slot `kind`, signed by the current authority.
    pub fn set_authority(
        &mut self,
        mint: &Identity,
        kind: AuthorityType,
        signer: &Identity,
        new: Option<Identity>,
    ) -> Result<AuthorityTransition, TokenError> {
        let mint = self.mint_mut(mint)?;
        let transition = AuthorityEngine::transition(kind, mint.authority(kind), signer, new)?;
        *mint.authority_mut(kind) = transition.to;
        Ok(transition)
    }

    pub fn set_mint_authority(
        &mut self,
        mint: &Identity,
        signer: &Identity,
        new: Option<Identity>,
    ) -> Result<AuthorityTransition, TokenError> {
        self.set_authority(mint, AuthorityType::MintTokens, signer, new)
    }

    pub fn set_freeze_authority(
        &mut self,
        mint: &Identity,
        signer: &Identity,
        new: Option<Identity>,
    ) -> Result<AuthorityTransition, TokenError> {
        self.set_authority(mint, AuthorityType::FreezeAccount, signer, new)
    }

    /// Validate an issuance without applying it. Returns the resulting supply.
    pub fn check_increase(
        &self,
        mint: &Identity,
        signer: &Identity,
        amount: TokenAmount,
    ) -> Result<TokenAmount, TokenError> {
        let mint = self.mint(mint)?;
        AuthorityEngine::authorize(AuthorityType::MintTokens, &mint.mint_authority, signer)?;
        if amount.is_zero() {
            return Err(ValueError::InvalidAmount.into());
        }
        Ok(mint
            .total_supply
            .checked_add(amount)
            .ok_or(ValueError::Overflow)?)
    }

    /// Add `amount` to total supply. Returns the new supply.
    ///
    /// Crediting a holder is the caller's job; see `TokenState` for the
    /// combined issuance.
    pub fn increase_supply(
        &mut self,
        mint: &Identity,
        signer: &Identity,
        amount: TokenAmount,
    ) -> Result<TokenAmount, TokenError> {
        let new_supply = self.check_increase(mint, signer, amount)?;
        self.mint_mut(mint)?.total_supply = new_supply;
        Ok(new_supply)
    }
}
