//! Account ledger: per-holder token balances and frozen flags.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokenlife_crypto::derive_token_account;
use tokenlife_types::{AuthorityType, Identity, TokenAmount};

use crate::authority::AuthorityEngine;
use crate::error::{BalanceError, StateError, TokenError, ValueError};
use crate::registry::Mint;

/// A holder's balance of one mint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
    /// Derived from `(mint, owner)`.
    pub address: Identity,
    /// The mint this account holds. Never changes.
    pub mint: Identity,
    /// The holder allowed to move funds out.
    pub owner: Identity,
    pub balance: TokenAmount,
    pub frozen: bool,
}

/// Result of a freeze or thaw that changed state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreezeTransition {
    Frozen(Identity),
    Thawed(Identity),
}

/// Owns every token account.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccountLedger {
    accounts: HashMap<Identity, TokenAccount>,
}

impl AccountLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the account for `(mint, holder)`, creating an empty one if needed.
    pub fn get_or_create_account(&mut self, mint: &Identity, holder: &Identity) -> &TokenAccount {
        let address = derive_token_account(mint, holder);
        self.accounts
            .entry(address)
            .or_insert_with(|| TokenAccount {
                address,
                mint: *mint,
                owner: *holder,
                balance: TokenAmount::ZERO,
                frozen: false,
            })
    }

    pub fn get(&self, address: &Identity) -> Option<&TokenAccount> {
        self.accounts.get(address)
    }

    /// Look up the account for `(mint, holder)` without creating it.
    pub fn find(&self, mint: &Identity, holder: &Identity) -> Option<&TokenAccount> {
        self.accounts.get(&derive_token_account(mint, holder))
    }

    /// Like [`get`](Self::get), but an unknown account is an error.
    pub fn account(&self, address: &Identity) -> Result<&TokenAccount, StateError> {
        self.accounts
            .get(address)
            .ok_or(StateError::UnknownAccount(*address))
    }

    fn account_mut(&mut self, address: &Identity) -> Result<&mut TokenAccount, StateError> {
        self.accounts
            .get_mut(address)
            .ok_or(StateError::UnknownAccount(*address))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Validate a credit without applying it. Returns the resulting balance.
    pub fn check_credit(&self, address: &Identity, amount: TokenAmount) -> Result<TokenAmount, TokenError> {
        let account = self.account(address)?;
        if amount.is_zero() {
            return Err(ValueError::InvalidAmount.into());
        }
        if account.frozen {
            return Err(StateError::Frozen(*address).into());
        }
        Ok(account
            .balance
            .checked_add(amount)
            .ok_or(ValueError::Overflow)?)
    }

    /// Add `amount` to the account balance. Returns the new balance.
    pub fn credit(&mut self, address: &Identity, amount: TokenAmount) -> Result<TokenAmount, TokenError> {
        let balance = self.check_credit(address, amount)?;
        self.account_mut(address)?.balance = balance;
        Ok(balance)
    }

    /// Remove `amount` from the account balance. Returns the new balance.
    pub fn debit(&mut self, address: &Identity, amount: TokenAmount) -> Result<TokenAmount, TokenError> {
        let account = self.account_mut(address)?;
        if account.frozen {
            return Err(StateError::Frozen(*address).into());
        }
        let balance = account
            .balance
            .checked_sub(amount)
            .ok_or(BalanceError::Insufficient {
                needed: amount.raw(),
                available: account.balance.raw(),
            })?;
        account.balance = balance;
        Ok(balance)
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// Debits first, then credits; a failed credit restores the debited
    /// balance so no partial transfer is observable.
    pub fn transfer(&mut self, from: &Identity, to: &Identity, amount: TokenAmount) -> Result<(), TokenError> {
        let source_mint = self.account(from)?.mint;
        let destination = self.account(to)?;
        if destination.mint != source_mint {
            return Err(StateError::MintMismatch {
                account: *to,
                expected: source_mint,
                actual: destination.mint,
            }
            .into());
        }

        let before = self.account(from)?.balance;
        self.debit(from, amount)?;
        if let Err(e) = self.credit(to, amount) {
            self.account_mut(from)?.balance = before;
            return Err(e);
        }
        Ok(())
    }

    /// Freeze (`frozen = true`) or thaw an account, signed by the mint's
    /// freeze authority.
    ///
    /// A request that would not change the flag fails with `AlreadyFrozen`
    /// or `AlreadyThawed` so redundant calls stay visible to the caller.
    pub fn set_frozen(
        &mut self,
        address: &Identity,
        signer: &Identity,
        mint: &Mint,
        frozen: bool,
    ) -> Result<FreezeTransition, TokenError> {
        AuthorityEngine::authorize(AuthorityType::FreezeAccount, &mint.freeze_authority, signer)?;
        let account = self.account_mut(address)?;
        if account.mint != mint.address {
            return Err(StateError::MintMismatch {
                account: *address,
                expected: mint.address,
                actual: account.mint,
            }
            .into());
        }
        match (account.frozen, frozen) {
            (true, true) => Err(StateError::AlreadyFrozen(*address).into()),
            (false, false) => Err(StateError::AlreadyThawed(*address).into()),
            (false, true) => {
                account.frozen = true;
                Ok(FreezeTransition::Frozen(*address))
            }
            (true, false) => {
                account.frozen = false;
                Ok(FreezeTransition::Thawed(*address))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthorityError;
    use crate::registry::MintRegistry;

    fn id(n: u8) -> Identity {
        Identity::new([n; 32])
    }

    struct Fixture {
        registry: MintRegistry,
        ledger: AccountLedger,
        mint: Identity,
        alice: Identity,
        bob: Identity,
    }

    fn fixture() -> Fixture {
        let mut registry = MintRegistry::new();
        let mint = id(100);
        registry.create_mint(mint, id(1), Some(id(2)), 9).unwrap();
        let mut ledger = AccountLedger::new();
        let alice = ledger.get_or_create_account(&mint, &id(10)).address;
        let bob = ledger.get_or_create_account(&mint, &id(11)).address;
        Fixture { registry, ledger, mint, alice, bob }
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let mut f = fixture();
        f.ledger.credit(&f.alice, TokenAmount::new(7)).unwrap();
        let again = f.ledger.get_or_create_account(&f.mint, &id(10)).clone();
        assert_eq!(again.address, f.alice);
        assert_eq!(again.balance, TokenAmount::new(7));
        assert_eq!(f.ledger.len(), 2);
        assert_eq!(f.ledger.find(&f.mint, &id(10)).map(|a| a.address), Some(f.alice));
    }

    #[test]
    fn new_account_is_empty_and_thawed() {
        let f = fixture();
        let acct = f.ledger.get(&f.alice).unwrap();
        assert_eq!(acct.balance, TokenAmount::ZERO);
        assert!(!acct.frozen);
        assert_eq!(acct.owner, id(10));
        assert_eq!(acct.mint, f.mint);
    }

    #[test]
    fn credit_rejects_zero() {
        let mut f = fixture();
        let err = f.ledger.credit(&f.alice, TokenAmount::ZERO).unwrap_err();
        assert_eq!(err, TokenError::Value(ValueError::InvalidAmount));
    }

    #[test]
    fn debit_more_than_balance_is_insufficient() {
        let mut f = fixture();
        f.ledger.credit(&f.alice, TokenAmount::new(10)).unwrap();
        let err = f.ledger.debit(&f.alice, TokenAmount::new(11)).unwrap_err();
        assert_eq!(
            err,
            TokenError::Balance(BalanceError::Insufficient { needed: 11, available: 10 })
        );
        assert_eq!(f.ledger.get(&f.alice).unwrap().balance, TokenAmount::new(10));
    }

    #[test]
    fn transfer_moves_exact_amount() {
        let mut f = fixture();
        f.ledger.credit(&f.alice, TokenAmount::new(1000)).unwrap();
        f.ledger.transfer(&f.alice, &f.bob, TokenAmount::new(100)).unwrap();
        assert_eq!(f.ledger.get(&f.alice).unwrap().balance, TokenAmount::new(900));
        assert_eq!(f.ledger.get(&f.bob).unwrap().balance, TokenAmount::new(100));
    }

    #[test]
    fn transfer_into_frozen_account_rolls_back() {
        let mut f = fixture();
        f.ledger.credit(&f.alice, TokenAmount::new(50)).unwrap();
        let mint = f.registry.get(&f.mint).unwrap().clone();
        f.ledger.set_frozen(&f.bob, &id(2), &mint, true).unwrap();

        let err = f.ledger.transfer(&f.alice, &f.bob, TokenAmount::new(20)).unwrap_err();
        assert_eq!(err, TokenError::State(StateError::Frozen(f.bob)));
        assert_eq!(f.ledger.get(&f.alice).unwrap().balance, TokenAmount::new(50));
        assert_eq!(f.ledger.get(&f.bob).unwrap().balance, TokenAmount::ZERO);
    }

    #[test]
    fn transfer_across_mints_is_rejected() {
        let mut f = fixture();
        let other_mint = id(101);
        let carol = f.ledger.get_or_create_account(&other_mint, &id(12)).address;
        f.ledger.credit(&f.alice, TokenAmount::new(5)).unwrap();
        let err = f.ledger.transfer(&f.alice, &carol, TokenAmount::new(5)).unwrap_err();
        assert!(matches!(err, TokenError::State(StateError::MintMismatch { .. })));
        assert_eq!(f.ledger.get(&f.alice).unwrap().balance, TokenAmount::new(5));
    }

    #[test]
    fn frozen_account_rejects_credit_and_debit_until_thawed() {
        let mut f = fixture();
        f.ledger.credit(&f.alice, TokenAmount::new(10)).unwrap();
        let mint = f.registry.get(&f.mint).unwrap().clone();

        assert_eq!(
            f.ledger.set_frozen(&f.alice, &id(2), &mint, true).unwrap(),
            FreezeTransition::Frozen(f.alice)
        );
        let frozen = TokenError::State(StateError::Frozen(f.alice));
        assert_eq!(f.ledger.credit(&f.alice, TokenAmount::new(1)).unwrap_err(), frozen);
        assert_eq!(f.ledger.debit(&f.alice, TokenAmount::new(1)).unwrap_err(), frozen);

        assert_eq!(
            f.ledger.set_frozen(&f.alice, &id(2), &mint, false).unwrap(),
            FreezeTransition::Thawed(f.alice)
        );
        assert_eq!(f.ledger.credit(&f.alice, TokenAmount::new(1)).unwrap(), TokenAmount::new(11));
        assert_eq!(f.ledger.debit(&f.alice, TokenAmount::new(1)).unwrap(), TokenAmount::new(10));
    }

    #[test]
    fn redundant_freeze_and_thaw_are_reported() {
        let mut f = fixture();
        let mint = f.registry.get(&f.mint).unwrap().clone();

        let err = f.ledger.set_frozen(&f.alice, &id(2), &mint, false).unwrap_err();
        assert_eq!(err, TokenError::State(StateError::AlreadyThawed(f.alice)));

        f.ledger.set_frozen(&f.alice, &id(2), &mint, true).unwrap();
        let err = f.ledger.set_frozen(&f.alice, &id(2), &mint, true).unwrap_err();
        assert_eq!(err, TokenError::State(StateError::AlreadyFrozen(f.alice)));
        assert!(f.ledger.get(&f.alice).unwrap().frozen);
    }

    #[test]
    fn freeze_requires_freeze_authority() {
        let mut f = fixture();
        let mint = f.registry.get(&f.mint).unwrap().clone();
        let err = f.ledger.set_frozen(&f.alice, &id(1), &mint, true).unwrap_err();
        assert!(matches!(err, TokenError::Authority(AuthorityError::Unauthorized { .. })));
        assert!(!f.ledger.get(&f.alice).unwrap().frozen);
    }

    #[test]
    fn freeze_after_revocation_is_revoked() {
        let mut f = fixture();
        f.registry.set_freeze_authority(&f.mint, &id(2), None).unwrap();
        let mint = f.registry.get(&f.mint).unwrap().clone();
        let err = f.ledger.set_frozen(&f.alice, &id(2), &mint, true).unwrap_err();
        assert_eq!(
            err,
            TokenError::Authority(AuthorityError::Revoked(AuthorityType::FreezeAccount))
        );
    }
}
