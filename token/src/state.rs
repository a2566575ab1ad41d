//! Combined mint and account state.

use serde::{Deserialize, Serialize};
use tokenlife_types::{AuthorityType, Identity, TokenAmount};

use crate::accounts::{AccountLedger, FreezeTransition, TokenAccount};
use crate::authority::{AuthorityEngine, AuthorityTransition};
use crate::error::{AuthorityError, StateError, TokenError};
use crate::operation::{Operation, Outcome};
use crate::registry::{Mint, MintRegistry};

/// Mint registry and account ledger, mutated together.
///
/// Every method either applies completely or returns an error with state
/// unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenState {
    pub mints: MintRegistry,
    pub accounts: AccountLedger,
}

impl TokenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&self, address: &Identity) -> Result<&Mint, StateError> {
        self.mints.mint(address)
    }

    pub fn account(&self, address: &Identity) -> Result<&TokenAccount, StateError> {
        self.accounts.account(address)
    }

    /// Get or create the account for `(mint, holder)`. The mint must exist.
    ///
    /// Returns the account address and whether it was newly created.
    pub fn get_or_create_account(
        &mut self,
        mint: &Identity,
        holder: &Identity,
    ) -> Result<(Identity, bool), TokenError> {
        self.mints.mint(mint)?;
        let created = self.accounts.find(mint, holder).is_none();
        let account = self.accounts.get_or_create_account(mint, holder);
        Ok((account.address, created))
    }

    /// Increase supply and credit `destination` as one step.
    ///
    /// Both halves are validated before either is applied. Returns the new supply.
    pub fn issue(
        &mut self,
        mint: &Identity,
        signer: &Identity,
        destination: &Identity,
        amount: TokenAmount,
    ) -> Result<TokenAmount, TokenError> {
        self.mints.check_increase(mint, signer, amount)?;
        self.ensure_same_mint(destination, mint)?;
        self.accounts.check_credit(destination, amount)?;

        let supply = self.mints.increase_supply(mint, signer, amount)?;
        self.accounts.credit(destination, amount)?;
        Ok(supply)
    }

    /// Transfer signed by the owner of `source`.
    pub fn transfer(
        &mut self,
        source: &Identity,
        destination: &Identity,
        owner: &Identity,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        let account = self.accounts.account(source)?;
        if account.owner != *owner {
            return Err(AuthorityError::NotOwner {
                account: *source,
                signer: *owner,
                owner: account.owner,
            }
            .into());
        }
        self.accounts.transfer(source, destination, amount)
    }

    pub fn set_authority(
        &mut self,
        mint: &Identity,
        kind: AuthorityType,
        signer: &Identity,
        new: Option<Identity>,
    ) -> Result<AuthorityTransition, TokenError> {
        match new {
            Some(new_authority) => {
                AuthorityEngine::delegate(&mut self.mints, mint, kind, signer, new_authority)
            }
            None => AuthorityEngine::revoke(&mut self.mints, mint, kind, signer),
        }
    }

    pub fn set_frozen(
        &mut self,
        account: &Identity,
        mint: &Identity,
        signer: &Identity,
        frozen: bool,
    ) -> Result<FreezeTransition, TokenError> {
        let mint = self.mints.mint(mint)?;
        self.accounts.set_frozen(account, signer, mint, frozen)
    }

    /// Apply one operation. State is unchanged when this returns `Err`.
    pub fn apply(&mut self, operation: &Operation) -> Result<Outcome, TokenError> {
        let outcome = match operation {
            Operation::CreateMint {
                mint,
                mint_authority,
                freeze_authority,
                decimals,
                ..
            } => {
                self.mints
                    .create_mint(*mint, *mint_authority, *freeze_authority, *decimals)?;
                Outcome::MintCreated { mint: *mint }
            }
            Operation::CreateAccount { mint, holder, .. } => {
                let (account, created) = self.get_or_create_account(mint, holder)?;
                Outcome::AccountReady { account, created }
            }
            Operation::MintTo {
                mint,
                destination,
                authority,
                amount,
            } => {
                let supply = self.issue(mint, authority, destination, *amount)?;
                Outcome::Issued {
                    account: *destination,
                    amount: *amount,
                    supply,
                }
            }
            Operation::Transfer {
                source,
                destination,
                owner,
                amount,
            } => {
                self.transfer(source, destination, owner, *amount)?;
                Outcome::Transferred {
                    source: *source,
                    destination: *destination,
                    amount: *amount,
                }
            }
            Operation::SetAuthority {
                mint,
                kind,
                current,
                new,
            } => Outcome::AuthorityChanged(self.set_authority(mint, *kind, current, *new)?),
            Operation::FreezeAccount {
                account,
                mint,
                authority,
            } => Outcome::FreezeChanged(self.set_frozen(account, mint, authority, true)?),
            Operation::ThawAccount {
                account,
                mint,
                authority,
            } => Outcome::FreezeChanged(self.set_frozen(account, mint, authority, false)?),
        };
        tracing::debug!(operation = operation.name(), ?outcome, "applied token operation");
        Ok(outcome)
    }

    fn ensure_same_mint(&self, account: &Identity, mint: &Identity) -> Result<(), StateError> {
        let actual = self.accounts.account(account)?.mint;
        if actual != *mint {
            return Err(StateError::MintMismatch {
                account: *account,
                expected: *mint,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenlife_types::Authority;

    fn id(n: u8) -> Identity {
        Identity::new([n; 32])
    }

    fn state_with_accounts() -> (TokenState, Identity, Identity, Identity) {
        let mut state = TokenState::new();
        let mint = id(100);
        state
            .apply(&Operation::CreateMint {
                mint,
                payer: id(1),
                mint_authority: id(1),
                freeze_authority: Some(id(2)),
                decimals: 9,
            })
            .unwrap();
        let (team, _) = state.get_or_create_account(&mint, &id(1)).unwrap();
        let (user, _) = state.get_or_create_account(&mint, &id(3)).unwrap();
        (state, mint, team, user)
    }

    #[test]
    fn create_account_reports_whether_new() {
        let (mut state, mint, team, _) = state_with_accounts();
        let outcome = state
            .apply(&Operation::CreateAccount { mint, holder: id(1), payer: id(1) })
            .unwrap();
        assert_eq!(outcome, Outcome::AccountReady { account: team, created: false });
    }

    #[test]
    fn create_account_for_unknown_mint_fails() {
        let mut state = TokenState::new();
        let err = state.get_or_create_account(&id(50), &id(1)).unwrap_err();
        assert_eq!(err, TokenError::State(StateError::UnknownMint(id(50))));
        assert!(state.accounts.is_empty());
    }

    #[test]
    fn issue_into_frozen_account_leaves_supply_untouched() {
        let (mut state, mint, _, user) = state_with_accounts();
        state.set_frozen(&user, &mint, &id(2), true).unwrap();
        let err = state.issue(&mint, &id(1), &user, TokenAmount::new(10)).unwrap_err();
        assert_eq!(err, TokenError::State(StateError::Frozen(user)));
        assert_eq!(state.mint(&mint).unwrap().total_supply, TokenAmount::ZERO);
    }

    #[test]
    fn issue_into_account_of_other_mint_fails() {
        let (mut state, mint, _, _) = state_with_accounts();
        state
            .mints
            .create_mint(id(101), id(1), None, 0)
            .unwrap();
        let (foreign, _) = state.get_or_create_account(&id(101), &id(3)).unwrap();
        let err = state.issue(&mint, &id(1), &foreign, TokenAmount::new(1)).unwrap_err();
        assert!(matches!(err, TokenError::State(StateError::MintMismatch { .. })));
    }

    #[test]
    fn transfer_requires_owner_signature() {
        let (mut state, mint, team, user) = state_with_accounts();
        state.issue(&mint, &id(1), &team, TokenAmount::new(10)).unwrap();
        let err = state.transfer(&team, &user, &id(3), TokenAmount::new(5)).unwrap_err();
        assert!(matches!(err, TokenError::Authority(AuthorityError::NotOwner { .. })));
        assert_eq!(state.account(&team).unwrap().balance, TokenAmount::new(10));
    }

    #[test]
    fn set_authority_delegates_then_revokes() {
        let (mut state, mint, _, _) = state_with_accounts();
        let delegated = state
            .apply(&Operation::SetAuthority {
                mint,
                kind: AuthorityType::MintTokens,
                current: id(1),
                new: Some(id(2)),
            })
            .unwrap();
        assert!(matches!(
            delegated,
            Outcome::AuthorityChanged(t) if t.to == Authority::Active(id(2)) && !t.is_revocation()
        ));

        let revoked = state
            .set_authority(&mint, AuthorityType::MintTokens, &id(2), None)
            .unwrap();
        assert!(revoked.is_revocation());
        let err = state
            .set_authority(&mint, AuthorityType::MintTokens, &id(2), Some(id(1)))
            .unwrap_err();
        assert_eq!(
            err,
            TokenError::Authority(AuthorityError::Revoked(AuthorityType::MintTokens))
        );
    }

    #[test]
    fn apply_dispatches_freeze_and_thaw() {
        let (mut state, mint, _, user) = state_with_accounts();
        let frozen = state
            .apply(&Operation::FreezeAccount { account: user, mint, authority: id(2) })
            .unwrap();
        assert_eq!(frozen, Outcome::FreezeChanged(FreezeTransition::Frozen(user)));
        let thawed = state
            .apply(&Operation::ThawAccount { account: user, mint, authority: id(2) })
            .unwrap();
        assert_eq!(thawed, Outcome::FreezeChanged(FreezeTransition::Thawed(user)));
    }
}
