//! Authority rules for mint administration.
//!
//! Two rules, enforced here and nowhere else:
//! - only the current holder of an authority may change it (or use it), and
//! - `Revoked` is terminal; once reached it rejects every signer.
//!
//! `MintRegistry` and `AccountLedger` call into this module before mutating,
//! so a failed check always leaves state untouched.

use serde::{Deserialize, Serialize};
use tokenlife_types::{Authority, AuthorityType, Identity};

use crate::error::{AuthorityError, TokenError};
use crate::registry::MintRegistry;

/// A validated change of one authority slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityTransition {
    pub kind: AuthorityType,
    pub from: Authority,
    pub to: Authority,
}

impl AuthorityTransition {
    /// Whether this transition revoked the authority.
    pub fn is_revocation(&self) -> bool {
        self.to.is_revoked()
    }
}

/// Validates and applies authority-changing operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthorityEngine;

impl AuthorityEngine {
    /// Check that `signer` holds `current`.
    ///
    /// Revocation is reported before a signer mismatch: a revoked authority
    /// has no holder to compare against.
    pub fn authorize(
        kind: AuthorityType,
        current: &Authority,
        signer: &Identity,
    ) -> Result<(), AuthorityError> {
        match current {
            Authority::Revoked => Err(AuthorityError::Revoked(kind)),
            Authority::Active(holder) if holder == signer => Ok(()),
            Authority::Active(holder) => Err(AuthorityError::Unauthorized {
                kind,
                signer: *signer,
                authority: *holder,
            }),
        }
    }

    /// Validate a change of `current` to `new`, signed by `signer`.
    ///
    /// `new = None` revokes. Nothing is mutated; callers assign `to` on `Ok`.
    pub fn transition(
        kind: AuthorityType,
        current: &Authority,
        signer: &Identity,
        new: Option<Identity>,
    ) -> Result<AuthorityTransition, AuthorityError> {
        Self::authorize(kind, current, signer)?;
        Ok(AuthorityTransition {
            kind,
            from: *current,
            to: Authority::from_option(new),
        })
    }

    /// Hand an authority to `new_authority`. The current authority signs.
    pub fn delegate(
        registry: &mut MintRegistry,
        mint: &Identity,
        kind: AuthorityType,
        signer: &Identity,
        new_authority: Identity,
    ) -> Result<AuthorityTransition, TokenError> {
        registry.set_authority(mint, kind, signer, Some(new_authority))
    }

    /// Permanently revoke an authority. The current authority signs.
    pub fn revoke(
        registry: &mut MintRegistry,
        mint: &Identity,
        kind: AuthorityType,
        signer: &Identity,
    ) -> Result<AuthorityTransition, TokenError> {
        registry.set_authority(mint, kind, signer, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u8) -> Identity {
        Identity::new([n; 32])
    }

    #[test]
    fn authorize_accepts_current_holder() {
        let auth = Authority::Active(id(1));
        assert!(AuthorityEngine::authorize(AuthorityType::MintTokens, &auth, &id(1)).is_ok());
    }

    #[test]
    fn authorize_rejects_other_signer() {
        let auth = Authority::Active(id(1));
        let err = AuthorityEngine::authorize(AuthorityType::FreezeAccount, &auth, &id(2)).unwrap_err();
        assert_eq!(
            err,
            AuthorityError::Unauthorized {
                kind: AuthorityType::FreezeAccount,
                signer: id(2),
                authority: id(1),
            }
        );
    }

    #[test]
    fn revoked_rejects_every_signer() {
        for n in 0..8 {
            let err = AuthorityEngine::authorize(AuthorityType::MintTokens, &Authority::Revoked, &id(n))
                .unwrap_err();
            assert_eq!(err, AuthorityError::Revoked(AuthorityType::MintTokens));
        }
    }

    #[test]
    fn transition_to_none_is_revocation() {
        let auth = Authority::Active(id(1));
        let t = AuthorityEngine::transition(AuthorityType::MintTokens, &auth, &id(1), None).unwrap();
        assert!(t.is_revocation());
        assert_eq!(t.from, auth);
    }

    #[test]
    fn delegate_then_revoke_through_registry() {
        let mut registry = MintRegistry::new();
        let mint = id(9);
        registry.create_mint(mint, id(1), Some(id(2)), 9).unwrap();

        let t = AuthorityEngine::delegate(&mut registry, &mint, AuthorityType::MintTokens, &id(1), id(2)).unwrap();
        assert_eq!(t.to, Authority::Active(id(2)));
        assert_eq!(registry.get(&mint).unwrap().mint_authority, Authority::Active(id(2)));

        AuthorityEngine::revoke(&mut registry, &mint, AuthorityType::MintTokens, &id(2)).unwrap();
        assert!(registry.get(&mint).unwrap().mint_authority.is_revoked());

        let err = AuthorityEngine::delegate(&mut registry, &mint, AuthorityType::MintTokens, &id(2), id(2))
            .unwrap_err();
        assert_eq!(err, TokenError::Authority(AuthorityError::Revoked(AuthorityType::MintTokens)));
    }
}
