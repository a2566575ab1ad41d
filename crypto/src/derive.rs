//! Deterministic token-account addresses.

use tokenlife_types::Identity;

use crate::hash::blake2b_256_multi;

/// Domain tag separating token-account derivation from other Blake2b uses.
const TOKEN_ACCOUNT_DOMAIN: &[u8] = b"tokenlife/token-account/v1";

/// Derive the token-account address for `holder` under `mint`.
///
/// One address per `(mint, holder)` pair, which is what makes
/// get-or-create idempotent.
pub fn derive_token_account(mint: &Identity, holder: &Identity) -> Identity {
    Identity::new(blake2b_256_multi(&[
        TOKEN_ACCOUNT_DOMAIN,
        mint.as_bytes(),
        holder.as_bytes(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_pair_same_address() {
        let mint = Identity::new([1u8; 32]);
        let holder = Identity::new([2u8; 32]);
        assert_eq!(
            derive_token_account(&mint, &holder),
            derive_token_account(&mint, &holder)
        );
    }

    #[test]
    fn order_of_mint_and_holder_matters() {
        let a = Identity::new([1u8; 32]);
        let b = Identity::new([2u8; 32]);
        assert_ne!(derive_token_account(&a, &b), derive_token_account(&b, &a));
    }

    #[test]
    fn account_never_equals_holder() {
        let mint = Identity::new([1u8; 32]);
        let holder = Identity::new([2u8; 32]);
        assert_ne!(derive_token_account(&mint, &holder), holder);
    }
}
