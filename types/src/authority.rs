//! Administrative authority slots on a mint.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::Identity;

/// The current holder of an administrative authority.
///
/// `Revoked` is terminal: no operation moves an authority back to `Active`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authority {
    Active(Identity),
    Revoked,
}

impl Authority {
    /// Build from the optional form used at API boundaries; `None` means revoked.
    pub fn from_option(identity: Option<Identity>) -> Self {
        match identity {
            Some(id) => Authority::Active(id),
            None => Authority::Revoked,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Authority::Active(id) => Some(id),
            Authority::Revoked => None,
        }
    }

    pub fn is_revoked(&self) -> bool {
        matches!(self, Authority::Revoked)
    }

    /// Whether `signer` currently holds this authority.
    pub fn is_held_by(&self, signer: &Identity) -> bool {
        matches!(self, Authority::Active(id) if id == signer)
    }
}

impl From<Option<Identity>> for Authority {
    fn from(identity: Option<Identity>) -> Self {
        Self::from_option(identity)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authority::Active(id) => write!(f, "{id}"),
            Authority::Revoked => f.write_str("revoked"),
        }
    }
}

/// Which authority slot an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorityType {
    /// Permission to increase total supply.
    MintTokens,
    /// Permission to freeze and thaw token accounts.
    FreezeAccount,
}

impl AuthorityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityType::MintTokens => "mint",
            AuthorityType::FreezeAccount => "freeze",
        }
    }
}

impl fmt::Display for AuthorityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
