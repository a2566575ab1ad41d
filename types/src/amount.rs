//! Token amounts in the smallest indivisible unit.
//!
//! Amounts are fixed-point integers (u64) scaled by the mint's `decimals`.
//! A mint with 9 decimals represents one whole token as `1_000_000_000` raw units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest `decimals` value a mint may be created with.
pub const MAX_DECIMALS: u8 = 18;

/// A token amount in raw units.
///
/// Arithmetic is checked only; there is no `Add`/`Sub` impl so callers cannot
/// silently wrap or underflow a balance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u64);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Scale a whole-token count by `decimals`. Returns `None` on overflow.
    pub fn from_whole(whole: u64, decimals: u8) -> Option<Self> {
        10u64
            .checked_pow(decimals as u32)
            .and_then(|scale| whole.checked_mul(scale))
            .map(Self)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Render with a decimal point, e.g. `1500.000000001` for 9 decimals.
    pub fn to_ui_string(&self, decimals: u8) -> String {
        if decimals == 0 {
            return self.0.to_string();
        }
        let scale = 10u128.pow(decimals as u32);
        let raw = self.0 as u128;
        let whole = raw / scale;
        let frac = raw % scale;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{:0width$}", frac, width = decimals as usize);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}

impl From<u64> for TokenAmount {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
