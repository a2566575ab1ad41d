use serde::Serialize;
use tokenlife_types::{Authority, Confirmation, Identity, TokenAmount};

use crate::phase::Phase;

/// A confirmed step, in submission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepConfirmation {
    pub phase: Phase,
    pub step: &'static str,
    pub confirmation: Confirmation,
}

/// Final state of a completed lifecycle run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LifecycleReport {
    pub mint: Identity,
    pub decimals: u8,
    pub team_account: Identity,
    pub user_account: Identity,
    pub team_balance: TokenAmount,
    pub user_balance: TokenAmount,
    pub supply: TokenAmount,
    pub mint_authority: Authority,
    pub freeze_authority: Authority,
    pub confirmations: Vec<StepConfirmation>,
}

impl LifecycleReport {
    /// Both authorities revoked: the mint is immutable from here on.
    pub fn is_finalized(&self) -> bool {
        self.mint_authority.is_revoked() && self.freeze_authority.is_revoked()
    }
}
