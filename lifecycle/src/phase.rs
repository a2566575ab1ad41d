use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle phases, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Genesis,
    Growth,
    Delegation,
    FreezeCycle,
    DelegatedGrowth,
    Finalization,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Genesis,
        Phase::Growth,
        Phase::Delegation,
        Phase::FreezeCycle,
        Phase::DelegatedGrowth,
        Phase::Finalization,
    ];

    /// 1-based position in the workflow.
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Genesis => "genesis",
            Phase::Growth => "growth",
            Phase::Delegation => "delegation",
            Phase::FreezeCycle => "freeze cycle",
            Phase::DelegatedGrowth => "delegated growth",
            Phase::Finalization => "finalization",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {} ({})", self.number(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_are_numbered_in_order() {
        let numbers: Vec<u8> = Phase::ALL.iter().map(Phase::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert!(Phase::Genesis < Phase::Finalization);
        assert_eq!(Phase::FreezeCycle.to_string(), "phase 4 (freeze cycle)");
    }
}
