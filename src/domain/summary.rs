//! Aggregate projection over a settled ledger.

use crate::domain::entities::SimulationConfig;
use crate::domain::ledger::BonusLedger;
use crate::domain::network::Network;
use crate::domain::tier::{Classification, Tier};

/// Members per final tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub green: usize,
    pub silver: usize,
    pub red: usize,
}

/// Aggregate statistics of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub member_count: usize,
    pub tier_counts: TierCounts,
    /// Total member spend, `member_count * spend_per_member`
    pub gross_spend: u128,
    /// Bonus pool intake, `member_count * allocation_per_member`
    pub cash_in: u128,
    /// Total bonuses paid
    pub cash_out: u128,
    /// `cash_in - cash_out`
    pub net: i128,
}

impl Summary {
    /// The plan pays out more than it takes in.
    pub fn is_loss(&self) -> bool {
        self.net < 0
    }
}

/// Fold the already-computed ledger into a summary.
///
/// No qualification logic here; tier counts come from final tiers, the
/// money comes from the ledger.
pub fn project(
    network: &Network,
    classification: &Classification,
    ledger: &BonusLedger,
    config: &SimulationConfig,
) -> Summary {
    let mut tier_counts = TierCounts::default();
    for &tier in &classification.tiers {
        match tier {
            Tier::Green => tier_counts.green += 1,
            Tier::Silver => tier_counts.silver += 1,
            Tier::Red => tier_counts.red += 1,
            Tier::None => {}
        }
    }

    let member_count = network.node_count();
    let gross_spend = member_count as u128 * config.spend_per_member as u128;
    let cash_in = member_count as u128 * config.allocation_per_member as u128;
    let cash_out = ledger.cash_out;

    Summary {
        member_count,
        tier_counts,
        gross_spend,
        cash_in,
        cash_out,
        net: cash_in as i128 - cash_out as i128,
    }
}
