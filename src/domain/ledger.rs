//! Bonus settlement: per-member accruals and per-tier payout totals.

use tracing::debug;

use crate::domain::entities::SimulationConfig;
use crate::domain::network::Network;
use crate::domain::tier::{Classification, Tier};

/// Payout total for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPayout {
    pub tier: Tier,
    /// Members whose pass condition held
    pub qualified: usize,
    /// Bonus paid per qualifying member
    pub bonus_each: u64,
    /// `qualified * bonus_each`
    pub total: u128,
}

impl TierPayout {
    fn settle(tier: Tier, qualified: &[bool], bonus_each: u64) -> Self {
        let qualified = qualified.iter().filter(|&&q| q).count();
        Self {
            tier,
            qualified,
            bonus_each,
            total: qualified as u128 * bonus_each as u128,
        }
    }
}

/// Per-member and per-tier record of bonuses accrued in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusLedger {
    /// Cumulative bonus per member: every tier whose pass condition
    /// held contributes, promotion never overwrites earlier accruals
    pub bonus_accrued: Vec<u64>,
    pub green: TierPayout,
    pub silver: TierPayout,
    pub red: TierPayout,
    /// Grand total paid out across all tiers
    pub cash_out: u128,
}

impl BonusLedger {
    /// Convert pass conditions into money.
    ///
    /// Per-member sums cannot overflow: `SimulationConfig::validate`
    /// bounds the cumulative tier bonus to `u64::MAX`.
    pub fn settle(
        network: &Network,
        classification: &Classification,
        config: &SimulationConfig,
    ) -> Self {
        let bonus_accrued: Vec<u64> = network
            .indices()
            .map(|index| {
                let mut accrued = 0u64;
                if classification.green_qualified[index] {
                    accrued += config.bonus_green;
                }
                if classification.silver_qualified[index] {
                    accrued += config.bonus_silver;
                }
                if classification.red_qualified[index] {
                    accrued += config.bonus_red;
                }
                accrued
            })
            .collect();

        let green = TierPayout::settle(
            Tier::Green,
            &classification.green_qualified,
            config.bonus_green,
        );
        let silver = TierPayout::settle(
            Tier::Silver,
            &classification.silver_qualified,
            config.bonus_silver,
        );
        let red = TierPayout::settle(Tier::Red, &classification.red_qualified, config.bonus_red);

        let cash_out = green.total + silver.total + red.total;
        debug!(
            "settled ledger: green={}, silver={}, red={}, cash_out={}",
            green.total, silver.total, red.total, cash_out
        );

        Self {
            bonus_accrued,
            green,
            silver,
            red,
            cash_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::downline::DescendantIndex;
    use crate::domain::tier::{MatrixPolicy, TierClassifier};

    fn settle(depth: u32, config: &SimulationConfig) -> BonusLedger {
        let network = Network::build(depth).unwrap();
        let downline = DescendantIndex::new(&network);
        let classification =
            TierClassifier::new(&network, MatrixPolicy::from_config(config)).classify(&downline);
        BonusLedger::settle(&network, &classification, config)
    }

    #[test]
    fn given_depth_three_when_settled_then_only_root_paid_green() {
        let config = SimulationConfig::default();
        let ledger = settle(3, &config);
        assert_eq!(ledger.bonus_accrued[0], config.bonus_green);
        assert!(ledger.bonus_accrued[1..].iter().all(|&b| b == 0));
        assert_eq!(ledger.green.qualified, 1);
        assert_eq!(ledger.cash_out, config.bonus_green as u128);
    }

    #[test]
    fn given_promoted_member_when_settled_then_bonus_is_cumulative() {
        // depth 6: the root qualifies GREEN and SILVER
        let config = SimulationConfig::default();
        let ledger = settle(6, &config);
        assert_eq!(
            ledger.bonus_accrued[0],
            config.bonus_green + config.bonus_silver
        );
    }
}
