//! Domain entities: run configuration and per-member results

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::network::MAX_DEPTH;
use crate::domain::tier::Tier;

/// Immutable configuration for one simulation run.
///
/// Supplied by the presentation layer (CLI flags, TOML, env vars) and
/// never mutated mid-run. Amounts are Rupiah.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Network depth, levels below the root
    pub depth: u32,
    /// Perfect-subtree depth required under each leg for GREEN
    pub green_matrix_depth: u32,
    /// GREEN downlines required for SILVER
    pub silver_threshold: u32,
    /// SILVER downlines required for RED
    pub red_threshold: u32,
    pub bonus_green: u64,
    pub bonus_silver: u64,
    pub bonus_red: u64,
    /// Member spend per period (Belanja)
    pub spend_per_member: u64,
    /// Share of spend allocated to the bonus pool
    pub allocation_per_member: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            depth: 6,
            green_matrix_depth: 3,
            silver_threshold: 14,
            red_threshold: 14,
            bonus_green: 5_000_000,
            bonus_silver: 10_000_000,
            bonus_red: 50_000_000,
            spend_per_member: 2_000_000,
            allocation_per_member: 1_000_000,
        }
    }
}

impl SimulationConfig {
    /// Check the configuration before a run.
    ///
    /// The depth bound itself is enforced by [`Network::build`]; this
    /// rejects everything else that would make a run meaningless or
    /// overflow per-member accruals.
    ///
    /// [`Network::build`]: crate::domain::network::Network::build
    pub fn validate(&self) -> DomainResult<()> {
        if self.green_matrix_depth == 0 {
            return Err(DomainError::InvalidConfiguration {
                field: "green_matrix_depth",
                reason: "must be at least 1".into(),
            });
        }
        if self.green_matrix_depth > MAX_DEPTH {
            return Err(DomainError::InvalidConfiguration {
                field: "green_matrix_depth",
                reason: format!("must be at most {}", MAX_DEPTH),
            });
        }
        let cumulative =
            self.bonus_green as u128 + self.bonus_silver as u128 + self.bonus_red as u128;
        if cumulative > u64::MAX as u128 {
            return Err(DomainError::InvalidConfiguration {
                field: "bonus_green/bonus_silver/bonus_red",
                reason: "cumulative tier bonus overflows a member's accrual".into(),
            });
        }
        Ok(())
    }
}

/// Final state of one member after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeResult {
    pub index: usize,
    /// Depth below the root
    pub level: u32,
    /// Highest tier whose pass condition held
    pub tier: Tier,
    /// Sum of all tier bonuses the member qualified for (cumulative)
    pub bonus_accrued: u64,
    /// Descendants with final tier at or above GREEN
    pub green_downline_count: u32,
    /// Descendants with final tier at or above SILVER
    pub silver_downline_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_validated_then_ok() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn given_zero_matrix_depth_when_validated_then_invalid() {
        let config = SimulationConfig {
            green_matrix_depth: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidConfiguration { field, .. }) if field == "green_matrix_depth"
        ));
    }

    #[test]
    fn given_overflowing_bonuses_when_validated_then_invalid() {
        let config = SimulationConfig {
            bonus_green: u64::MAX,
            bonus_silver: u64::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
