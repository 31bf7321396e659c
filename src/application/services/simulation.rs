//! Simulation service
//!
//! Runs the pipeline end to end: network build, downline indexing,
//! tier classification, bonus settlement, summary projection.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    project, BonusLedger, DescendantIndex, MatrixPolicy, Network, NodeResult, SimulationConfig,
    Summary, TierClassifier, TierPayout,
};

/// Complete, internally consistent output of one run.
///
/// Either the whole model is produced or the run fails; there are no
/// partial results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    pub network: Network,
    /// One result per index, level order
    pub nodes: Vec<NodeResult>,
    /// Per-tier payout totals, GREEN/SILVER/RED order
    pub payouts: [TierPayout; 3],
    pub summary: Summary,
}

/// Detail view of a single member, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberReport {
    pub node: NodeResult,
    /// Total downline size, any tier
    pub downline_size: usize,
}

/// Stateless orchestrator; every run starts from a fresh configuration
/// and retains nothing afterwards.
pub struct SimulationService;

impl SimulationService {
    /// Run one simulation.
    ///
    /// Deterministic: identical configurations produce identical
    /// outcomes.
    #[instrument(skip(config), fields(depth = config.depth))]
    pub fn run(config: &SimulationConfig) -> ApplicationResult<SimulationOutcome> {
        config.validate()?;
        let network = Network::build(config.depth)?;
        debug!("simulating {} members", network.node_count());

        let downline = DescendantIndex::new(&network);
        let classifier = TierClassifier::new(&network, MatrixPolicy::from_config(config));
        let classification = classifier.classify(&downline);
        let ledger = BonusLedger::settle(&network, &classification, config);
        let summary = project(&network, &classification, &ledger, config);

        let nodes = network
            .indices()
            .map(|index| NodeResult {
                index,
                level: network.level_of(index),
                tier: classification.tiers[index],
                bonus_accrued: ledger.bonus_accrued[index],
                green_downline_count: classification.green_downlines[index],
                silver_downline_count: classification.silver_downlines[index],
            })
            .collect();

        Ok(SimulationOutcome {
            network,
            nodes,
            payouts: [ledger.green, ledger.silver, ledger.red],
            summary,
        })
    }

    /// Run one simulation and report on a single member.
    #[instrument(skip(config), fields(depth = config.depth))]
    pub fn member_report(
        config: &SimulationConfig,
        index: usize,
    ) -> ApplicationResult<MemberReport> {
        let outcome = Self::run(config)?;
        if !outcome.network.contains(index) {
            return Err(ApplicationError::MemberOutOfBounds {
                index,
                max: outcome.network.max_index(),
            });
        }

        let mut downline = DescendantIndex::new(&outcome.network);
        let downline_size = downline.descendants_of(index)?.len();

        Ok(MemberReport {
            node: outcome.nodes[index].clone(),
            downline_size,
        })
    }
}
