//! Tier qualification: pluggable policy and the three-pass classifier.

use std::fmt;

use rayon::prelude::*;
use tracing::debug;

use crate::domain::downline::{accumulate_downline_counts, DescendantIndex};
use crate::domain::entities::SimulationConfig;
use crate::domain::network::Network;

/// Qualification level of one member.
///
/// Totally ordered; a member's tier only ever moves up during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    None,
    Green,
    Silver,
    Red,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::None => "-",
            Tier::Green => "Green",
            Tier::Silver => "Silver",
            Tier::Red => "Red",
        };
        write!(f, "{}", label)
    }
}

/// Qualification rules, separated from the traversal engine.
///
/// Observed plan variants disagree on the exact GREEN test and on
/// whether thresholds count tagged nodes or fixed windows; swapping the
/// rule set must not touch the classifier.
pub trait TierPolicy: Sync {
    /// Shape test for GREEN on one node.
    fn green_qualifies(&self, network: &Network, downline: &DescendantIndex, index: usize)
        -> bool;

    /// GREEN downlines required for SILVER.
    fn silver_threshold(&self) -> u32;

    /// SILVER downlines required for RED.
    fn red_threshold(&self) -> u32;
}

/// Default rule set: depth-bounded perfect-subtree GREEN test with
/// inclusive downline-count thresholds for SILVER and RED.
#[derive(Debug, Clone)]
pub struct MatrixPolicy {
    green_matrix_depth: u32,
    silver_threshold: u32,
    red_threshold: u32,
}

impl MatrixPolicy {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            green_matrix_depth: config.green_matrix_depth,
            silver_threshold: config.silver_threshold,
            red_threshold: config.red_threshold,
        }
    }
}

impl TierPolicy for MatrixPolicy {
    /// GREEN holds iff both child subtrees, restricted to
    /// `green_matrix_depth - 1` additional levels, are completely
    /// filled: `2^green_matrix_depth - 1` nodes on each side. In a
    /// perfect network this is a property of remaining depth alone.
    fn green_qualifies(
        &self,
        network: &Network,
        downline: &DescendantIndex,
        index: usize,
    ) -> bool {
        let (Some(left), Some(right)) = (network.left(index), network.right(index)) else {
            return false;
        };
        let full_leg = (1usize << self.green_matrix_depth) - 1;
        let bound = self.green_matrix_depth - 1;
        downline.subtree_within_depth(left, bound).len() == full_leg
            && downline.subtree_within_depth(right, bound).len() == full_leg
    }

    fn silver_threshold(&self) -> u32 {
        self.silver_threshold
    }

    fn red_threshold(&self) -> u32 {
        self.red_threshold
    }
}

/// Outcome of the three classification passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Final tier per node: the highest tier whose pass condition held
    pub tiers: Vec<Tier>,
    /// Pass conditions, recorded per node so the ledger can settle
    /// cumulative bonuses without re-deriving them
    pub green_qualified: Vec<bool>,
    pub silver_qualified: Vec<bool>,
    pub red_qualified: Vec<bool>,
    /// Descendants with final tier at or above GREEN, per node
    pub green_downlines: Vec<u32>,
    /// Descendants with final tier at or above SILVER, per node
    pub silver_downlines: Vec<u32>,
}

/// Three ordered passes over the whole node set.
///
/// GREEN before SILVER before RED; each pass reads only state
/// finalized by the prior pass. Within a pass, nodes are evaluated in
/// parallel, each node writes only its own slot so the merge is
/// order-independent and deterministic.
pub struct TierClassifier<'a, P: TierPolicy> {
    network: &'a Network,
    policy: P,
}

impl<'a, P: TierPolicy> TierClassifier<'a, P> {
    pub fn new(network: &'a Network, policy: P) -> Self {
        Self { network, policy }
    }

    pub fn classify(&self, downline: &DescendantIndex) -> Classification {
        let network = self.network;

        // Pass 1: GREEN, a shape-only property of the network.
        let green_qualified: Vec<bool> = network
            .indices()
            .into_par_iter()
            .map(|index| self.policy.green_qualifies(network, downline, index))
            .collect();

        // Pass 2: SILVER from bottom-up GREEN downline counts.
        let green_pass_counts =
            accumulate_downline_counts(network, |index| green_qualified[index]);
        let silver_threshold = self.policy.silver_threshold();
        let silver_qualified: Vec<bool> = green_pass_counts
            .par_iter()
            .map(|&count| count >= silver_threshold)
            .collect();

        // Pass 3: RED, strictly after all SILVER results are final.
        let silver_pass_counts =
            accumulate_downline_counts(network, |index| silver_qualified[index]);
        let red_threshold = self.policy.red_threshold();
        let red_qualified: Vec<bool> = silver_pass_counts
            .par_iter()
            .map(|&count| count >= red_threshold)
            .collect();

        // Monotonic promotion: highest condition that held wins, no
        // pass is required to hold for a later one.
        let tiers: Vec<Tier> = network
            .indices()
            .map(|index| {
                if red_qualified[index] {
                    Tier::Red
                } else if silver_qualified[index] {
                    Tier::Silver
                } else if green_qualified[index] {
                    Tier::Green
                } else {
                    Tier::None
                }
            })
            .collect();

        // Reported downline counts are against final tiers, so a RED
        // descendant still counts toward an ancestor's silver downline.
        let green_downlines =
            accumulate_downline_counts(network, |index| tiers[index] >= Tier::Green);
        let silver_downlines =
            accumulate_downline_counts(network, |index| tiers[index] >= Tier::Silver);

        debug!(
            "classified {} nodes: green={}, silver={}, red={}",
            network.node_count(),
            green_qualified.iter().filter(|&&q| q).count(),
            silver_qualified.iter().filter(|&&q| q).count(),
            red_qualified.iter().filter(|&&q| q).count(),
        );

        Classification {
            tiers,
            green_qualified,
            silver_qualified,
            red_qualified,
            green_downlines,
            silver_downlines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(depth: u32, config: &SimulationConfig) -> Classification {
        let network = Network::build(depth).unwrap();
        let downline = DescendantIndex::new(&network);
        TierClassifier::new(&network, MatrixPolicy::from_config(config)).classify(&downline)
    }

    #[test]
    fn given_depth_three_when_classified_then_only_root_is_green() {
        let classification = classify(3, &SimulationConfig::default());
        assert_eq!(classification.tiers[0], Tier::Green);
        assert!(classification.tiers[1..].iter().all(|&t| t == Tier::None));
    }

    #[test]
    fn given_too_shallow_network_when_classified_then_nobody_qualifies() {
        let classification = classify(2, &SimulationConfig::default());
        assert!(classification.tiers.iter().all(|&t| t == Tier::None));
    }

    #[test]
    fn given_tier_ordering_then_total_order_holds() {
        assert!(Tier::None < Tier::Green);
        assert!(Tier::Green < Tier::Silver);
        assert!(Tier::Silver < Tier::Red);
    }
}
