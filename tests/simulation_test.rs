//! End-to-end tests for the simulation service.

use binplan::application::{ApplicationError, SimulationService};
use binplan::domain::{DomainError, SimulationConfig, Tier};
use binplan::util::testing::init_test_setup;

#[test]
fn given_depth_six_defaults_when_run_then_green_payout_matches_count() {
    init_test_setup();
    let config = SimulationConfig::default();
    let outcome = SimulationService::run(&config).unwrap();

    assert_eq!(outcome.summary.member_count, 127);
    assert_eq!(outcome.nodes.len(), 127);

    // 15 members hold the GREEN condition, paid 5M each
    let green = outcome.payouts[0];
    assert_eq!(green.qualified, 15);
    assert_eq!(green.total, 15 * 5_000_000);

    // the root is additionally SILVER, bonus accrues cumulatively
    let silver = outcome.payouts[1];
    assert_eq!(silver.qualified, 1);
    assert_eq!(outcome.nodes[0].tier, Tier::Silver);
    assert_eq!(outcome.nodes[0].bonus_accrued, 15_000_000);

    assert_eq!(outcome.summary.cash_out, 15 * 5_000_000 + 10_000_000);
    assert_eq!(outcome.summary.cash_in, 127 * 1_000_000);
    assert_eq!(
        outcome.summary.net,
        127_000_000i128 - 85_000_000i128
    );
    assert!(!outcome.summary.is_loss());

    // final tier counts: root promoted out of the GREEN bucket
    assert_eq!(outcome.summary.tier_counts.green, 14);
    assert_eq!(outcome.summary.tier_counts.silver, 1);
    assert_eq!(outcome.summary.tier_counts.red, 0);
}

#[test]
fn given_low_allocation_when_run_then_loss_is_flagged() {
    init_test_setup();
    let config = SimulationConfig {
        allocation_per_member: 100_000,
        ..Default::default()
    };
    let outcome = SimulationService::run(&config).unwrap();
    assert!(outcome.summary.cash_in < outcome.summary.cash_out);
    assert!(outcome.summary.net < 0);
    assert!(outcome.summary.is_loss());
}

#[test]
fn given_identical_config_when_run_twice_then_outcomes_identical() {
    init_test_setup();
    let config = SimulationConfig {
        depth: 9,
        ..Default::default()
    };
    let first = SimulationService::run(&config).unwrap();
    let second = SimulationService::run(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn given_excessive_depth_when_run_then_out_of_range() {
    init_test_setup();
    let config = SimulationConfig {
        depth: 25,
        ..Default::default()
    };
    let err = SimulationService::run(&config).unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::OutOfRange { depth: 25, max: 24 })
    ));
}

#[test]
fn given_invalid_matrix_depth_when_run_then_invalid_configuration() {
    init_test_setup();
    let config = SimulationConfig {
        green_matrix_depth: 0,
        ..Default::default()
    };
    assert!(matches!(
        SimulationService::run(&config).unwrap_err(),
        ApplicationError::Domain(DomainError::InvalidConfiguration { .. })
    ));
}

#[test]
fn given_node_results_when_inspected_then_levels_and_downlines_consistent() {
    init_test_setup();
    let config = SimulationConfig::default();
    let outcome = SimulationService::run(&config).unwrap();

    for node in &outcome.nodes {
        assert_eq!(node.level, outcome.network.level_of(node.index));
    }
    // leaves have no downlines at any tier
    for node in &outcome.nodes {
        if outcome.network.left(node.index).is_none() {
            assert_eq!(node.green_downline_count, 0);
            assert_eq!(node.silver_downline_count, 0);
        }
    }
    // root sees every GREEN-or-better member below it
    assert_eq!(outcome.nodes[0].green_downline_count, 14);
    assert_eq!(outcome.nodes[0].silver_downline_count, 0);
}

#[test]
fn given_member_report_when_requested_then_detail_matches_run() {
    init_test_setup();
    let config = SimulationConfig::default();
    let report = SimulationService::member_report(&config, 0).unwrap();
    assert_eq!(report.node.tier, Tier::Silver);
    assert_eq!(report.node.bonus_accrued, 15_000_000);
    assert_eq!(report.downline_size, 126);
}

#[test]
fn given_out_of_bounds_member_when_reported_then_error() {
    init_test_setup();
    let config = SimulationConfig {
        depth: 2,
        ..Default::default()
    };
    let err = SimulationService::member_report(&config, 7).unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::MemberOutOfBounds { index: 7, max: 6 }
    ));
}
