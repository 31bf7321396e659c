//! Command dispatch

use std::io;

use clap::{Command, CommandFactory};
use clap_complete::{generate, Generator};
use colored::Colorize;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{SimulationOutcome, SimulationService};
use crate::cli::args::{Cli, Commands, PlanOverrides};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::SimulationConfig;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    apply_overrides(&mut settings, &cli.overrides);
    let config = settings.to_simulation_config();

    match &cli.command {
        Some(Commands::Run) | None => _run(&config),
        Some(Commands::Member { index }) => _member(&config, *index),
        Some(Commands::Tree { max_level }) => _tree(&config, *max_level),
        Some(Commands::Config) => _config(&settings),
        Some(Commands::Completion { shell }) => {
            print_completions(*shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn apply_overrides(settings: &mut Settings, overrides: &PlanOverrides) {
    if let Some(depth) = overrides.depth {
        settings.depth = depth;
    }
    if let Some(green_matrix_depth) = overrides.green_matrix_depth {
        settings.green_matrix_depth = green_matrix_depth;
    }
    if let Some(silver_threshold) = overrides.silver_threshold {
        settings.silver_threshold = silver_threshold;
    }
    if let Some(red_threshold) = overrides.red_threshold {
        settings.red_threshold = red_threshold;
    }
    if let Some(bonus_green) = overrides.bonus_green {
        settings.bonus_green = bonus_green;
    }
    if let Some(bonus_silver) = overrides.bonus_silver {
        settings.bonus_silver = bonus_silver;
    }
    if let Some(bonus_red) = overrides.bonus_red {
        settings.bonus_red = bonus_red;
    }
    if let Some(spend) = overrides.spend {
        settings.spend_per_member = spend;
    }
    if let Some(allocation) = overrides.allocation {
        settings.allocation_per_member = allocation;
    }
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

#[instrument(skip(config))]
fn _run(config: &SimulationConfig) -> CliResult<()> {
    debug!("depth: {}", config.depth);
    let outcome = SimulationService::run(config)?;
    let summary = &outcome.summary;

    output::header("Simulation Summary");
    output::field("Members", &summary.member_count);
    output::field("Network depth", &config.depth);
    println!();

    output::header("Tier Payouts");
    let counts = [
        summary.tier_counts.green,
        summary.tier_counts.silver,
        summary.tier_counts.red,
    ];
    for (payout, members) in outcome.payouts.iter().zip(counts) {
        println!(
            "  {:<8} {:>9} members  {:>9} qualified  {:>20}",
            output::tier_label(payout.tier),
            members,
            payout.qualified,
            output::rupiah(payout.total),
        );
    }
    println!();

    output::header("Cashflow");
    output::field("Gross spend", &output::rupiah(summary.gross_spend));
    output::field("Cash in (allocation)", &output::rupiah(summary.cash_in));
    output::field("Cash out (bonuses)", &output::rupiah(summary.cash_out));
    output::field("Net", &output::rupiah_signed(summary.net));
    if summary.is_loss() {
        output::warning("plan pays out more than the allocation takes in");
    }
    Ok(())
}

#[instrument(skip(config))]
fn _member(config: &SimulationConfig, index: usize) -> CliResult<()> {
    let report = SimulationService::member_report(config, index)?;
    let node = &report.node;

    output::header(&format!("Member #{}", index));
    output::field("Level", &node.level);
    output::field("Status", &output::tier_label(node.tier));
    output::field("Bonus", &output::rupiah(node.bonus_accrued as u128));
    output::field("Green downlines", &node.green_downline_count);
    output::field("Silver downlines", &node.silver_downline_count);
    output::field("Downline size", &report.downline_size);
    Ok(())
}

#[instrument(skip(config))]
fn _tree(config: &SimulationConfig, max_level: Option<u32>) -> CliResult<()> {
    let outcome = SimulationService::run(config)?;
    let max_level = max_level.unwrap_or(outcome.network.depth());
    println!("{}", render_subtree(&outcome, 0, max_level));
    Ok(())
}

/// Build the display tree down to `max_level`.
///
/// Recursion depth is capped by MAX_DEPTH, which a built network has
/// already enforced.
fn render_subtree(outcome: &SimulationOutcome, index: usize, max_level: u32) -> Tree<String> {
    let node = &outcome.nodes[index];
    let mut tree = Tree::new(format!(
        "#{} {}",
        index.to_string().bold(),
        output::tier_label(node.tier)
    ));
    if node.level < max_level {
        if let Some(left) = outcome.network.left(index) {
            tree.push(render_subtree(outcome, left, max_level));
        }
        if let Some(right) = outcome.network.right(index) {
            tree.push(render_subtree(outcome, right, max_level));
        }
    }
    tree
}

fn _config(settings: &Settings) -> CliResult<()> {
    print!("{}", settings.to_toml()?);
    Ok(())
}
