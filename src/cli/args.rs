//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Binary referral network simulator: tier qualification and bonus payout forecasting
#[derive(Parser, Debug)]
#[command(name = "binplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (repeat for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: ./binplan.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: PlanOverrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Plan parameters; every flag overrides the corresponding setting
/// from config files and `BINPLAN_*` env vars.
#[derive(Args, Debug, Default, Clone)]
pub struct PlanOverrides {
    /// Network depth, levels below the root (max 24)
    #[arg(long, global = true)]
    pub depth: Option<u32>,

    /// Perfect-subtree depth required under each leg for GREEN
    #[arg(long, global = true)]
    pub green_matrix_depth: Option<u32>,

    /// GREEN downlines required for SILVER
    #[arg(long, global = true)]
    pub silver_threshold: Option<u32>,

    /// SILVER downlines required for RED
    #[arg(long, global = true)]
    pub red_threshold: Option<u32>,

    /// GREEN bonus (Rp)
    #[arg(long, global = true)]
    pub bonus_green: Option<u64>,

    /// SILVER bonus (Rp)
    #[arg(long, global = true)]
    pub bonus_silver: Option<u64>,

    /// RED bonus (Rp)
    #[arg(long, global = true)]
    pub bonus_red: Option<u64>,

    /// Spend per member (Rp)
    #[arg(long, global = true)]
    pub spend: Option<u64>,

    /// Bonus pool allocation per member (Rp)
    #[arg(long, global = true)]
    pub allocation: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one simulation and print the payout summary
    Run,

    /// Show one member's tier, bonus, and downline counts
    Member {
        /// Zero-based member index
        index: usize,
    },

    /// Render the network with per-member tiers
    Tree {
        /// Deepest level to render (default: full depth)
        #[arg(long)]
        max_level: Option<u32>,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
