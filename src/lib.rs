//! binplan: binary referral network compensation simulator
//!
//! Forecasts compensation-plan cost for a perfectly balanced binary
//! referral network: which members reach GREEN, SILVER, and RED, what
//! each tier pays out, and whether the plan runs at a loss.
//!
//! Layering follows a strict one-way flow:
//! - [`domain`] — the pure engine (network, downlines, tiers, ledger,
//!   summary); no I/O, no ambient state
//! - [`application`] — orchestration of one run
//! - [`cli`] + [`config`] — the presentation collaborator that supplies
//!   the configuration and renders the output model

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
