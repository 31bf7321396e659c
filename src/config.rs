//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (the plan's standard parameters)
//! 2. Global config: `$XDG_CONFIG_HOME/binplan/binplan.toml`
//! 3. Local config: `./binplan.toml` (or the path given on the CLI)
//! 4. Environment variables: `BINPLAN_*` prefix
//!
//! CLI flags override the loaded settings field by field on top.

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::SimulationConfig;

/// Loadable mirror of [`SimulationConfig`].
///
/// Kept separate so the domain stays serde-free; `to_simulation_config`
/// produces the immutable value a run receives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub depth: u32,
    pub green_matrix_depth: u32,
    pub silver_threshold: u32,
    pub red_threshold: u32,
    pub bonus_green: u64,
    pub bonus_silver: u64,
    pub bonus_red: u64,
    pub spend_per_member: u64,
    pub allocation_per_member: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let config = SimulationConfig::default();
        Self {
            depth: config.depth,
            green_matrix_depth: config.green_matrix_depth,
            silver_threshold: config.silver_threshold,
            red_threshold: config.red_threshold,
            bonus_green: config.bonus_green,
            bonus_silver: config.bonus_silver,
            bonus_red: config.bonus_red,
            spend_per_member: config.spend_per_member,
            allocation_per_member: config.allocation_per_member,
        }
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// An explicitly given local config path must exist; the implicit
    /// `./binplan.toml` and the global config are optional.
    pub fn load(local_config: Option<&Path>) -> ApplicationResult<Self> {
        let defaults = Config::try_from(&Settings::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(global) = global_config_path() {
            builder = builder.add_source(File::from(global).required(false));
        }

        let explicit = local_config.is_some();
        let local = local_config
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("binplan.toml"));
        builder = builder
            .add_source(File::from(local).required(explicit))
            .add_source(Environment::with_prefix("BINPLAN").try_parsing(true));

        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error)
    }

    /// The immutable configuration one run receives.
    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            depth: self.depth,
            green_matrix_depth: self.green_matrix_depth,
            silver_threshold: self.silver_threshold,
            red_threshold: self.red_threshold,
            bonus_green: self.bonus_green,
            bonus_silver: self.bonus_silver,
            bonus_red: self.bonus_red,
            spend_per_member: self.spend_per_member,
            allocation_per_member: self.allocation_per_member,
        }
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(config_error)
    }
}

fn config_error(err: impl fmt::Display) -> ApplicationError {
    ApplicationError::Config {
        message: err.to_string(),
    }
}

/// XDG config directory for binplan.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "binplan").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("binplan.toml"))
}
