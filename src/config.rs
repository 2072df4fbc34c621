//! Driver configuration: defaults, JSON loading and command-line overrides.
//!
//! Textual rule fields are parsed here, on the driver side; the engine only
//! ever receives a typed [`RuleConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::domain::{Algorithm, RuleConfig, parse_count_list, parse_non_negative};
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub rows: usize,
    pub cols: usize,
    /// Pixels per cell, used for both drawing and pointer mapping.
    pub cell_size: f32,
    /// Delay between generations while running.
    pub update_interval_ms: u64,
    pub start_paused: bool,
    /// Probability of a fresh cell when randomizing.
    pub random_density: f64,
    pub rule: RuleConfig,
    pub algorithm: Algorithm,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            rows: 60,
            cols: 60,
            cell_size: 10.0,
            update_interval_ms: 100,
            start_paused: true,
            random_density: 0.3,
            rule: RuleConfig::default(),
            algorithm: Algorithm::default(),
        }
    }
}

impl SimulatorConfig {
    pub const MIN_INTERVAL_MS: u64 = 10;
    pub const MAX_INTERVAL_MS: u64 = 2000;

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::NotPositive { field: "rows" });
        }
        if self.cols == 0 {
            return Err(ConfigError::NotPositive { field: "cols" });
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::NotPositive { field: "cell_size" });
        }
        if self.update_interval_ms == 0 {
            return Err(ConfigError::NotPositive { field: "update_interval_ms" });
        }
        self.rule.validate()
    }
}

/// Command line for the simulator window.
#[derive(Debug, Parser)]
#[command(name = "decay_life", about = "Multi-state cellular automaton simulator")]
pub struct Cli {
    /// JSON file with a SimulatorConfig; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub rows: Option<usize>,

    #[arg(long)]
    pub cols: Option<usize>,

    /// Pixels per cell
    #[arg(long)]
    pub cell_size: Option<f32>,

    /// Milliseconds between generations while running
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Full rule string, e.g. B23/S4/R3/C10
    #[arg(long, conflicts_with_all = ["birth", "survival", "neighborhood", "states"])]
    pub rule: Option<String>,

    /// Comma-separated birth counts, e.g. "2,3"
    #[arg(long, allow_hyphen_values = true)]
    pub birth: Option<String>,

    /// Comma-separated survival counts, e.g. "4"
    #[arg(long, allow_hyphen_values = true)]
    pub survival: Option<String>,

    /// Neighborhood radius
    #[arg(long, allow_hyphen_values = true)]
    pub neighborhood: Option<String>,

    /// Number of states; above 2 enables decay
    #[arg(long, allow_hyphen_values = true)]
    pub states: Option<String>,

    /// Evolve with the parallel strategy
    #[arg(long)]
    pub parallel: bool,

    /// Start running instead of paused
    #[arg(long)]
    pub run: bool,

    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Resolve the final configuration: file (or defaults), then flag overrides
    pub fn to_config(&self) -> Result<SimulatorConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SimulatorConfig::load(path)?,
            None => SimulatorConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(interval) = self.interval_ms {
            config.update_interval_ms = interval;
        }
        if self.parallel {
            config.algorithm = Algorithm::Parallel;
        }
        if self.run {
            config.start_paused = false;
        }

        if let Some(rule) = &self.rule {
            config.rule = rule.parse()?;
        }
        if let Some(birth) = &self.birth {
            config.rule.birth = parse_count_list("birth", birth)?;
        }
        if let Some(survival) = &self.survival {
            config.rule.survival = parse_count_list("survival", survival)?;
        }
        if let Some(radius) = &self.neighborhood {
            config.rule.neighborhood = parse_non_negative("neighborhood", radius)?;
        }
        if let Some(states) = &self.states {
            config.rule.state_count = parse_non_negative("stateCount", states)?;
        }

        config.validate()?;
        Ok(config)
    }
}
