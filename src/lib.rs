// Domain layer - cells, rules and the grid transition
pub mod domain;

// Application layer - engine and window-loop state
pub mod application;

pub mod config;
pub mod error;
pub mod logging;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Algorithm, Cell, Grid, NeighborCounts, Pattern, Rule, RuleConfig, presets};
pub use application::{AutomatonEngine, GameState};
pub use config::{Cli, SimulatorConfig};
pub use error::{ConfigError, EngineError};
