//! Error types for the automaton engine and its driver.

use thiserror::Error;

/// Errors raised by the engine while mutating or reading the grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Coordinates fall outside `[0, rows) x [0, cols)`.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A grid was requested with a zero dimension.
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    /// A row of raw states is shorter or longer than the first row.
    #[error("row {row} has {len} cells, expected {cols}")]
    RaggedRow { row: usize, len: usize, cols: usize },

    /// The rule configuration was rejected.
    #[error("invalid rule configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Errors raised while validating or parsing rule and driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("neighborhood radius must be at least 1, got {0}")]
    NeighborhoodTooSmall(u32),

    #[error("state count must be at least 2, got {0}")]
    StateCountTooSmall(u32),

    #[error("invalid number {token:?} in {field}")]
    InvalidNumber { field: &'static str, token: String },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("malformed rule string {0:?}")]
    MalformedRule(String),

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("failed to load configuration: {0}")]
    Load(String),
}
