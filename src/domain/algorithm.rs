//! Evolution strategy selection.
//!
//! Both strategies perform the same full-grid scan against the current
//! snapshot; they differ only in how the scan is scheduled.

use serde::{Deserialize, Serialize};

use super::{Grid, Rule};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// One cell after another on the calling thread
    #[default]
    Serial,
    /// Cells split across rayon workers
    Parallel,
}

impl Algorithm {
    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }

    /// Compute the next generation of `grid` with this strategy
    pub fn evolve(self, grid: &Grid, rule: &dyn Rule) -> Grid {
        match self {
            Algorithm::Serial => grid.evolve(rule),
            Algorithm::Parallel => grid.evolve_parallel(rule),
        }
    }
}
