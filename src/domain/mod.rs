mod cell;
mod grid;
mod rules;
mod patterns;
mod algorithm;

pub use cell::Cell;
pub use grid::Grid;
pub use rules::{
    NeighborCounts, Rule, RuleConfig, all_rules, parse_count_list, parse_non_negative,
};
pub use patterns::{Pattern, presets};
pub use algorithm::Algorithm;
