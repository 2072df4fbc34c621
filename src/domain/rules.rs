use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Cell;
use crate::error::ConfigError;

/// Neighbor tallies gathered in one scan around a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborCounts {
    /// Neighbors in state exactly 1. Decaying cells are not counted.
    pub alive: usize,
    /// Neighbors in any non-zero state. Diagnostic only, never drives a transition.
    pub any: usize,
}

/// Trait for cellular automaton rules
/// The grid scans a square window of `radius` around each cell and hands the counts here
pub trait Rule: Send + Sync {
    /// Half-width of the square neighborhood, excluding the center cell
    fn radius(&self) -> usize;

    /// Apply rule to compute next cell state
    fn evolve(&self, current: Cell, neighbors: NeighborCounts) -> Cell;
}

/// Birth/survival rule with a configurable neighborhood radius and decay states.
///
/// `birth` and `survival` may hold any integers; counts that can never occur
/// for the radius are simply never matched. With `state_count == 2` the rule
/// is strictly binary; above that, a cell failing survival fades one state per
/// generation until it passes `state_count` and is reset to dead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub birth: BTreeSet<i64>,
    pub survival: BTreeSet<i64>,
    pub neighborhood: u32,
    pub state_count: u32,
}

impl RuleConfig {
    pub fn new(
        birth: impl IntoIterator<Item = i64>,
        survival: impl IntoIterator<Item = i64>,
        neighborhood: u32,
        state_count: u32,
    ) -> Self {
        Self {
            birth: birth.into_iter().collect(),
            survival: survival.into_iter().collect(),
            neighborhood,
            state_count,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.neighborhood < 1 {
            return Err(ConfigError::NeighborhoodTooSmall(self.neighborhood));
        }
        if self.state_count < 2 {
            return Err(ConfigError::StateCountTooSmall(self.state_count));
        }
        Ok(())
    }

    /// Two-state mode: failing survival kills outright
    pub const fn is_binary(&self) -> bool {
        self.state_count <= 2
    }

    fn births_on(&self, alive: usize) -> bool {
        i64::try_from(alive).is_ok_and(|n| self.birth.contains(&n))
    }

    fn survives_on(&self, alive: usize) -> bool {
        i64::try_from(alive).is_ok_and(|n| self.survival.contains(&n))
    }

    /// B23/S4/R3/C10 - the long-range decaying rule the simulator opens with
    pub fn decay() -> Self {
        Self::new([2, 3], [4], 3, 10)
    }

    /// B3/S23 - Conway's Game of Life
    pub fn conway() -> Self {
        Self::new([3], [2, 3], 1, 2)
    }

    /// B36/S23 - HighLife, home of the replicator
    pub fn high_life() -> Self {
        Self::new([3, 6], [2, 3], 1, 2)
    }

    /// B2/S - every live cell dies each generation
    pub fn seeds() -> Self {
        Self::new([2], [], 1, 2)
    }

    /// B3678/S34678 - symmetric under inversion
    pub fn day_and_night() -> Self {
        Self::new([3, 6, 7, 8], [3, 4, 6, 7, 8], 1, 2)
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::decay()
    }
}

impl Rule for RuleConfig {
    fn radius(&self) -> usize {
        self.neighborhood as usize
    }

    fn evolve(&self, current: Cell, neighbors: NeighborCounts) -> Cell {
        let next = if current.is_alive() {
            if self.survives_on(neighbors.alive) {
                current
            } else if self.is_binary() {
                Cell::DEAD
            } else {
                current.decayed()
            }
        } else if self.births_on(neighbors.alive) {
            Cell::FRESH
        } else {
            Cell::DEAD
        };

        // Checked against the state before this step, so a cell lingers at
        // `state_count + 1` for one generation before it is cleared.
        if !self.is_binary() && current.state() > self.state_count {
            Cell::DEAD
        } else {
            next
        }
    }
}

/// Get all named rules
pub fn all_rules() -> Vec<(&'static str, RuleConfig)> {
    vec![
        ("Decay", RuleConfig::decay()),
        ("Conway", RuleConfig::conway()),
        ("HighLife", RuleConfig::high_life()),
        ("Seeds", RuleConfig::seeds()),
        ("Day&Night", RuleConfig::day_and_night()),
    ]
}

/// Parse a comma-separated list of neighbor counts such as `"2,3"`.
/// Blank tokens are skipped, so `""` is the empty set.
pub fn parse_count_list(field: &'static str, text: &str) -> Result<BTreeSet<i64>, ConfigError> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i64>().map_err(|_| ConfigError::InvalidNumber {
                field,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse a single non-negative integer field such as a radius or state count.
pub fn parse_non_negative(field: &'static str, text: &str) -> Result<u32, ConfigError> {
    let token = text.trim();
    let invalid = || ConfigError::InvalidNumber {
        field,
        token: token.to_string(),
    };
    let value: i64 = token.parse().map_err(|_| invalid())?;
    if value < 0 {
        return Err(ConfigError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| invalid())
}

/// Rule-string counts are a digit run (`36`) or, when any entry needs more
/// than one character, a comma list (`2,10`; a lone entry keeps a trailing comma).
fn parse_rule_counts(field: &'static str, body: &str) -> Result<BTreeSet<i64>, ConfigError> {
    if body.contains(',') {
        return parse_count_list(field, body);
    }
    body.chars()
        .map(|c| {
            c.to_digit(10).map(i64::from).ok_or_else(|| ConfigError::InvalidNumber {
                field,
                token: c.to_string(),
            })
        })
        .collect()
}

fn format_rule_counts(counts: &BTreeSet<i64>) -> String {
    if counts.iter().all(|n| (0..=9).contains(n)) {
        return counts.iter().map(i64::to_string).collect();
    }
    let list: Vec<String> = counts.iter().map(i64::to_string).collect();
    if list.len() == 1 {
        format!("{},", list[0])
    } else {
        list.join(",")
    }
}

impl fmt::Display for RuleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B{}/S{}/R{}/C{}",
            format_rule_counts(&self.birth),
            format_rule_counts(&self.survival),
            self.neighborhood,
            self.state_count
        )
    }
}

impl FromStr for RuleConfig {
    type Err = ConfigError;

    /// Parses `B<counts>/S<counts>[/R<radius>][/C<states>]`; R defaults to 1, C to 2.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedRule(s.to_string());

        let mut birth = None;
        let mut survival = None;
        let mut neighborhood = None;
        let mut state_count = None;

        for part in s.trim().split('/') {
            let part = part.trim();
            let mut chars = part.chars();
            let tag = chars.next().ok_or_else(malformed)?.to_ascii_uppercase();
            let body = chars.as_str();
            match tag {
                'B' if birth.is_none() => birth = Some(parse_rule_counts("birth", body)?),
                'S' if survival.is_none() => survival = Some(parse_rule_counts("survival", body)?),
                'R' if neighborhood.is_none() => {
                    neighborhood = Some(parse_non_negative("neighborhood", body)?)
                }
                'C' if state_count.is_none() => {
                    state_count = Some(parse_non_negative("stateCount", body)?)
                }
                _ => return Err(malformed()),
            }
        }

        let rule = Self {
            birth: birth.ok_or_else(malformed)?,
            survival: survival.ok_or_else(malformed)?,
            neighborhood: neighborhood.unwrap_or(1),
            state_count: state_count.unwrap_or(2),
        };
        rule.validate()?;
        Ok(rule)
    }
}
