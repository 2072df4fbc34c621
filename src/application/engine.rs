use log::debug;
use rand::Rng;

use crate::domain::{Algorithm, Cell, Grid, NeighborCounts, Pattern, Rule, RuleConfig};
use crate::error::EngineError;

/// AutomatonEngine owns the grid and the active rule.
///
/// Drivers configure it, toggle cells between generations, advance it one
/// generation at a time and read the grid back for display. It has no notion
/// of time or pausing; the caller decides when to advance.
#[derive(Clone, Debug)]
pub struct AutomatonEngine {
    grid: Grid,
    rule: RuleConfig,
    algorithm: Algorithm,
    generation: u64,
}

impl AutomatonEngine {
    /// Create an engine with an all-dead `rows x cols` grid.
    /// Without a rule the default decaying rule is used.
    pub fn new(rows: usize, cols: usize, rule: Option<RuleConfig>) -> Result<Self, EngineError> {
        let rule = rule.unwrap_or_default();
        rule.validate()?;
        Ok(Self {
            grid: Grid::new(rows, cols)?,
            rule,
            algorithm: Algorithm::default(),
            generation: 0,
        })
    }

    /// Replace the rule wholesale. The grid is left as is.
    pub fn configure(&mut self, rule: RuleConfig) -> Result<(), EngineError> {
        rule.validate()?;
        debug!("configured rule {rule}");
        self.rule = rule;
        Ok(())
    }

    pub fn rule(&self) -> &RuleConfig {
        &self.rule
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Flip one cell immediately: alive or decaying dies, dead is born fresh.
    /// The change is visible to the next `advance_generation`.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<Cell, EngineError> {
        let cell = self.grid.toggle(row, col)?;
        debug!("toggled ({row}, {col}) to state {}", cell.state());
        Ok(cell)
    }

    /// Derive the next generation from the current snapshot and make it current
    pub fn advance_generation(&mut self) -> &Grid {
        self.grid = self.algorithm.evolve(&self.grid, &self.rule);
        self.generation += 1;
        debug!(
            "generation {} population {}",
            self.generation,
            self.grid.population()
        );
        &self.grid
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, EngineError> {
        self.grid.cell_at(row, col)
    }

    /// Read-only copy of the current grid
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    /// Borrow the current grid without copying
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// Neighbor tallies the active rule would see at `(row, col)`.
    /// `any` is diagnostic only.
    pub fn neighbor_counts(&self, row: usize, col: usize) -> Result<NeighborCounts, EngineError> {
        self.grid.cell_at(row, col)?;
        Ok(self.grid.count_neighbors(row, col, self.rule.radius()))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn fresh_population(&self) -> usize {
        self.grid.fresh_population()
    }

    pub fn place_pattern(&mut self, pattern: &Pattern, row: usize, col: usize) -> Result<(), EngineError> {
        pattern.place_on(&mut self.grid, row, col)
    }

    /// Kill every cell and reset the generation counter
    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
    }

    /// Seed fresh cells at `density` and reset the generation counter
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        self.grid.randomize(rng, density);
        self.generation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;
    use crate::error::ConfigError;

    fn engine_with(states: &[&[u32]], rule: RuleConfig) -> AutomatonEngine {
        let grid = Grid::from_states(states).unwrap();
        let (rows, cols) = grid.dimensions();
        let mut engine = AutomatonEngine::new(rows, cols, Some(rule)).unwrap();
        for (row, col, cell) in grid.iter_cells() {
            engine.grid.set(row, col, cell).unwrap();
        }
        engine
    }

    #[test]
    fn test_new_engine_is_empty_with_default_rule() {
        let engine = AutomatonEngine::new(60, 60, None).unwrap();
        assert_eq!(engine.dimensions(), (60, 60));
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.rule(), &RuleConfig::decay());
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert_eq!(
            AutomatonEngine::new(0, 5, None).unwrap_err(),
            EngineError::EmptyGrid { rows: 0, cols: 5 }
        );
        assert_eq!(
            AutomatonEngine::new(5, 5, Some(RuleConfig::new([3], [2], 1, 0))).unwrap_err(),
            EngineError::InvalidConfig(ConfigError::StateCountTooSmall(0))
        );
    }

    #[test]
    fn test_blinker_scenario() {
        let mut engine = engine_with(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]], RuleConfig::conway());
        let next = engine.advance_generation().to_states();
        assert_eq!(next, vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]]);
        assert_eq!(engine.generation(), 1);

        engine.advance_generation();
        assert_eq!(engine.snapshot().to_states(), vec![vec![0, 1, 0], vec![0, 1, 0], vec![0, 1, 0]]);
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let mut engine = AutomatonEngine::new(9, 4, None).unwrap();
        for _ in 0..3 {
            assert_eq!(engine.advance_generation().population(), 0);
        }
    }

    #[test]
    fn test_decay_trail_sequence() {
        let mut engine = engine_with(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]], RuleConfig::new([], [], 1, 3));
        let mut trail = vec![engine.cell_at(1, 1).unwrap().state()];
        for _ in 0..4 {
            engine.advance_generation();
            trail.push(engine.cell_at(1, 1).unwrap().state());
        }
        assert_eq!(trail, vec![1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_decay_boundary_with_four_states() {
        let mut engine = engine_with(&[&[4]], RuleConfig::new([], [], 1, 4));
        assert_eq!(engine.advance_generation().cell_at(0, 0), Ok(Cell(5)));
        assert_eq!(engine.advance_generation().cell_at(0, 0), Ok(Cell::DEAD));
    }

    #[test]
    fn test_binary_death_is_immediate() {
        let mut engine = engine_with(&[&[0, 0], &[0, 1]], RuleConfig::new([3], [2, 3], 1, 2));
        assert_eq!(engine.advance_generation().cell_at(1, 1), Ok(Cell::DEAD));
    }

    #[test]
    fn test_decaying_cells_do_not_seed_births() {
        // Three decaying neighbors would birth the center under B3 if they counted
        let mut engine = engine_with(&[&[2, 2, 2], &[0, 0, 0], &[0, 0, 0]], RuleConfig::new([3], [], 1, 5));
        assert_eq!(engine.advance_generation().cell_at(1, 1), Ok(Cell::DEAD));

        let mut fresh = engine_with(&[&[1, 1, 1], &[0, 0, 0], &[0, 0, 0]], RuleConfig::new([3], [], 1, 5));
        assert_eq!(fresh.advance_generation().cell_at(1, 1), Ok(Cell::FRESH));
    }

    #[test]
    fn test_toggle_is_immediate_and_reversible() {
        let mut engine = AutomatonEngine::new(3, 3, Some(RuleConfig::conway())).unwrap();
        assert_eq!(engine.toggle_cell(0, 1), Ok(Cell::FRESH));
        assert_eq!(engine.cell_at(0, 1), Ok(Cell::FRESH));
        assert_eq!(engine.toggle_cell(0, 1), Ok(Cell::DEAD));
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn test_toggle_feeds_next_generation() {
        let mut engine = AutomatonEngine::new(3, 3, Some(RuleConfig::conway())).unwrap();
        for row in 0..3 {
            engine.toggle_cell(row, 1).unwrap();
        }
        assert_eq!(engine.advance_generation().fresh_population(), 3);
        assert_eq!(engine.cell_at(1, 0), Ok(Cell::FRESH));
    }

    #[test]
    fn test_toggle_out_of_bounds() {
        let mut engine = AutomatonEngine::new(3, 4, None).unwrap();
        assert_eq!(
            engine.toggle_cell(1, 4),
            Err(EngineError::OutOfBounds { row: 1, col: 4, rows: 3, cols: 4 })
        );
        assert!(engine.cell_at(3, 0).is_err());
        assert!(engine.neighbor_counts(9, 9).is_err());
    }

    #[test]
    fn test_configure_replaces_rule_and_keeps_grid() {
        let mut engine = AutomatonEngine::new(3, 3, None).unwrap();
        engine.toggle_cell(1, 1).unwrap();
        engine.configure(RuleConfig::seeds()).unwrap();
        assert_eq!(engine.rule(), &RuleConfig::seeds());
        assert_eq!(engine.population(), 1);
    }

    #[test]
    fn test_configure_rejects_invalid_rule_and_keeps_old_one() {
        let mut engine = AutomatonEngine::new(3, 3, Some(RuleConfig::conway())).unwrap();
        let err = engine.configure(RuleConfig::new([3], [2, 3], 0, 2)).unwrap_err();
        assert_eq!(err, EngineError::InvalidConfig(ConfigError::NeighborhoodTooSmall(0)));
        assert_eq!(engine.rule(), &RuleConfig::conway());
    }

    #[test]
    fn test_configure_is_idempotent() {
        let mut a = AutomatonEngine::new(12, 12, None).unwrap();
        presets::r_pentomino().place_on(&mut a.grid, 4, 4).unwrap();
        let mut b = a.clone();

        a.configure(RuleConfig::high_life()).unwrap();
        b.configure(RuleConfig::high_life()).unwrap();
        b.configure(RuleConfig::high_life()).unwrap();
        for _ in 0..5 {
            assert_eq!(a.advance_generation(), b.advance_generation());
        }
    }

    #[test]
    fn test_neighbor_counts_diagnostic() {
        let engine = engine_with(&[&[1, 3, 0], &[0, 0, 0], &[0, 0, 1]], RuleConfig::conway());
        assert_eq!(engine.neighbor_counts(1, 1), Ok(NeighborCounts { alive: 2, any: 3 }));
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let mut engine = AutomatonEngine::new(2, 2, None).unwrap();
        let before = engine.snapshot();
        engine.toggle_cell(0, 0).unwrap();
        assert_eq!(before.population(), 0);
        assert_eq!(engine.grid().population(), 1);
    }

    #[test]
    fn test_parallel_engine_matches_serial_engine() {
        let mut serial = AutomatonEngine::new(20, 20, Some(RuleConfig::new([2, 3], [4], 2, 6))).unwrap();
        serial.place_pattern(&presets::glider(), 3, 3).unwrap();
        serial.place_pattern(&presets::r_pentomino(), 10, 12).unwrap();
        let mut parallel = serial.clone();
        parallel.set_algorithm(Algorithm::Parallel);

        for _ in 0..8 {
            assert_eq!(serial.advance_generation(), parallel.advance_generation());
        }
    }

    #[test]
    fn test_clear_and_randomize_reset_generation() {
        use rand::{SeedableRng, rngs::StdRng};

        let mut engine = AutomatonEngine::new(10, 10, None).unwrap();
        engine.randomize(&mut StdRng::seed_from_u64(3), 0.5);
        assert!(engine.population() > 0);
        engine.advance_generation();
        assert_eq!(engine.generation(), 1);

        engine.clear();
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.generation(), 0);
    }
}
