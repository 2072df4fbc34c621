use super::{Cell, rules::{NeighborCounts, Rule}};
use crate::error::EngineError;
use rand::Rng;
use rayon::prelude::*;

/// Grid is a dense `rows x cols` array of cell states, row-major.
/// Edges are hard: neighborhoods are clipped, never wrapped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells dead
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::EmptyGrid { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::DEAD; rows * cols],
        })
    }

    /// Build a grid from raw state rows. Every row must have the same length.
    pub fn from_states(states: &[&[u32]]) -> Result<Self, EngineError> {
        let rows = states.len();
        let cols = states.first().map_or(0, |row| row.len());
        let mut grid = Self::new(rows, cols)?;
        for (row, values) in states.iter().enumerate() {
            if values.len() != cols {
                return Err(EngineError::RaggedRow { row, len: values.len(), cols });
            }
            for (col, &state) in values.iter().enumerate() {
                grid.set(row, col, Cell(state))?;
            }
        }
        Ok(grid)
    }

    /// Get grid dimensions as `(rows, cols)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check(&self, row: usize, col: usize) -> Result<usize, EngineError> {
        if row < self.rows && col < self.cols {
            Ok(self.index(row, col))
        } else {
            Err(EngineError::OutOfBounds { row, col, rows: self.rows, cols: self.cols })
        }
    }

    /// Bounds-checked read
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, EngineError> {
        self.check(row, col).map(|idx| self.cells[idx])
    }

    /// Bounds-checked write
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), EngineError> {
        let idx = self.check(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Kill a living or decaying cell, or birth a dead one at state 1.
    /// Returns the new value.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell, EngineError> {
        let idx = self.check(row, col)?;
        let next = self.cells[idx].toggle();
        self.cells[idx] = next;
        Ok(next)
    }

    /// Scan the square window of `radius` around `(row, col)`, clipped to the grid
    pub fn count_neighbors(&self, row: usize, col: usize, radius: usize) -> NeighborCounts {
        let row_range = row.saturating_sub(radius)..=row.saturating_add(radius).min(self.rows - 1);
        let col_range = col.saturating_sub(radius)..=col.saturating_add(radius).min(self.cols - 1);

        let mut counts = NeighborCounts::default();
        for r in row_range {
            let base = r * self.cols;
            for c in col_range.clone() {
                if r == row && c == col {
                    continue;
                }
                let cell = self.cells[base + c];
                if cell.is_fresh() {
                    counts.alive += 1;
                }
                if cell.is_alive() {
                    counts.any += 1;
                }
            }
        }
        counts
    }

    fn next_cell(&self, idx: usize, rule: &dyn Rule) -> Cell {
        let (row, col) = (idx / self.cols, idx % self.cols);
        let neighbors = self.count_neighbors(row, col, rule.radius());
        rule.evolve(self.cells[idx], neighbors)
    }

    /// Compute the next generation (serial). Reads only `self`, so every
    /// cell sees the same snapshot.
    pub fn evolve(&self, rule: &dyn Rule) -> Self {
        let cells = (0..self.cells.len())
            .map(|idx| self.next_cell(idx, rule))
            .collect();

        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Parallel evolution using rayon; identical output to `evolve`
    pub fn evolve_parallel(&self, rule: &dyn Rule) -> Self {
        let cells: Vec<Cell> = (0..self.cells.len())
            .into_par_iter()
            .map(|idx| self.next_cell(idx, rule))
            .collect();

        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Clear all cells to dead state
    pub fn clear(&mut self) {
        self.cells.fill(Cell::DEAD);
    }

    /// Fill with fresh cells at the given density, everything else dead
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        self.cells.iter_mut().for_each(|cell| {
            *cell = if rng.random_bool(density) { Cell::FRESH } else { Cell::DEAD };
        });
    }

    /// Cells with state > 0
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Cells in state exactly 1
    pub fn fresh_population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_fresh()).count()
    }

    /// Iterate over all cells with their positions as `(row, col, cell)`
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (idx / self.cols, idx % self.cols, cell))
    }

    /// Copy out the raw states, one `Vec` per row
    pub fn to_states(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.state()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleConfig;
    use rand::{SeedableRng, rngs::StdRng};

    /// Reference step that copies the snapshot first and indexes it directly
    fn reference_step(grid: &Grid, rule: &RuleConfig) -> Vec<Vec<u32>> {
        let snapshot = grid.to_states();
        let (rows, cols) = grid.dimensions();
        let r = rule.neighborhood as i64;
        let mut next = vec![vec![0u32; cols]; rows];
        for i in 0..rows {
            for j in 0..cols {
                let mut alive = 0;
                for di in -r..=r {
                    for dj in -r..=r {
                        if di == 0 && dj == 0 {
                            continue;
                        }
                        let (x, y) = (i as i64 + di, j as i64 + dj);
                        if x < 0 || x >= rows as i64 || y < 0 || y >= cols as i64 {
                            continue;
                        }
                        if snapshot[x as usize][y as usize] == 1 {
                            alive += 1;
                        }
                    }
                }
                let counts = NeighborCounts { alive, any: 0 };
                next[i][j] = rule.evolve(Cell(snapshot[i][j]), counts).state();
            }
        }
        next
    }

    fn random_grid(seed: u64, rows: usize, cols: usize, max_state: u32) -> Grid {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Grid::new(rows, cols).unwrap();
        for row in 0..rows {
            for col in 0..cols {
                let state = if rng.random_bool(0.4) { rng.random_range(1..=max_state) } else { 0 };
                grid.set(row, col, Cell(state)).unwrap();
            }
        }
        grid
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(Grid::new(0, 4), Err(EngineError::EmptyGrid { rows: 0, cols: 4 }));
        assert!(Grid::new(3, 0).is_err());
    }

    #[test]
    fn test_new_grid_is_all_dead() {
        let grid = Grid::new(4, 7).unwrap();
        assert_eq!(grid.dimensions(), (4, 7));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_out_of_bounds_access_is_an_error() {
        let mut grid = Grid::new(3, 5).unwrap();
        let err = EngineError::OutOfBounds { row: 3, col: 0, rows: 3, cols: 5 };
        assert_eq!(grid.cell_at(3, 0), Err(err.clone()));
        assert_eq!(grid.toggle(3, 0), Err(err));
        assert!(grid.set(0, 5, Cell::FRESH).is_err());
    }

    #[test]
    fn test_row_major_addressing() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.set(1, 2, Cell(4)).unwrap();
        assert_eq!(grid.cells[5], Cell(4));
        assert_eq!(grid.to_states(), vec![vec![0, 0, 0], vec![0, 0, 4]]);
    }

    #[test]
    fn test_from_states_rejects_ragged_rows() {
        assert_eq!(
            Grid::from_states(&[&[0, 1], &[1]]),
            Err(EngineError::RaggedRow { row: 1, len: 1, cols: 2 })
        );
        assert!(Grid::from_states(&[]).is_err());
    }

    #[test]
    fn test_corner_counts_exclude_outside_positions() {
        let grid = Grid::from_states(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]).unwrap();
        assert_eq!(grid.count_neighbors(0, 0, 1).alive, 3);
        assert_eq!(grid.count_neighbors(0, 1, 1).alive, 5);
        assert_eq!(grid.count_neighbors(1, 1, 1).alive, 8);
        // Radius larger than the grid still only sees the grid
        assert_eq!(grid.count_neighbors(0, 0, 5).alive, 8);
    }

    #[test]
    fn test_no_wraparound() {
        let grid = Grid::from_states(&[&[0, 0, 0, 1], &[0, 0, 0, 0], &[0, 0, 0, 0], &[1, 0, 0, 0]]).unwrap();
        assert_eq!(grid.count_neighbors(0, 0, 1), NeighborCounts::default());
        assert_eq!(grid.count_neighbors(3, 3, 2), NeighborCounts::default());
    }

    #[test]
    fn test_decaying_neighbors_only_count_as_any() {
        let grid = Grid::from_states(&[&[2, 1, 0], &[0, 0, 7], &[0, 1, 0]]).unwrap();
        let counts = grid.count_neighbors(1, 1, 1);
        assert_eq!(counts, NeighborCounts { alive: 2, any: 4 });
    }

    #[test]
    fn test_center_cell_is_excluded() {
        let grid = Grid::from_states(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]).unwrap();
        assert_eq!(grid.count_neighbors(1, 1, 1).any, 0);
    }

    #[test]
    fn test_blinker_rotates() {
        let grid = Grid::from_states(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]]).unwrap();
        let next = grid.evolve(&RuleConfig::conway());
        assert_eq!(next.to_states(), vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]]);
    }

    #[test]
    fn test_evolve_matches_snapshot_reference() {
        let rules = [
            RuleConfig::conway(),
            RuleConfig::decay(),
            RuleConfig::new([1, 2], [0, 3], 2, 4),
            RuleConfig::new([], [], 1, 3),
        ];
        for (seed, rule) in rules.iter().enumerate() {
            let max_state = rule.state_count + 1;
            let grid = random_grid(seed as u64, 17, 23, max_state);
            assert_eq!(grid.evolve(rule).to_states(), reference_step(&grid, rule), "rule {rule}");
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        for seed in 0..4 {
            let grid = random_grid(100 + seed, 31, 19, 11);
            let rule = RuleConfig::decay();
            assert_eq!(grid.evolve_parallel(&rule), grid.evolve(&rule));
        }
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let grid = Grid::new(8, 5).unwrap();
        for (_, rule) in crate::domain::all_rules() {
            assert_eq!(grid.evolve(&rule).population(), 0);
        }
    }

    #[test]
    fn test_randomize_only_writes_dead_or_fresh() {
        let mut grid = Grid::new(20, 20).unwrap();
        grid.randomize(&mut StdRng::seed_from_u64(7), 0.5);
        assert!(grid.iter_cells().all(|(_, _, cell)| cell.state() <= 1));
        assert_eq!(grid.population(), grid.fresh_population());

        grid.randomize(&mut StdRng::seed_from_u64(7), 1.5);
        assert_eq!(grid.population(), 400);
        grid.clear();
        assert_eq!(grid.population(), 0);
    }
}
