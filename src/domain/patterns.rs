use super::{Cell, Grid};
use crate::error::EngineError;

/// A small seed shape: fresh cells at offsets relative to its top-left corner
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<(usize, usize)>, // (row, col) offsets of live cells
}

impl Pattern {
    /// Create a new pattern from live cell offsets
    pub fn new(name: &'static str, cells: Vec<(usize, usize)>) -> Self {
        let rows = cells.iter().map(|(r, _)| *r).max().unwrap_or(0) + 1;
        let cols = cells.iter().map(|(_, c)| *c).max().unwrap_or(0) + 1;
        Self { name, rows, cols, cells }
    }

    /// Stamp the pattern with its top-left corner at `(row, col)`.
    /// Nothing is written unless every cell fits.
    pub fn place_on(&self, grid: &mut Grid, row: usize, col: usize) -> Result<(), EngineError> {
        let (grid_rows, grid_cols) = grid.dimensions();
        let last = (row.saturating_add(self.rows - 1), col.saturating_add(self.cols - 1));
        if last.0 >= grid_rows || last.1 >= grid_cols {
            return Err(EngineError::OutOfBounds {
                row: last.0,
                col: last.1,
                rows: grid_rows,
                cols: grid_cols,
            });
        }
        self.cells
            .iter()
            .try_for_each(|(dr, dc)| grid.set(row + dr, col + dc, Cell::FRESH))
    }
}

/// Seed shapes
pub mod presets {
    use super::*;

    /// Blinker - period 2 oscillator under B3/S23
    pub fn blinker() -> Pattern {
        Pattern::new("Blinker", vec![(0, 0), (0, 1), (0, 2)])
    }

    /// Glider - diagonal spaceship under B3/S23
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            vec![
                (0, 1),
                (1, 2),
                (2, 0), (2, 1), (2, 2),
            ],
        )
    }

    /// Block - still life under B3/S23
    pub fn block() -> Pattern {
        Pattern::new("Block", vec![(0, 0), (0, 1), (1, 0), (1, 1)])
    }

    /// R-pentomino - long-lived methuselah
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            vec![
                (0, 1), (0, 2),
                (1, 0), (1, 1),
                (2, 1),
            ],
        )
    }

    pub fn all_patterns() -> Vec<Pattern> {
        vec![blinker(), glider(), block(), r_pentomino()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleConfig;

    #[test]
    fn test_pattern_extent() {
        let glider = presets::glider();
        assert_eq!((glider.rows, glider.cols), (3, 3));
        assert_eq!((presets::blinker().rows, presets::blinker().cols), (1, 3));
    }

    #[test]
    fn test_place_on_sets_fresh_cells() {
        let mut grid = Grid::new(5, 5).unwrap();
        presets::block().place_on(&mut grid, 3, 3).unwrap();
        assert_eq!(grid.population(), 4);
        assert_eq!(grid.cell_at(4, 4), Ok(Cell::FRESH));
    }

    #[test]
    fn test_place_on_overflow_leaves_grid_untouched() {
        let mut grid = Grid::new(5, 5).unwrap();
        let err = presets::glider().place_on(&mut grid, 3, 0).unwrap_err();
        assert_eq!(err, EngineError::OutOfBounds { row: 5, col: 2, rows: 5, cols: 5 });
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_block_is_still_life() {
        let mut grid = Grid::new(4, 4).unwrap();
        presets::block().place_on(&mut grid, 1, 1).unwrap();
        assert_eq!(grid.evolve(&RuleConfig::conway()), grid);
    }
}
