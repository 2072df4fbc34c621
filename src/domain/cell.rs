/// Cell is the state held by one grid position.
/// `0` is dead, `1` is alive and fresh, `2..` are decaying states.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Cell(pub u32);

impl Cell {
    pub const DEAD: Cell = Cell(0);
    pub const FRESH: Cell = Cell(1);

    /// Raw state value
    pub const fn state(self) -> u32 {
        self.0
    }

    /// Alive or decaying (state > 0)
    pub const fn is_alive(self) -> bool {
        self.0 > 0
    }

    /// Exactly state 1. Only fresh cells count as live neighbors.
    pub const fn is_fresh(self) -> bool {
        self.0 == 1
    }

    /// Alive but fading (state >= 2)
    pub const fn is_decaying(self) -> bool {
        self.0 >= 2
    }

    /// Manual toggle: any living or decaying cell dies, a dead cell is born fresh
    pub const fn toggle(self) -> Self {
        if self.is_alive() { Cell::DEAD } else { Cell::FRESH }
    }

    /// One decay step further
    pub const fn decayed(self) -> Self {
        Cell(self.0.saturating_add(1))
    }
}

impl From<u32> for Cell {
    fn from(state: u32) -> Self {
        Cell(state)
    }
}
