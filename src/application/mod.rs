mod engine;
mod game_state;

pub use engine::AutomatonEngine;
pub use game_state::{GameState, PaintStroke};
