mod button;
mod dropdown;

pub use button::{Button, Control};
pub use dropdown::Dropdown;

pub const PANEL_WIDTH: f32 = 180.0;
pub const PANEL_MARGIN: f32 = 10.0;
pub const BUTTON_HEIGHT: f32 = 40.0;
/// Room for pickers, buttons and the status readout
pub const MIN_WINDOW_HEIGHT: f32 = 640.0;

/// Screen geometry derived from grid size and the fixed cell pixel size.
/// The grid is drawn from the top-left corner; the panel sits to its right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub cell_size: f32,
    pub grid_width: f32,
    pub grid_height: f32,
}

impl Layout {
    pub fn new(rows: usize, cols: usize, cell_size: f32) -> Self {
        Self {
            cell_size,
            grid_width: cols as f32 * cell_size,
            grid_height: rows as f32 * cell_size,
        }
    }

    /// X position where the panel starts
    pub fn panel_x(&self) -> f32 {
        self.grid_width + PANEL_MARGIN
    }

    /// Window size in whole pixels
    pub fn window_size(&self) -> (i32, i32) {
        let width = self.grid_width + PANEL_MARGIN * 2.0 + PANEL_WIDTH;
        let height = self.grid_height.max(MIN_WINDOW_HEIGHT);
        (width.ceil() as i32, height.ceil() as i32)
    }

    pub fn in_grid(&self, pos: (f32, f32)) -> bool {
        pos.0 >= 0.0 && pos.1 >= 0.0 && pos.0 < self.grid_width && pos.1 < self.grid_height
    }
}

/// Panel buttons in their fixed vertical order
pub fn create_buttons(layout: &Layout) -> Vec<Button> {
    let px = layout.panel_x();
    [Control::PlayPause, Control::Step, Control::Clear, Control::Random]
        .into_iter()
        .enumerate()
        .map(|(i, control)| Button::new(px, 130.0 + i as f32 * 50.0, PANEL_WIDTH, BUTTON_HEIGHT, control))
        .collect()
}

/// True when any picker claims the pointer, open list included.
/// Checked before pickers update so a pick does not fall through to a button.
pub fn captures_pointer(dropdowns: &[&Dropdown], pos: (f32, f32)) -> bool {
    dropdowns.iter().any(|d| d.captures(pos))
}
