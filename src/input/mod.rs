use macroquad::prelude::*;

use crate::application::GameState;
use crate::domain::all_rules;
use crate::ui::{Button, Control, Layout};

/// Map a pointer position to `(row, col)` using the fixed cell size.
/// `None` when the pointer is off the grid.
pub fn screen_to_cell(pos: (f32, f32), layout: &Layout, dims: (usize, usize)) -> Option<(usize, usize)> {
    if !layout.in_grid(pos) {
        return None;
    }
    let row = (pos.1 / layout.cell_size) as usize;
    let col = (pos.0 / layout.cell_size) as usize;
    (row < dims.0 && col < dims.1).then_some((row, col))
}

/// Press toggles the cell under the pointer, dragging toggles each new cell once
pub fn handle_mouse_paint(state: &mut GameState, layout: &Layout, mouse_pos: (f32, f32)) {
    if is_mouse_button_released(MouseButton::Left) {
        state.paint_release();
        return;
    }

    let Some(cell) = screen_to_cell(mouse_pos, layout, state.engine.dimensions()) else {
        return;
    };

    if is_mouse_button_pressed(MouseButton::Left) {
        state.paint_press(cell);
    } else if is_mouse_button_down(MouseButton::Left) {
        state.paint_drag(cell);
    }
}

/// Process keyboard input functionally
pub fn process_keyboard_input(mut state: GameState) -> GameState {
    type KeyAction = (KeyCode, fn(GameState) -> GameState);

    let actions: [KeyAction; 7] = [
        (KeyCode::Space, GameState::toggle_running),
        (KeyCode::S, GameState::step),
        (KeyCode::Right, GameState::step),
        (KeyCode::C, GameState::clear),
        (KeyCode::R, GameState::randomize),
        (KeyCode::Up, |s| s.adjust_interval(-10)),
        (KeyCode::Down, |s| s.adjust_interval(10)),
    ];

    let preset_keys = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4, KeyCode::Key5];
    for (key, (_, rule)) in preset_keys.into_iter().zip(all_rules()) {
        if is_key_pressed(key) {
            // Rejection is logged inside select_rule
            let _ = state.select_rule(rule);
        }
    }

    actions.iter().fold(state, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    })
}

/// Apply the control of whichever button was clicked this frame
pub fn process_button_clicks(state: GameState, buttons: &[Button], mouse_pos: (f32, f32)) -> GameState {
    buttons
        .iter()
        .filter(|btn| btn.is_clicked(mouse_pos))
        .fold(state, |s, btn| match btn.control {
            Control::PlayPause => s.toggle_running(),
            Control::Step => s.step(),
            Control::Clear => s.clear(),
            Control::Random => s.randomize(),
        })
}
