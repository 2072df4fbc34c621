use macroquad::prelude::*;

use crate::application::GameState;
use crate::domain::{Cell, Grid, Pattern};
use crate::ui::{Button, Dropdown, Layout, PANEL_MARGIN, PANEL_WIDTH};

const BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 1.0);
/// Dimmest shade a decaying cell fades to before it is cleared
const MIN_FADE: f32 = 0.2;

/// Foreground brightness for a cell: fresh cells are full white, decaying
/// cells dim linearly towards `MIN_FADE` as they approach `state_count + 1`.
pub fn cell_intensity(cell: Cell, state_count: u32) -> f32 {
    if !cell.is_alive() {
        return 0.0;
    }
    if state_count <= 2 || cell.is_fresh() {
        return 1.0;
    }
    let steps = state_count as f32;
    let faded = (cell.state() - 1) as f32 / steps;
    (1.0 - faded).clamp(MIN_FADE, 1.0)
}

pub fn cell_color(cell: Cell, state_count: u32) -> Color {
    let v = cell_intensity(cell, state_count);
    Color::new(v, v, v, 1.0)
}

/// Paint every living or decaying cell; dead cells are left as background
pub fn draw_grid(grid: &Grid, state_count: u32, layout: &Layout) {
    draw_rectangle(0.0, 0.0, layout.grid_width, layout.grid_height, BACKGROUND);

    let size = layout.cell_size;
    for (row, col, cell) in grid.iter_cells().filter(|(_, _, cell)| cell.is_alive()) {
        draw_rectangle(col as f32 * size, row as f32 * size, size, size, cell_color(cell, state_count));
    }
}

/// Ghost of a pattern centered on the hovered cell
pub fn draw_pattern_preview(pattern: &Pattern, cell: (usize, usize), layout: &Layout) {
    let size = layout.cell_size;
    let top = cell.0 as f32 - (pattern.rows / 2) as f32;
    let left = cell.1 as f32 - (pattern.cols / 2) as f32;

    for &(dr, dc) in &pattern.cells {
        let (x, y) = ((left + dc as f32) * size, (top + dr as f32) * size);
        draw_rectangle(x, y, size, size, Color::from_rgba(0, 255, 150, 120));
    }
    draw_rectangle_lines(
        left * size,
        top * size,
        pattern.cols as f32 * size,
        pattern.rows as f32 * size,
        2.0,
        Color::from_rgba(255, 255, 0, 180),
    );
}

/// Draw the side panel: buttons, status readout, key help, then dropdowns on top
pub fn draw_controls(
    state: &GameState,
    layout: &Layout,
    buttons: &[Button],
    dropdowns: &[&Dropdown],
    mouse_pos: (f32, f32),
) {
    let px = layout.panel_x();
    draw_rectangle(
        px - PANEL_MARGIN,
        0.0,
        PANEL_WIDTH + PANEL_MARGIN * 2.0,
        screen_height(),
        Color::from_rgba(30, 30, 30, 255),
    );

    buttons.iter().for_each(|btn| btn.draw(mouse_pos, state.is_running));

    let engine = &state.engine;
    let (rows, cols) = engine.dimensions();
    let status_color = if state.is_running {
        Color::from_rgba(0, 255, 0, 255)
    } else {
        Color::from_rgba(255, 165, 0, 255)
    };

    let readout = [
        (engine.rule().to_string(), 16.0, WHITE),
        (format!("Grid: {rows}x{cols}"), 13.0, GRAY),
        (format!("Generation: {}", engine.generation()), 16.0, WHITE),
        (format!("Alive: {} ({} fresh)", engine.population(), engine.fresh_population()), 13.0, GRAY),
        (format!("Interval: {} ms", state.update_interval_ms), 13.0, GRAY),
        (format!("Evolve: {:.1}ms ({})", state.last_evolution_time_ms, engine.algorithm().name()), 13.0, GRAY),
        (format!("Render: {:.1}ms", state.last_render_time_ms), 13.0, GRAY),
        ((if state.is_running { "Running" } else { "Paused" }).to_string(), 16.0, status_color),
    ];
    for (i, (text, size, color)) in readout.iter().enumerate() {
        draw_text(text, px, 350.0 + i as f32 * 20.0, *size, *color);
    }

    let help = [
        "LMB: toggle / drag",
        "Space: play  S: step",
        "C: clear  R: random",
        "Up/Down: speed",
        "1-5: rule preset",
        "Esc/RMB: cancel pattern",
    ];
    for (i, line) in help.iter().enumerate() {
        draw_text(line, px, 520.0 + i as f32 * 16.0, 12.0, GRAY);
    }

    // Open dropdown last so it overlays the rest
    let (open, closed): (Vec<&Dropdown>, Vec<&Dropdown>) = dropdowns.iter().copied().partition(|d| d.is_open());
    closed.iter().chain(open.iter()).for_each(|d| d.draw(mouse_pos));
}
