use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;

use decay_life::{
    Cli, GameState, SimulatorConfig,
    domain::all_rules,
    input, logging, presets, rendering,
    ui::{self, Dropdown, Layout},
};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.log_level) {
        eprintln!("logger unavailable: {e}");
    }

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let layout = Layout::new(config.rows, config.cols, config.cell_size);
    let (window_width, window_height) = layout.window_size();
    let conf = Conf {
        window_title: "Decay Life".to_owned(),
        window_width,
        window_height,
        window_resizable: false,
        ..Default::default()
    };

    macroquad::Window::from_config(conf, run(config, layout));
}

async fn run(config: SimulatorConfig, layout: Layout) {
    let mut state = match GameState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("cannot start simulator: {e}");
            return;
        }
    };
    info!("{}x{} grid, rule {}", config.rows, config.cols, state.engine.rule());

    let px = layout.panel_x();
    let buttons = ui::create_buttons(&layout);

    let rules = all_rules();
    let rule_items: Vec<String> = rules.iter().map(|(name, _)| name.to_string()).collect();
    let mut rule_dropdown = Dropdown::new(px, 20.0, ui::PANEL_WIDTH, "Rule", rule_items);

    let patterns = presets::all_patterns();
    let pattern_items: Vec<String> = patterns.iter().map(|p| p.name.to_string()).collect();
    let mut pattern_dropdown = Dropdown::new(px, 70.0, ui::PANEL_WIDTH, "Pattern", pattern_items);

    loop {
        let mouse_pos = mouse_position();
        let clicked = is_mouse_button_pressed(MouseButton::Left);
        // Decided before the pickers update, since a pick closes the list
        let captured = clicked && ui::captures_pointer(&[&rule_dropdown, &pattern_dropdown], mouse_pos);

        // Only one list is open at a time; an open list gets the click exclusively
        let rule_was_open = rule_dropdown.is_open();
        if !pattern_dropdown.is_open() {
            if let Some((_, rule)) = rule_dropdown.update(mouse_pos, clicked).and_then(|i| rules.get(i)) {
                // Rejection is logged inside select_rule
                let _ = state.select_rule(rule.clone());
            }
        }
        if !rule_was_open && !rule_dropdown.is_open() {
            if pattern_dropdown.update(mouse_pos, clicked).is_some() {
                state.pending_pattern_index = Some(pattern_dropdown.selected());
                state.is_running = false;
            }
        }

        let hovered = input::screen_to_cell(mouse_pos, &layout, state.engine.dimensions());

        // Pattern placement mode swallows grid clicks
        let mut placing = false;
        if let Some(index) = state.pending_pattern_index {
            placing = true;
            if is_mouse_button_pressed(MouseButton::Right) || is_key_pressed(KeyCode::Escape) {
                state.pending_pattern_index = None;
            } else if let (true, Some(cell), Some(pattern)) = (clicked && !captured, hovered, patterns.get(index)) {
                let _ = state.place_pattern(pattern, cell);
                state.pending_pattern_index = None;
            }
        }

        if !captured {
            state = input::process_button_clicks(state, &buttons, mouse_pos);
            if !placing {
                input::handle_mouse_paint(&mut state, &layout, mouse_pos);
            }
        }
        state = input::process_keyboard_input(state);

        // Keep the picker in step with rules chosen from the keyboard
        if let Some(index) = rules.iter().position(|(_, rule)| rule == state.engine.rule()) {
            rule_dropdown.set_selected(index);
        }

        state = state.tick(get_frame_time());

        let render_start = std::time::Instant::now();
        clear_background(BLACK);
        rendering::draw_grid(state.engine.grid(), state.engine.rule().state_count, &layout);

        if let (Some(index), Some(cell)) = (state.pending_pattern_index, hovered) {
            if let Some(pattern) = patterns.get(index) {
                rendering::draw_pattern_preview(pattern, cell, &layout);
            }
        }

        rendering::draw_controls(&state, &layout, &buttons, &[&rule_dropdown, &pattern_dropdown], mouse_pos);
        state.last_render_time_ms = render_start.elapsed().as_secs_f32() * 1000.0;

        next_frame().await;
    }
}
