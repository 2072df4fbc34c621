use log::{info, warn};

use super::AutomatonEngine;
use crate::config::SimulatorConfig;
use crate::domain::{Pattern, RuleConfig};
use crate::error::EngineError;

/// Tracks a press-and-drag gesture so each entered cell is toggled once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintStroke {
    last: Option<(usize, usize)>,
}

impl PaintStroke {
    /// Start a stroke; the pressed cell is always toggled
    pub fn press(&mut self, cell: (usize, usize)) -> (usize, usize) {
        self.last = Some(cell);
        cell
    }

    /// Continue a stroke; returns the cell to toggle if the pointer entered a new one
    pub fn drag(&mut self, cell: (usize, usize)) -> Option<(usize, usize)> {
        match self.last {
            Some(prev) if prev != cell => {
                self.last = Some(cell);
                Some(cell)
            }
            _ => None,
        }
    }

    pub fn release(&mut self) {
        self.last = None;
    }
}

/// GameState drives the engine on behalf of the window loop.
/// It owns the pause flag and the timing policy; the engine owns the cells.
pub struct GameState {
    pub engine: AutomatonEngine,
    pub is_running: bool,
    pub update_timer: f32,
    pub update_interval_ms: u64,
    pub random_density: f64,
    pub stroke: PaintStroke,
    pub last_evolution_time_ms: f32,
    pub last_render_time_ms: f32,
    /// Index of pattern pending placement (None = normal mode)
    pub pending_pattern_index: Option<usize>,
}

impl GameState {
    pub fn new(config: &SimulatorConfig) -> Result<Self, EngineError> {
        let mut engine = AutomatonEngine::new(config.rows, config.cols, Some(config.rule.clone()))?;
        engine.set_algorithm(config.algorithm);
        Ok(Self {
            engine,
            is_running: !config.start_paused,
            update_timer: 0.0,
            update_interval_ms: config
                .update_interval_ms
                .clamp(SimulatorConfig::MIN_INTERVAL_MS, SimulatorConfig::MAX_INTERVAL_MS),
            random_density: config.random_density,
            stroke: PaintStroke::default(),
            last_evolution_time_ms: 0.0,
            last_render_time_ms: 0.0,
            pending_pattern_index: None,
        })
    }

    /// Swap in a new rule; a rejected rule is logged and the old one kept
    pub fn select_rule(&mut self, rule: RuleConfig) -> Result<(), EngineError> {
        self.engine
            .configure(rule)
            .inspect(|_| info!("rule set to {}", self.engine.rule()))
            .inspect_err(|e| warn!("rule rejected: {e}"))
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        self.update_timer = 0.0;
        self
    }

    /// Clear grid and reset generation counter
    pub fn clear(mut self) -> Self {
        self.engine.clear();
        self.is_running = false;
        self
    }

    /// Randomize grid and reset generation counter
    pub fn randomize(mut self) -> Self {
        self.engine.randomize(&mut rand::rng(), self.random_density);
        self.is_running = false;
        self
    }

    /// Shorten (negative) or lengthen the delay between generations
    pub fn adjust_interval(mut self, delta_ms: i64) -> Self {
        self.update_interval_ms = self
            .update_interval_ms
            .saturating_add_signed(delta_ms)
            .clamp(SimulatorConfig::MIN_INTERVAL_MS, SimulatorConfig::MAX_INTERVAL_MS);
        self
    }

    /// Advance exactly one generation, paused or not
    pub fn step(mut self) -> Self {
        self.advance();
        self
    }

    /// Update simulation by one frame; advances when running and the interval has elapsed
    pub fn tick(mut self, delta_time: f32) -> Self {
        if !self.is_running {
            return self;
        }

        self.update_timer += delta_time;
        if self.update_timer * 1000.0 >= self.update_interval_ms as f32 {
            self.advance();
            self.update_timer = 0.0;
        }

        self
    }

    fn advance(&mut self) {
        let start = std::time::Instant::now();
        self.engine.advance_generation();
        self.last_evolution_time_ms = start.elapsed().as_secs_f32() * 1000.0;
    }

    /// Pointer pressed over `cell`
    pub fn paint_press(&mut self, cell: (usize, usize)) {
        let (row, col) = self.stroke.press(cell);
        self.toggle(row, col);
    }

    /// Pointer moved over `cell` while held
    pub fn paint_drag(&mut self, cell: (usize, usize)) {
        if let Some((row, col)) = self.stroke.drag(cell) {
            self.toggle(row, col);
        }
    }

    pub fn paint_release(&mut self) {
        self.stroke.release();
    }

    fn toggle(&mut self, row: usize, col: usize) {
        if let Err(e) = self.engine.toggle_cell(row, col) {
            warn!("ignored toggle: {e}");
        }
    }

    /// Stamp a pattern centered on `cell`, clamped to the top-left edge
    pub fn place_pattern(&mut self, pattern: &Pattern, cell: (usize, usize)) -> Result<(), EngineError> {
        let row = cell.0.saturating_sub(pattern.rows / 2);
        let col = cell.1.saturating_sub(pattern.cols / 2);
        self.engine
            .place_pattern(pattern, row, col)
            .inspect_err(|e| warn!("pattern {} not placed: {e}", pattern.name))
    }
}
