use macroquad::prelude::*;

const ROW_HEIGHT: f32 = 28.0;
const FONT_SIZE: f32 = 16.0;

/// Dropdown selector for rule presets and seed patterns
#[derive(Clone, Debug)]
pub struct Dropdown {
    x: f32,
    y: f32,
    width: f32,
    label: String,
    items: Vec<String>,
    selected: usize,
    is_open: bool,
}

impl Dropdown {
    pub fn new(x: f32, y: f32, width: f32, label: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            x,
            y,
            width,
            label: label.into(),
            items,
            selected: 0,
            is_open: false,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    fn header_contains(&self, pos: (f32, f32)) -> bool {
        pos.0 >= self.x && pos.0 <= self.x + self.width && pos.1 >= self.y && pos.1 <= self.y + ROW_HEIGHT
    }

    /// Index of the open list entry under the pointer
    fn item_at(&self, pos: (f32, f32)) -> Option<usize> {
        if !self.is_open || pos.0 < self.x || pos.0 > self.x + self.width {
            return None;
        }
        let offset = pos.1 - (self.y + ROW_HEIGHT);
        if offset < 0.0 {
            return None;
        }
        let index = (offset / ROW_HEIGHT) as usize;
        (index < self.items.len()).then_some(index)
    }

    /// Feed one frame of pointer state. Returns the newly picked index, if any;
    /// re-picking the current entry still counts so it can be re-applied.
    pub fn update(&mut self, mouse_pos: (f32, f32), clicked: bool) -> Option<usize> {
        if !clicked {
            return None;
        }
        if self.header_contains(mouse_pos) {
            self.is_open = !self.is_open;
            return None;
        }
        let picked = self.item_at(mouse_pos);
        if let Some(index) = picked {
            self.selected = index;
        }
        self.is_open = false;
        picked
    }

    /// Claims the pointer while open so clicks do not fall through to the grid
    pub fn captures(&self, mouse_pos: (f32, f32)) -> bool {
        self.header_contains(mouse_pos) || self.item_at(mouse_pos).is_some()
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        draw_text(&self.label, self.x, self.y - 5.0, 14.0, GRAY);

        let header_color = if self.header_contains(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };
        draw_rectangle(self.x, self.y, self.width, ROW_HEIGHT, header_color);
        draw_rectangle_lines(self.x, self.y, self.width, ROW_HEIGHT, 2.0, WHITE);
        if let Some(text) = self.items.get(self.selected) {
            draw_text(text, self.x + 5.0, self.y + 19.0, FONT_SIZE, WHITE);
        }
        draw_text("v", self.x + self.width - 16.0, self.y + 19.0, FONT_SIZE, WHITE);

        if !self.is_open {
            return;
        }

        let hovered = self.item_at(mouse_pos);
        for (i, item) in self.items.iter().enumerate() {
            let item_y = self.y + ROW_HEIGHT * (i as f32 + 1.0);
            let color = if hovered == Some(i) {
                Color::from_rgba(100, 149, 237, 255)
            } else if i == self.selected {
                Color::from_rgba(50, 100, 150, 255)
            } else {
                Color::from_rgba(45, 45, 45, 255)
            };
            draw_rectangle(self.x, item_y, self.width, ROW_HEIGHT, color);
            draw_rectangle_lines(self.x, item_y, self.width, ROW_HEIGHT, 1.0, Color::from_rgba(80, 80, 80, 255));
            draw_text(item, self.x + 5.0, item_y + 19.0, FONT_SIZE, WHITE);
        }
    }
}
