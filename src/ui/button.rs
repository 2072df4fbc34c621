use macroquad::prelude::*;

/// What a panel button does when clicked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    PlayPause,
    Step,
    Clear,
    Random,
}

impl Control {
    pub fn label(self, running: bool) -> &'static str {
        match self {
            Control::PlayPause if running => "Pause",
            Control::PlayPause => "Play",
            Control::Step => "Step",
            Control::Clear => "Clear",
            Control::Random => "Random",
        }
    }
}

/// Button UI component with hover and click detection
#[derive(Clone, Debug)]
pub struct Button {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    pub control: Control,
}

impl Button {
    pub fn new(x: f32, y: f32, width: f32, height: f32, control: Control) -> Self {
        Self { x, y, width, height, control }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if the pointer is over the button
    pub fn contains(&self, pos: (f32, f32)) -> bool {
        pos.0 >= self.x && pos.0 <= self.x + self.width && pos.1 >= self.y && pos.1 <= self.bottom()
    }

    pub fn draw(&self, mouse_pos: (f32, f32), running: bool) {
        let color = if self.contains(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };

        draw_rectangle(self.x, self.y, self.width, self.height, color);
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, WHITE);

        let label = self.control.label(running);
        let size = measure_text(label, None, 20, 1.0);
        draw_text(
            label,
            self.x + (self.width - size.width) / 2.0,
            self.y + (self.height + size.height) / 2.0,
            20.0,
            WHITE,
        );
    }

    /// Clicked this frame
    pub fn is_clicked(&self, mouse_pos: (f32, f32)) -> bool {
        self.contains(mouse_pos) && is_mouse_button_pressed(MouseButton::Left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let button = Button::new(10.0, 20.0, 100.0, 40.0, Control::Step);
        assert!(button.contains((10.0, 20.0)));
        assert!(button.contains((110.0, 60.0)));
        assert!(!button.contains((9.9, 30.0)));
        assert!(!button.contains((50.0, 60.1)));
    }

    #[test]
    fn test_play_pause_label_follows_state() {
        assert_eq!(Control::PlayPause.label(false), "Play");
        assert_eq!(Control::PlayPause.label(true), "Pause");
        assert_eq!(Control::Clear.label(true), "Clear");
    }
}
