use std::time::{Duration, Instant};

use serde::Deserialize;
use sqd_core::geometry::Rect;
use sqd_core::input::{InputState, MouseBtn};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub size: f32,
    pub idle_color: [u8; 3],
    pub held_color: [u8; 3],
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            idle_color: [255, 255, 255],
            held_color: [100, 100, 100],
        }
    }
}

/// Primary-button hold state plus the position of the drawn cursor icon.
#[derive(Debug, Clone, Default)]
pub struct CursorTracker {
    held: bool,
    pressed_at: Option<Instant>,
    position: (f64, f64),
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, now: Instant) {
        if self.held {
            return;
        }
        self.held = true;
        self.pressed_at = Some(now);
    }

    pub fn release(&mut self) {
        self.held = false;
        self.pressed_at = None;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.position = (x, y);
    }

    /// Follow the left mouse button and cursor position from `input`.
    ///
    /// Edges come first: a release and re-press between two frames still
    /// restarts the hold timer even though the button reads as held both times.
    pub fn sync(&mut self, input: &InputState, now: Instant) {
        self.move_to(input.mouse_position.0, input.mouse_position.1);
        if input.is_mouse_just_released(MouseBtn::Left) {
            self.release();
        }
        if input.is_mouse_just_pressed(MouseBtn::Left) {
            self.press(now);
        }
        match (input.is_mouse_held(MouseBtn::Left), self.held) {
            (true, false) => self.press(now),
            (false, true) => self.release(),
            _ => {}
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Time since the press while held; zero once released.
    pub fn hold_duration(&self, now: Instant) -> Duration {
        self.pressed_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or(Duration::ZERO)
    }

    /// Icon square with its top-left corner on the pointer.
    pub fn icon_rect(&self, size: f32) -> Rect {
        Rect::new(self.position.0 as f32, self.position.1 as f32, size, size)
    }

    pub fn icon_color(&self, config: &CursorConfig) -> [u8; 3] {
        if self.held {
            config.held_color
        } else {
            config.idle_color
        }
    }
}
