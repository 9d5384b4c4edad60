use serde::Deserialize;
use sqd_core::geometry::Rect;
use sqd_core::input::{InputState, Key};

/// Movement intent for one step. Each axis is -1.0, 0.0 or 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub move_x: f32,
    pub move_y: f32,
}

impl PlayerInput {
    /// WASD, y down. Opposite keys cancel; diagonals are not normalized.
    pub fn from_input(input: &InputState) -> Self {
        Self {
            move_x: input.axis(Key::A, Key::D),
            move_y: input.axis(Key::W, Key::S),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Edge length of the square, logical pixels.
    pub size: f32,
    /// Logical pixels per reference frame.
    pub speed: f32,
    pub color: [u8; 3],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: 100.0,
            speed: 30.0,
            color: [255, 0, 0],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub rect: Rect,
    pub config: PlayerConfig,
}

impl Player {
    pub fn new(config: PlayerConfig, bounds: (f32, f32)) -> Self {
        let mut rect = Rect::centered_in(config.size, config.size, bounds.0, bounds.1);
        rect.clamp_within(bounds.0, bounds.1);
        Self { rect, config }
    }

    /// Integrate one step, then clamp so the square stays fully on screen.
    pub fn step(&mut self, input: PlayerInput, delta: f32, bounds: (f32, f32)) {
        let distance = self.config.speed * delta;
        self.rect.x += input.move_x * distance;
        self.rect.y += input.move_y * distance;
        self.rect.clamp_within(bounds.0, bounds.1);
    }

    pub fn reclamp(&mut self, bounds: (f32, f32)) {
        self.rect.clamp_within(bounds.0, bounds.1);
    }

    pub fn position(&self) -> (f32, f32) {
        (self.rect.x, self.rect.y)
    }
}
