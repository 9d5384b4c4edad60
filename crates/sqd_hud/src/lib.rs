pub mod hud_overlay;
pub mod hud_text;

pub use hud_overlay::{HudOverlay, HudStyle};
pub use hud_text::{compose_mouse_lines, compose_status_lines, HudSnapshot};
