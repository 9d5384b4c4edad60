//! Plain-text composition of the HUD, kept separate from egui so it can be
//! tested without a window.

use std::time::Duration;

/// Everything the HUD shows for one frame.
#[derive(Debug, Clone, Default)]
pub struct HudSnapshot {
    pub fps: f64,
    /// Last frame's wall-clock delta, in reference frames.
    pub frame_delta: f32,
    /// Current cap label. `None` hides the cap lines entirely.
    pub fps_cap: Option<String>,
    pub player_pos: (f32, f32),
    pub running_for: Duration,
    pub mouse_pos: (f64, f64),
    pub mouse_held: bool,
    pub hold_time: Duration,
}

pub const FPS_CAP_HELP: &str = "1 - Change FPS Limit";

/// Top-left block.
pub fn compose_status_lines(snapshot: &HudSnapshot) -> Vec<String> {
    let mut lines = vec![
        format!("FPS: {:.2}", snapshot.fps),
        format!("Delta: {:.2}", snapshot.frame_delta),
    ];
    if let Some(cap) = &snapshot.fps_cap {
        lines.push(format!("FPS Limit: {cap}"));
    }
    lines.push(format!(
        "Player Pos: {:.2}, {:.2}",
        snapshot.player_pos.0, snapshot.player_pos.1
    ));
    lines.push(String::new());
    lines.push(format!(
        "Running for: {:.2}",
        snapshot.running_for.as_secs_f64()
    ));
    if snapshot.fps_cap.is_some() {
        lines.push(String::new());
        lines.push(FPS_CAP_HELP.to_string());
    }
    lines
}

/// Bottom-left block.
pub fn compose_mouse_lines(snapshot: &HudSnapshot) -> Vec<String> {
    vec![
        "Mouse Info:".to_string(),
        format!(
            "Pos: ({}, {})",
            snapshot.mouse_pos.0.round() as i64,
            snapshot.mouse_pos.1.round() as i64
        ),
        format!("HOLD: {}", snapshot.mouse_held),
        format!("HOLD_TIME: {:.2}", snapshot.hold_time.as_secs_f64()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> HudSnapshot {
        HudSnapshot {
            fps: 59.876,
            frame_delta: 1.0,
            fps_cap: Some("30".to_string()),
            player_pos: (590.0, 310.456),
            running_for: Duration::from_millis(12_346),
            mouse_pos: (100.4, 200.6),
            mouse_held: true,
            hold_time: Duration::from_millis(1_500),
        }
    }

    #[test]
    fn status_block_with_fps_cap() {
        let lines = compose_status_lines(&snapshot());
        assert_eq!(
            lines,
            vec![
                "FPS: 59.88",
                "Delta: 1.00",
                "FPS Limit: 30",
                "Player Pos: 590.00, 310.46",
                "",
                "Running for: 12.35",
                "",
                "1 - Change FPS Limit",
            ]
        );
    }

    #[test]
    fn status_block_without_fps_cap_omits_cap_lines() {
        let mut snap = snapshot();
        snap.fps_cap = None;
        let lines = compose_status_lines(&snap);
        assert!(!lines.iter().any(|l| l.starts_with("FPS Limit")));
        assert!(!lines.iter().any(|l| l == FPS_CAP_HELP));
        assert_eq!(lines.last().map(String::as_str), Some("Running for: 12.35"));
    }

    #[test]
    fn mouse_block_rounds_position() {
        let lines = compose_mouse_lines(&snapshot());
        assert_eq!(
            lines,
            vec!["Mouse Info:", "Pos: (100, 201)", "HOLD: true", "HOLD_TIME: 1.50"]
        );
    }

    #[test]
    fn idle_mouse_shows_zero_hold_time() {
        let mut snap = snapshot();
        snap.mouse_held = false;
        snap.hold_time = Duration::ZERO;
        let lines = compose_mouse_lines(&snap);
        assert_eq!(lines[2], "HOLD: false");
        assert_eq!(lines[3], "HOLD_TIME: 0.00");
    }
}
