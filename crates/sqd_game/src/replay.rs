use crate::player::PlayerInput;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Recorded movement input, replayed step by step in tests.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_delta")]
    pub delta: f32,
    #[serde(default = "default_bounds")]
    pub bounds: [f32; 2],
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub move_x: f32,
    #[serde(default)]
    pub move_y: f32,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<PlayerInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(PlayerInput {
                    move_x: frame.move_x.clamp(-1.0, 1.0),
                    move_y: frame.move_y.clamp(-1.0, 1.0),
                });
            }
        }
        out
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.bounds[0], self.bounds[1])
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.delta <= 0.0 {
        return Err("Replay validation failed: delta must be > 0".to_string());
    }
    if replay.bounds[0] <= 0.0 || replay.bounds[1] <= 0.0 {
        return Err("Replay validation failed: bounds must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_delta() -> f32 {
    1.0
}

const fn default_bounds() -> [f32; 2] {
    [1280.0, 720.0]
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Player, PlayerConfig};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "sqd_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn write_replay(name_hint: &str, json: &str) -> ReplaySequence {
        let path = temp_file_path(name_hint);
        fs::write(&path, json).expect("write replay file");
        let replay = load_replay_from_path(&path).expect("replay should load");
        let _ = fs::remove_file(path);
        replay
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let replay = write_replay(
            "parse",
            r#"{
              "frames": [
                { "move_x": 1.0, "repeat": 3 },
                { "move_y": -4.0 }
              ]
            }"#,
        );
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 4);
        assert_eq!(expanded[3].move_y, -1.0);
        assert_eq!(replay.bounds(), (1280.0, 720.0));
    }

    #[test]
    fn replay_run_is_deterministic_and_on_screen() {
        let replay = write_replay(
            "deterministic",
            r#"{
              "delta": 0.5,
              "bounds": [800, 600],
              "frames": [
                { "move_x": 1.0, "repeat": 90 },
                { "move_x": 1.0, "move_y": 1.0, "repeat": 45 },
                { "move_x": -1.0, "move_y": -1.0, "repeat": 200 },
                { "move_y": 1.0, "repeat": 17 }
              ]
            }"#,
        );
        let inputs = replay.expanded_inputs();
        let bounds = replay.bounds();

        let mut run_a = Player::new(PlayerConfig::default(), bounds);
        let mut run_b = Player::new(PlayerConfig::default(), bounds);
        for input in &inputs {
            run_a.step(*input, replay.delta, bounds);
            assert!(run_a.rect.is_within(bounds.0, bounds.1));
        }
        for input in &inputs {
            run_b.step(*input, replay.delta, bounds);
        }

        assert_eq!(run_a.position(), run_b.position());
        // Driven into the top-left corner, then 17 half-steps down.
        assert_eq!(run_a.position(), (0.0, 255.0));
    }

    #[test]
    fn empty_replay_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay must fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }
}
