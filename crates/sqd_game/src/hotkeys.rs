use sqd_core::fps_cap::FpsCap;
use sqd_core::input::{InputState, Key};

/// What the hotkeys asked for this frame. Escape is not here: it quits
/// straight from the key event, even while the window is minimized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HotkeyActions {
    pub toggle_hud: bool,
    /// New FPS cap when `1` stepped the cycle.
    pub fps_cap: Option<u32>,
}

/// Read hotkey presses once per rendered frame. `1` only steps `fps_cap`
/// when `fps_cap_hotkey` is enabled.
pub fn read_hotkeys(
    input: &InputState,
    fps_cap: &mut FpsCap,
    fps_cap_hotkey: bool,
) -> HotkeyActions {
    HotkeyActions {
        toggle_hud: input.is_just_pressed(Key::F3),
        fps_cap: (fps_cap_hotkey && input.is_just_pressed(Key::Num1)).then(|| fps_cap.next()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqd_core::time::TimeState;
    use std::time::{Duration, Instant};

    #[test]
    fn held_cap_key_steps_once_across_frames() {
        let start = Instant::now();
        let mut time = TimeState::starting_at(start);
        let mut input = InputState::new();
        let mut cap = FpsCap::default();

        input.key_down(Key::Num1);
        // 5ms runs no fixed steps, 55ms runs three; neither may repeat the press.
        let mut changes = Vec::new();
        for frame_ms in [5, 60, 115, 120] {
            time.begin_frame_at(start + Duration::from_millis(frame_ms));
            let actions = read_hotkeys(&input, &mut cap, true);
            while time.should_step() {}
            time.end_frame();
            input.end_frame();
            changes.extend(actions.fps_cap);
        }

        assert_eq!(changes, vec![30]);
        assert_eq!(cap.current(), 30);
    }

    #[test]
    fn cap_key_ignored_when_disabled() {
        let mut input = InputState::new();
        let mut cap = FpsCap::default();
        input.key_down(Key::Num1);
        let actions = read_hotkeys(&input, &mut cap, false);
        assert_eq!(actions.fps_cap, None);
        assert_eq!(cap.current(), 60);
    }

    #[test]
    fn cap_cycle_wraps_on_repeated_presses() {
        let mut input = InputState::new();
        let mut cap = FpsCap::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            input.key_down(Key::Num1);
            seen.extend(read_hotkeys(&input, &mut cap, true).fps_cap);
            input.end_frame();
            input.key_up(Key::Num1);
            input.end_frame();
        }
        assert_eq!(seen, vec![30, 20, 10, 60]);
    }

    #[test]
    fn f3_toggles_hud() {
        let mut input = InputState::new();
        let mut cap = FpsCap::default();
        input.key_down(Key::F3);
        assert!(read_hotkeys(&input, &mut cap, true).toggle_hud);
        input.end_frame();
        assert!(!read_hotkeys(&input, &mut cap, true).toggle_hud);
    }
}
