//! Keyboard and mouse state with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` returns true every frame the key
//!   is physically down. Used for continuous actions like player movement.
//!
//! - **Edge-triggered (just_pressed / just_released):** true only until
//!   `end_frame()`. Hotkeys read them once per rendered frame, outside the
//!   fixed-step loop, so a press fires exactly once no matter how many
//!   simulation steps that frame runs (zero included).

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Num1,
    Escape,
    F3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Held + transition sets for one kind of button.
#[derive(Debug, Clone)]
struct ButtonSet<T> {
    held: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
}

impl<T: Copy + Eq + Hash> ButtonSet<T> {
    fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    fn press(&mut self, button: T) {
        // OS key repeat re-sends presses; only the first one is an edge.
        if self.held.insert(button) {
            self.just_pressed.insert(button);
        }
    }

    fn release(&mut self, button: T) {
        if self.held.remove(&button) {
            self.just_released.insert(button);
        }
    }

    fn clear_transitions(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

#[derive(Debug, Clone)]
pub struct InputState {
    keys: ButtonSet<Key>,
    mouse: ButtonSet<MouseBtn>,
    /// Last known cursor position in logical pixels.
    pub mouse_position: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: ButtonSet::new(),
            mouse: ButtonSet::new(),
            mouse_position: (0.0, 0.0),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.keys.press(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    pub fn mouse_down(&mut self, btn: MouseBtn) {
        self.mouse.press(btn);
    }

    pub fn mouse_up(&mut self, btn: MouseBtn) {
        self.mouse.release(btn);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.keys.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.keys.just_released.contains(&key)
    }

    pub fn is_mouse_held(&self, btn: MouseBtn) -> bool {
        self.mouse.held.contains(&btn)
    }

    pub fn is_mouse_just_pressed(&self, btn: MouseBtn) -> bool {
        self.mouse.just_pressed.contains(&btn)
    }

    pub fn is_mouse_just_released(&self, btn: MouseBtn) -> bool {
        self.mouse.just_released.contains(&btn)
    }

    /// -1.0, 0.0 or 1.0 depending on which of the two keys are held.
    /// Holding both cancels out.
    pub fn axis(&self, negative: Key, positive: Key) -> f32 {
        let mut value = 0.0;
        if self.is_held(negative) {
            value -= 1.0;
        }
        if self.is_held(positive) {
            value += 1.0;
        }
        value
    }

    /// Drop all held state, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        let keys: Vec<Key> = self.keys.held.iter().copied().collect();
        for key in keys {
            self.keys.release(key);
        }
        let buttons: Vec<MouseBtn> = self.mouse.held.iter().copied().collect();
        for btn in buttons {
            self.mouse.release(btn);
        }
    }

    pub fn end_frame(&mut self) {
        self.keys.clear_transitions();
        self.mouse.clear_transitions();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::W);
        assert!(input.is_held(Key::W));
        assert!(input.is_just_pressed(Key::W));
    }

    #[test]
    fn key_up_clears_held_sets_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::W);
        input.key_up(Key::W);
        assert!(!input.is_held(Key::W));
        assert!(input.is_just_released(Key::W));
    }

    #[test]
    fn os_key_repeat_is_not_a_second_press() {
        let mut input = InputState::new();
        input.key_down(Key::Num1);
        input.end_frame();
        input.key_down(Key::Num1);
        assert!(input.is_held(Key::Num1));
        assert!(!input.is_just_pressed(Key::Num1));
    }

    #[test]
    fn key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::A);
        assert!(!input.is_just_released(Key::A));
        assert!(!input.is_held(Key::A));
    }

    #[test]
    fn end_frame_clears_transitions_but_keeps_held() {
        let mut input = InputState::new();
        input.key_down(Key::D);
        input.mouse_down(MouseBtn::Left);
        input.end_frame();
        assert!(!input.is_just_pressed(Key::D));
        assert!(!input.is_mouse_just_pressed(MouseBtn::Left));
        assert!(input.is_held(Key::D));
        assert!(input.is_mouse_held(MouseBtn::Left));

        input.mouse_up(MouseBtn::Left);
        assert!(input.is_mouse_just_released(MouseBtn::Left));
        input.end_frame();
        assert!(!input.is_mouse_just_released(MouseBtn::Left));
    }

    #[test]
    fn axis_combines_opposite_keys() {
        let mut input = InputState::new();
        assert_eq!(input.axis(Key::A, Key::D), 0.0);
        input.key_down(Key::A);
        assert_eq!(input.axis(Key::A, Key::D), -1.0);
        input.key_down(Key::D);
        assert_eq!(input.axis(Key::A, Key::D), 0.0);
        input.key_up(Key::A);
        assert_eq!(input.axis(Key::A, Key::D), 1.0);
    }

    #[test]
    fn release_all_emits_releases() {
        let mut input = InputState::new();
        input.key_down(Key::S);
        input.mouse_down(MouseBtn::Left);
        input.end_frame();
        input.release_all();
        assert!(!input.is_held(Key::S));
        assert!(input.is_just_released(Key::S));
        assert!(!input.is_mouse_held(MouseBtn::Left));
        assert!(input.is_mouse_just_released(MouseBtn::Left));
    }

    #[test]
    fn mouse_position_survives_end_frame() {
        let mut input = InputState::new();
        input.mouse_position = (100.0, 200.0);
        input.end_frame();
        assert!((input.mouse_position.0 - 100.0).abs() < f64::EPSILON);
        assert!((input.mouse_position.1 - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_state_is_empty() {
        let input = InputState::default();
        assert!(!input.is_held(Key::W));
        assert!(!input.is_just_pressed(Key::Escape));
        assert!(!input.is_mouse_held(MouseBtn::Left));
        assert!(!input.is_mouse_just_released(MouseBtn::Middle));
        assert_eq!(input.mouse_position, (0.0, 0.0));
    }
}
