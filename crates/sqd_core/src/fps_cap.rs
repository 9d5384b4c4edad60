/// Cycle of frame-rate caps, stepped through with a hotkey.
/// Caps only pace presentation; they never change simulation speed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpsCap {
    choices: Vec<u32>,
    index: usize,
}

impl FpsCap {
    pub const DEFAULT_CHOICES: &'static [u32] = &[60, 30, 20, 10];

    /// Returns `None` when `choices` is empty.
    pub fn new(choices: Vec<u32>) -> Option<Self> {
        if choices.is_empty() {
            return None;
        }
        Some(Self { choices, index: 0 })
    }

    pub fn current(&self) -> u32 {
        self.choices[self.index]
    }

    pub fn choices(&self) -> &[u32] {
        &self.choices
    }

    /// Advance to the next cap (wraps around) and return it.
    pub fn next(&mut self) -> u32 {
        self.index = (self.index + 1) % self.choices.len();
        self.current()
    }

    pub fn label(&self) -> String {
        match self.current() {
            0 => "Unlimited".to_string(),
            fps => fps.to_string(),
        }
    }
}

impl Default for FpsCap {
    fn default() -> Self {
        Self {
            choices: Self::DEFAULT_CHOICES.to_vec(),
            index: 0,
        }
    }
}

impl std::fmt::Display for FpsCap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_starts_at_sixty() {
        assert_eq!(FpsCap::default().current(), 60);
    }

    #[test]
    fn next_cycles_and_wraps() {
        let mut cap = FpsCap::default();
        assert_eq!(cap.next(), 30);
        assert_eq!(cap.next(), 20);
        assert_eq!(cap.next(), 10);
        assert_eq!(cap.next(), 60);
    }

    #[test]
    fn empty_choices_rejected() {
        assert!(FpsCap::new(Vec::new()).is_none());
    }

    #[test]
    fn single_choice_stays_put() {
        let mut cap = FpsCap::new(vec![144]).expect("non-empty");
        assert_eq!(cap.next(), 144);
        assert_eq!(cap.label(), "144");
    }

    #[test]
    fn display_matches_label() {
        let cap = FpsCap::new(vec![0, 60]).expect("non-empty");
        assert_eq!(format!("{}", cap), "Unlimited");
        assert_eq!(format!("{}", cap), cap.label());
    }
}
