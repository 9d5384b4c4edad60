/// Axis-aligned rectangle in logical pixels, origin top-left, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered_in(width: f32, height: f32, bounds_w: f32, bounds_h: f32) -> Self {
        Self::new(
            (bounds_w - width) * 0.5,
            (bounds_h - height) * 0.5,
            width,
            height,
        )
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Clamp the position so the whole rect lies inside `(0, 0)..(bounds_w, bounds_h)`.
    /// A rect larger than the bounds is pinned to the origin on that axis.
    pub fn clamp_within(&mut self, bounds_w: f32, bounds_h: f32) {
        self.x = clamp_axis(self.x, self.width, bounds_w);
        self.y = clamp_axis(self.y, self.height, bounds_h);
    }

    pub fn is_within(&self, bounds_w: f32, bounds_h: f32) -> bool {
        let fits_x = self.width > bounds_w || (self.x >= 0.0 && self.right() <= bounds_w);
        let fits_y = self.height > bounds_h || (self.y >= 0.0 && self.bottom() <= bounds_h);
        fits_x && fits_y
    }
}

fn clamp_axis(pos: f32, size: f32, bound: f32) -> f32 {
    let max = (bound - size).max(0.0);
    if pos.is_nan() {
        return 0.0;
    }
    pos.clamp(0.0, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_matches_window_center() {
        let rect = Rect::centered_in(100.0, 100.0, 1280.0, 720.0);
        assert_eq!(rect.x, 590.0);
        assert_eq!(rect.y, 310.0);
    }

    #[test]
    fn clamp_keeps_rect_fully_visible() {
        let mut rect = Rect::new(1250.0, -40.0, 100.0, 100.0);
        rect.clamp_within(1280.0, 720.0);
        assert_eq!(rect.x, 1180.0);
        assert_eq!(rect.y, 0.0);
        assert!(rect.is_within(1280.0, 720.0));
    }

    #[test]
    fn clamp_leaves_inside_rect_alone() {
        let mut rect = Rect::new(10.0, 20.0, 100.0, 100.0);
        rect.clamp_within(1280.0, 720.0);
        assert_eq!(rect, Rect::new(10.0, 20.0, 100.0, 100.0));
    }

    #[test]
    fn oversized_rect_pins_to_origin() {
        let mut rect = Rect::new(30.0, 30.0, 200.0, 50.0);
        rect.clamp_within(150.0, 100.0);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 30.0);
    }

    #[test]
    fn nan_position_resets() {
        let mut rect = Rect::new(f32::NAN, 5.0, 10.0, 10.0);
        rect.clamp_within(100.0, 100.0);
        assert_eq!(rect.x, 0.0);
    }

    #[test]
    fn contains_point_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains_point(0.0, 0.0));
        assert!(rect.contains_point(9.9, 9.9));
        assert!(!rect.contains_point(10.0, 5.0));
    }
}
