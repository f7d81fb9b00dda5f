/// A rectangle defined by origin + size in pixels.
///
/// Widths come out of text measurement, so everything is `f32`.
/// Containment is half-open (`x..x+w`), which keeps contiguously laid-out
/// tabs from ever double-hitting a shared edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Returns `true` when `(px, py)` falls inside this rectangle.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Returns the same rectangle shifted horizontally by `dx`.
    pub fn offset_x(&self, dx: f32) -> Rect {
        Rect { x: self.x + dx, ..*self }
    }
}
