//! Rendering seams: the measurement and canvas traits the notebook core
//! talks through, plus the software implementations.

mod cpu;
mod strip;
mod text;

pub use cpu::{CpuCanvas, SoftRenderer};
pub use text::FontMeasure;

use crate::core::{Color, Rect};
use crate::notebook::Icon;

/// Measured extent of a string, in pixels.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

/// Text measurement service.  The layout engine only ever asks for string
/// extents and the font ascent; rasterization is a canvas concern.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> TextSize;
    fn ascent(&self) -> f32;
}

/// Drawing surface the strip painter targets.
///
/// One software implementation ships ([`CpuCanvas`]); the trait keeps the
/// paint routine reusable over other backends.
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: u8);
    /// Anti-aliased stroked segment, used for the close-button cross.
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32, color: Color);
    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color);
    /// Draws `icon` scaled into `rect` with bilinear interpolation.
    fn draw_icon(&mut self, rect: Rect, icon: &Icon);
}
