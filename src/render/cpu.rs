//! Software rasterizer: fills, anti-aliased strokes, glyph and icon
//! blitting into a packed 0xRRGGBB framebuffer.

use std::collections::HashMap;
use std::sync::Arc;

use fontdue::{Font, Metrics};

use crate::core::{Color, Rect, blend_rgb};
use crate::notebook::Icon;

use super::{Canvas, FontMeasure};

/// Long-lived rasterizer state: the parsed font plus a glyph bitmap
/// cache.  Borrow a [`CpuCanvas`] from it for each frame.
pub struct SoftRenderer {
    font: Arc<Font>,
    px: f32,
    ascent: f32,
    glyphs: HashMap<char, (Metrics, Vec<u8>)>,
}

impl SoftRenderer {
    pub fn new(font: &FontMeasure) -> SoftRenderer {
        let ascent = font
            .font()
            .horizontal_line_metrics(font.px())
            .map(|m| m.ascent)
            .unwrap_or(font.px());
        SoftRenderer {
            font: font.font().clone(),
            px: font.px(),
            ascent,
            glyphs: HashMap::new(),
        }
    }

    /// The glyph cache keys on the char alone, so it must be dropped when
    /// the face or size changes.
    pub fn set_font(&mut self, font: &FontMeasure) {
        *self = SoftRenderer::new(font);
    }

    pub fn canvas<'a>(
        &'a mut self,
        buf: &'a mut [u32],
        width: usize,
        height: usize,
    ) -> CpuCanvas<'a> {
        CpuCanvas { renderer: self, buf, width, height }
    }

    fn glyph(&mut self, ch: char) -> &(Metrics, Vec<u8>) {
        let (font, px) = (&self.font, self.px);
        self.glyphs.entry(ch).or_insert_with(|| font.rasterize(ch, px))
    }
}

/// One frame's drawing surface over a borrowed pixel buffer.
pub struct CpuCanvas<'a> {
    renderer: &'a mut SoftRenderer,
    buf: &'a mut [u32],
    width: usize,
    height: usize,
}

impl CpuCanvas<'_> {
    fn blend_px(&mut self, x: usize, y: usize, color: Color, alpha: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        self.buf[idx] = blend_rgb(self.buf[idx], color.to_pixel(), alpha);
    }

    fn clip_span(v0: f32, v1: f32, max: usize) -> (usize, usize) {
        let lo = v0.max(0.0) as usize;
        let hi = (v1.max(0.0) as usize).min(max);
        (lo, hi)
    }
}

impl Canvas for CpuCanvas<'_> {
    fn clear(&mut self, color: Color) {
        self.buf.fill(color.to_pixel());
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let (x0, x1) = Self::clip_span(rect.x, rect.right(), self.width);
        let (y0, y1) = Self::clip_span(rect.y, rect.bottom(), self.height);
        let pixel = color.to_pixel();
        for y in y0..y1 {
            let row = &mut self.buf[y * self.width..(y + 1) * self.width];
            for slot in &mut row[x0..x1] {
                *slot = blend_rgb(*slot, pixel, alpha);
            }
        }
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32, color: Color) {
        let half = thickness / 2.0;
        let (min_x, max_x) = Self::clip_span(x0.min(x1) - half - 1.0, x0.max(x1) + half + 2.0, self.width);
        let (min_y, max_y) = Self::clip_span(y0.min(y1) - half - 1.0, y0.max(y1) + half + 2.0, self.height);

        for py in min_y..max_y {
            for px in min_x..max_x {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                let dist = point_to_segment_distance(cx, cy, x0, y0, x1, y1);
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_px(px, py, color, (coverage * 255.0) as u8);
                }
            }
        }
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        let baseline = y + self.renderer.ascent;
        let pixel = color.to_pixel();
        let mut pen = x;
        for ch in text.chars() {
            let (metrics, bitmap) = self.renderer.glyph(ch);
            let left = pen + metrics.xmin as f32;
            let top = baseline - metrics.height as f32 - metrics.ymin as f32;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let alpha = bitmap[row * metrics.width + col];
                    if alpha == 0 {
                        continue;
                    }
                    let px = left + col as f32;
                    let py = top + row as f32;
                    if px < 0.0 || py < 0.0 || px as usize >= self.width || py as usize >= self.height {
                        continue;
                    }
                    let idx = py as usize * self.width + px as usize;
                    self.buf[idx] = blend_rgb(self.buf[idx], pixel, alpha);
                }
            }
            pen += metrics.advance_width;
        }
    }

    fn draw_icon(&mut self, rect: Rect, icon: &Icon) {
        if icon.width == 0 || icon.height == 0 || rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        let (x0, x1) = Self::clip_span(rect.x, rect.right(), self.width);
        let (y0, y1) = Self::clip_span(rect.y, rect.bottom(), self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                // Map the destination pixel center back into icon space.
                let u = (px as f32 + 0.5 - rect.x) / rect.w * icon.width as f32 - 0.5;
                let v = (py as f32 + 0.5 - rect.y) / rect.h * icon.height as f32 - 0.5;
                let (color, alpha) = sample_bilinear(icon, u, v);
                if alpha > 0 {
                    self.blend_px(px, py, color, alpha);
                }
            }
        }
    }
}

fn point_to_segment_distance(px: f32, py: f32, x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq <= f32::EPSILON {
        0.0
    } else {
        (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let nx = x0 + t * dx;
    let ny = y0 + t * dy;
    ((px - nx) * (px - nx) + (py - ny) * (py - ny)).sqrt()
}

fn texel(icon: &Icon, x: u32, y: u32) -> [f32; 4] {
    let x = x.min(icon.width - 1);
    let y = y.min(icon.height - 1);
    let idx = ((y * icon.width + x) * 4) as usize;
    [
        icon.rgba[idx] as f32,
        icon.rgba[idx + 1] as f32,
        icon.rgba[idx + 2] as f32,
        icon.rgba[idx + 3] as f32,
    ]
}

/// Bilinear sample at `(u, v)` in texel coordinates.
fn sample_bilinear(icon: &Icon, u: f32, v: f32) -> (Color, u8) {
    let u = u.max(0.0);
    let v = v.max(0.0);
    let ix = u.floor() as u32;
    let iy = v.floor() as u32;
    let fx = u - u.floor();
    let fy = v - v.floor();

    let p00 = texel(icon, ix, iy);
    let p10 = texel(icon, ix + 1, iy);
    let p01 = texel(icon, ix, iy + 1);
    let p11 = texel(icon, ix + 1, iy + 1);

    let mut out = [0.0f32; 4];
    for (i, slot) in out.iter_mut().enumerate() {
        let top = p00[i] + (p10[i] - p00[i]) * fx;
        let bottom = p01[i] + (p11[i] - p01[i]) * fx;
        *slot = top + (bottom - top) * fy;
    }

    (
        Color { r: out[0] as u8, g: out[1] as u8, b: out[2] as u8 },
        out[3] as u8,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render_cpu.rs"]
mod tests;
