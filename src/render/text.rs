use std::sync::Arc;

use anyhow::{Result, anyhow};
use fontdue::{Font, FontSettings};

use super::{TextMeasure, TextSize};

/// [`TextMeasure`] backed by a parsed `fontdue` font at a fixed pixel
/// size.  Cloning is cheap; the renderer shares the same parsed font.
#[derive(Clone)]
pub struct FontMeasure {
    font: Arc<Font>,
    px: f32,
}

impl FontMeasure {
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<FontMeasure> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|err| anyhow!("failed to parse font: {err}"))?;
        Ok(FontMeasure { font: Arc::new(font), px })
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    /// Same face at a different pixel size.
    pub fn with_px(&self, px: f32) -> FontMeasure {
        FontMeasure { font: self.font.clone(), px }
    }

    pub(crate) fn font(&self) -> &Arc<Font> {
        &self.font
    }

    fn line_height(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.px)
            .map(|m| m.new_line_size)
            .unwrap_or(self.px)
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&self, text: &str) -> TextSize {
        let width = text
            .chars()
            .map(|ch| self.font.metrics(ch, self.px).advance_width)
            .sum();
        TextSize { width, height: self.line_height() }
    }

    fn ascent(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.px)
            .map(|m| m.ascent)
            .unwrap_or(self.px)
    }
}
