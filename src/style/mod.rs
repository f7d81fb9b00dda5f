//! Style state for the notebook: padding plus the color pairs the paint
//! routine reads.  Pure configuration — mutating it never touches layout
//! or interaction state directly; the control decides what to recompute.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Complete visual style of a notebook.
///
/// Tab and close-button colors come in normal/highlight pairs; the
/// highlight pair doubles as both the selected-tab and hover palette.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Style {
    /// Padding applied between tab elements, in pixels.
    pub padding: f32,

    pub tab_bg: Color,
    pub tab_fg: Color,
    pub tab_highlight_bg: Color,
    pub tab_highlight_fg: Color,

    pub close_bg: Color,
    pub close_fg: Color,
    pub close_highlight_bg: Color,
    pub close_highlight_fg: Color,

    /// Foreground forced onto every tab while the control is disabled.
    pub disabled_fg: Color,
}

impl Default for Style {
    fn default() -> Self {
        Theme::Dark.resolve()
    }
}

/// Named built-in palettes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Resolves this theme into a full style.
    pub fn resolve(self) -> Style {
        match self {
            Theme::Dark => Style {
                padding: 6.0,
                tab_bg: Color::from_pixel(0x1E2127),
                tab_fg: Color::from_pixel(0x6C7480),
                tab_highlight_bg: Color::from_pixel(0x3A404C),
                tab_highlight_fg: Color::from_pixel(0xD2DBEB),
                close_bg: Color::from_pixel(0x2E333C),
                close_fg: Color::from_pixel(0x6C7480),
                close_highlight_bg: Color::from_pixel(0xE06C75),
                close_highlight_fg: Color::from_pixel(0xF0F4FC),
                disabled_fg: Color::from_pixel(0x4A505C),
            },
            Theme::Light => Style {
                padding: 6.0,
                tab_bg: Color::from_pixel(0xDCE0E8),
                tab_fg: Color::from_pixel(0x6C6F85),
                tab_highlight_bg: Color::from_pixel(0xEFF1F5),
                tab_highlight_fg: Color::from_pixel(0x4C4F69),
                close_bg: Color::from_pixel(0xCCD0DA),
                close_fg: Color::from_pixel(0x6C6F85),
                close_highlight_bg: Color::from_pixel(0xD20F39),
                close_highlight_fg: Color::from_pixel(0xFFFFFF),
                disabled_fg: Color::from_pixel(0x9CA0B0),
            },
        }
    }
}

/// Declarative style mutation.  Only the populated fields change; the
/// control applies the whole batch with a single recompute + redraw.
#[derive(Clone, Copy, Default, Debug)]
pub struct StyleChange {
    pub padding: Option<f32>,
    pub tab_bg: Option<Color>,
    pub tab_fg: Option<Color>,
    pub tab_highlight_bg: Option<Color>,
    pub tab_highlight_fg: Option<Color>,
    pub close_bg: Option<Color>,
    pub close_fg: Option<Color>,
    pub close_highlight_bg: Option<Color>,
    pub close_highlight_fg: Option<Color>,
    pub disabled_fg: Option<Color>,
}

impl StyleChange {
    /// Folds this change into `style`.  Returns `true` when the change
    /// affects geometry (today only padding does) as opposed to paint.
    pub fn apply_to(&self, style: &mut Style) -> bool {
        let mut relayout = false;
        if let Some(padding) = self.padding {
            relayout = relayout || padding != style.padding;
            style.padding = padding;
        }

        let pairs = [
            (self.tab_bg, &mut style.tab_bg),
            (self.tab_fg, &mut style.tab_fg),
            (self.tab_highlight_bg, &mut style.tab_highlight_bg),
            (self.tab_highlight_fg, &mut style.tab_highlight_fg),
            (self.close_bg, &mut style.close_bg),
            (self.close_fg, &mut style.close_fg),
            (self.close_highlight_bg, &mut style.close_highlight_bg),
            (self.close_highlight_fg, &mut style.close_highlight_fg),
            (self.disabled_fg, &mut style.disabled_fg),
        ];
        for (new, slot) in pairs {
            if let Some(color) = new {
                *slot = color;
            }
        }
        relayout
    }
}

// ── Persistence ──────────────────────────────────────────────────────

/// Path of the persisted style: `<config dir>/folio/style.ron`, where the
/// config dir is `XDG_CONFIG_HOME`, `$HOME/.config` or
/// `%USERPROFILE%/.config`, in that order.
fn style_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .or_else(|| std::env::var_os("USERPROFILE").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("folio").join("style.ron"))
}

/// Reads the persisted style.  `None` when no file exists, it cannot be
/// read, or it no longer parses; callers fall back to a theme default.
pub fn load_style() -> Option<Style> {
    let contents = fs::read_to_string(style_path()?).ok()?;
    ron::from_str(&contents).ok()
}

/// Persists the style to disk.  Errors are silently ignored.
pub fn save_style(style: &Style) {
    let Some(path) = style_path() else {
        return;
    };
    let Ok(serialized) = ron::ser::to_string_pretty(style, ron::ser::PrettyConfig::default())
    else {
        return;
    };
    if path.parent().is_some_and(|dir| fs::create_dir_all(dir).is_ok()) {
        let _ = fs::write(path, serialized);
    }
}
