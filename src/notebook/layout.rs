//! Pure layout math for the tab strip.
//!
//! Given the page list, font metrics, padding, and scroll offset this
//! module produces every cached rectangle (tab bounds, text bounds,
//! close-button bounds) plus the nav pseudo-tab geometry.  No rendering
//! and no interaction state live here; both the painter and the pointer
//! controller consume the same rectangles, which is what keeps
//! hit-testing and drawing in agreement.

use crate::core::Rect;
use crate::render::{TextMeasure, TextSize};

use super::page::{ContentId, Page, PageList};

// ── Constants ────────────────────────────────────────────────────────

/// Minimum square side: fallback icon column width, and the whole strip
/// height in fixed-height mode.
pub(crate) const MIN_SQUARE_SIDE: f32 = 16.0;

/// Labels for the previous/next navigation pseudo-tabs.
pub(crate) const NAV_PREV_LABEL: &str = "<";
pub(crate) const NAV_NEXT_LABEL: &str = ">";

/// Everything a layout pass reads besides the pages themselves.
pub(crate) struct LayoutInput<'a> {
    pub font: &'a dyn TextMeasure,
    pub padding: f32,
    pub scale: f32,
    pub fixed_height: bool,
    pub nav_enabled: bool,
    pub scroll_x: f32,
    pub selected: Option<usize>,
    /// `Some(pointer_x - anchor_x)` while a reorder drag is active.
    pub drag_offset: Option<f32>,
}

/// The previous/next navigation pseudo-tabs.  Laid out like tabs but kept
/// outside the page collection; only the combined width is cached (the
/// control clears it on font or nav-toggle changes).
pub(crate) struct NavButtons {
    pub prev: Page,
    pub next: Page,
    pub width: Option<f32>,
}

impl NavButtons {
    pub fn new() -> NavButtons {
        NavButtons {
            prev: Page::new(NAV_PREV_LABEL, ContentId(u64::MAX)),
            next: Page::new(NAV_NEXT_LABEL, ContentId(u64::MAX)),
            width: None,
        }
    }
}

// ── Layout functions ─────────────────────────────────────────────────

/// Measures `text`, ceiling'd once so all downstream math works on whole
/// pixels.  Empty text measures as zero without touching the font.
fn measure_text(font: &dyn TextMeasure, text: &str) -> TextSize {
    if text.is_empty() {
        return TextSize::default();
    }
    let size = font.measure(text);
    TextSize { width: size.width.ceil(), height: size.height.ceil() }
}

/// Height of the tab strip.
pub(crate) fn strip_height(pages: &PageList, input: &LayoutInput<'_>) -> f32 {
    if input.fixed_height {
        return MIN_SQUARE_SIDE;
    }
    let text_h = (input.font.ascent() * input.scale).ceil();
    pages.max_icon_height().max(text_h) + input.padding
}

/// Shared icon column width: the widest icon across all pages, or the
/// minimum square side when no icons exist or fixed-height mode is on.
pub(crate) fn icon_column_width(pages: &PageList, fixed_height: bool) -> f32 {
    if fixed_height {
        return MIN_SQUARE_SIDE;
    }
    pages.max_icon_width().unwrap_or(MIN_SQUARE_SIDE)
}

/// Computes one tab's rectangles at `cursor` and writes them into `page`.
/// Returns the un-dragged tab width the cursor advances by.
fn layout_one(
    page: &mut Page,
    cursor: f32,
    height: f32,
    padding: f32,
    icon_col: f32,
    font: &dyn TextMeasure,
    drag_offset: f32,
) -> f32 {
    let text = measure_text(font, &page.text);
    let close_d = height / 2.0;

    let icon_span = if page.icon.is_some() { icon_col + padding } else { 0.0 };
    let mut width = text.width + icon_span + padding;
    if page.closable {
        width += close_d + padding + padding;
    }

    // The drag offset shifts only this tab's visuals; the returned width
    // keeps subsequent tabs anchored to the un-dragged position.
    let tab = Rect::new(cursor + drag_offset, 0.0, width, height);
    page.tab_rect = tab;
    page.close_rect = Rect::new(
        tab.right() - padding - close_d,
        (height / 4.0).floor(),
        close_d,
        close_d,
    );
    page.text_rect = Rect::new(
        tab.x + padding + if page.icon.is_some() { icon_col } else { 0.0 },
        ((height - text.height) / 2.0).floor(),
        text.width,
        text.height,
    );

    width
}

/// Runs a full geometry pass: nav pseudo-tabs at the origin, then every
/// page left to right from `nav width + scroll offset`.
///
/// Idempotent: two passes with identical inputs produce identical
/// rectangles.
pub(crate) fn compute(pages: &mut PageList, nav: &mut NavButtons, input: &LayoutInput<'_>) {
    let height = strip_height(pages, input);
    let icon_col = icon_column_width(pages, input.fixed_height);

    let mut nav_width = 0.0;
    if input.nav_enabled {
        let pw = layout_one(&mut nav.prev, 0.0, height, input.padding, icon_col, input.font, 0.0);
        let nw = layout_one(&mut nav.next, pw, height, input.padding, icon_col, input.font, 0.0);
        nav_width = *nav.width.get_or_insert(pw + nw);
    }

    let mut cursor = nav_width + input.scroll_x;
    for (index, page) in pages.iter_mut().enumerate() {
        let dragging_this = input.selected == Some(index);
        let offset = match input.drag_offset {
            Some(dx) if dragging_this => dx,
            _ => 0.0,
        };
        cursor += layout_one(page, cursor, height, input.padding, icon_col, input.font, offset);
    }
}

/// Horizontal scroll offset that keeps a tab fully visible between the
/// nav-button width and the strip's right edge.  `tab_at_zero` is the
/// tab's rectangle with the current scroll removed; offsets never go
/// positive.
pub(crate) fn scroll_for_visibility(
    tab_at_zero: Rect,
    nav_width: f32,
    viewport_w: f32,
    scroll: f32,
) -> f32 {
    let mut s = scroll;
    if tab_at_zero.right() + s > viewport_w {
        s = viewport_w - tab_at_zero.right();
    }
    // Left edge wins when the tab is wider than the viewport.
    if tab_at_zero.x + s < nav_width {
        s = nav_width - tab_at_zero.x;
    }
    s.min(0.0)
}

// ── Tests ────────────────────────────────────────────────────────────

/// Fixed-advance measurer so layout tests never touch a real font:
/// 8 px per char, 16 px tall, 12 px ascent.
#[cfg(test)]
pub(crate) struct FixedMeasure;

#[cfg(test)]
impl TextMeasure for FixedMeasure {
    fn measure(&self, text: &str) -> TextSize {
        TextSize { width: text.chars().count() as f32 * 8.0, height: 16.0 }
    }

    fn ascent(&self) -> f32 {
        12.0
    }
}
