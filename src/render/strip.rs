//! Paints the tab strip onto a [`Canvas`] from the rectangles the last
//! geometry pass produced.
//!
//! Draw order: background, every non-selected tab in collection order,
//! the selected tab last (so its drag offset overlaps neighbours), then
//! the nav pseudo-tabs on top of anything scrolled beneath them.

use crate::core::Rect;
use crate::notebook::{Notebook, Page};
use crate::style::Style;

use super::Canvas;

/// Background alpha for the selected tab (80%).
const SELECTED_BG_ALPHA: u8 = 204;

/// Fraction of the close square the "X" is inset by on each side.
const CLOSE_CROSS_INSET: f32 = 3.0;

impl Notebook {
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        let style = *self.style();
        canvas.clear(style.tab_bg);

        let selected = self.selected_index();
        for (index, page) in self.pages().iter().enumerate() {
            if selected != Some(index) {
                self.paint_tab(canvas, &style, page, false, false);
            }
        }
        if let Some(page) = selected.and_then(|i| self.pages().get(i)) {
            self.paint_tab(canvas, &style, page, true, false);
        }

        if self.nav_buttons_enabled() {
            let nav = self.nav_buttons();
            self.paint_tab(canvas, &style, &nav.prev, false, true);
            self.paint_tab(canvas, &style, &nav.next, false, true);
        }
    }

    fn paint_tab(
        &self,
        canvas: &mut dyn Canvas,
        style: &Style,
        page: &Page,
        selected: bool,
        pseudo: bool,
    ) {
        let (bg, fg, bg_alpha) = if !self.is_enabled() {
            (style.tab_bg, style.disabled_fg, 255)
        } else if selected {
            (style.tab_highlight_bg, style.tab_highlight_fg, SELECTED_BG_ALPHA)
        } else if self.tab_hover_active(page, pseudo) {
            (style.tab_highlight_bg, style.tab_highlight_fg, 255)
        } else {
            (style.tab_bg, style.tab_fg, 255)
        };

        let tab = page.tab_rect();
        canvas.fill_rect(tab, bg, bg_alpha);

        if let Some(icon) = &page.icon {
            canvas.draw_icon(icon_dest(tab, style.padding, icon.width, icon.height), icon);
        }

        let text_rect = page.text_rect;
        canvas.draw_text(text_rect.x, text_rect.y, &page.text, fg);

        if page.closable {
            self.paint_close_button(canvas, style, page);
        }
    }

    fn paint_close_button(&self, canvas: &mut dyn Canvas, style: &Style, page: &Page) {
        let hot = self.close_hit_active(page);
        let (bg, fg) = if !self.is_enabled() {
            (style.close_bg, style.disabled_fg)
        } else if hot {
            (style.close_highlight_bg, style.close_highlight_fg)
        } else {
            (style.close_bg, style.close_fg)
        };

        let close = page.close_rect();
        canvas.fill_rect(close, bg, 255);

        let inset_x = close.w / CLOSE_CROSS_INSET;
        let inset_y = close.h / CLOSE_CROSS_INSET;
        let x0 = close.x + inset_x;
        let x1 = close.right() - inset_x;
        let y0 = close.y + inset_y;
        let y1 = close.bottom() - inset_y;
        canvas.stroke_line(x0, y0, x1, y1, 1.2, fg);
        canvas.stroke_line(x0, y1, x1, y0, 1.2, fg);
    }
}

/// Destination rectangle for an icon: left-aligned in the icon column,
/// vertically centered, scaled down (never up) to fit the tab height.
fn icon_dest(tab: Rect, padding: f32, icon_w: u32, icon_h: u32) -> Rect {
    let scale = (tab.h / icon_h as f32).min(1.0);
    let w = icon_w as f32 * scale;
    let h = icon_h as f32 * scale;
    Rect::new(tab.x + padding, ((tab.h - h) / 2.0).floor(), w, h)
}
