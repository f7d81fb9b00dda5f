//! Pointer handling for the tab strip: hit-testing, selection clicks,
//! close-button clicks, nav buttons and drag-to-reorder.
//!
//! Hit-testing runs against the rectangles the geometry pass just wrote,
//! so a hit is always on exactly what is on screen.

use super::{Notebook, POINTER_AWAY, page::Page};

/// Live drag state.  The anchor is the pointer position where the drag
/// began; the selected tab's visuals shift by `pointer.x - anchor_x`.
pub(crate) struct DragState {
    pub(crate) anchor_x: f32,
}

enum Hit {
    Close(usize),
    Select(usize),
}

impl Notebook {
    /// Primary button pressed at the last reported pointer position.
    pub fn pointer_pressed(&mut self) {
        if !self.enabled {
            return;
        }
        self.primary_down = true;
        let (px, py) = self.pointer;

        if self.nav_enabled {
            if self.nav.prev.tab_rect.contains(px, py) {
                if let Some(sel) = self.selected {
                    if sel > 0 {
                        self.set_selection(Some(sel - 1));
                    }
                }
                return;
            }
            if self.nav.next.tab_rect.contains(px, py) {
                if let Some(sel) = self.selected {
                    if sel + 1 < self.pages.len() {
                        self.set_selection(Some(sel + 1));
                    }
                }
                return;
            }
        }

        let mut hit = None;
        for (i, page) in self.pages.iter().enumerate() {
            if page.tab_rect.contains(px, py) {
                hit = Some(if self.close_hit_active(page) {
                    Hit::Close(i)
                } else {
                    Hit::Select(i)
                });
                break;
            }
        }
        match hit {
            Some(Hit::Close(i)) => self.close_page(i),
            Some(Hit::Select(i)) => self.set_selection(Some(i)),
            None => {}
        }
    }

    /// Pointer moved to `(x, y)` in strip coordinates.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);

        if self.enabled && self.reorder_enabled && self.primary_down && self.drag.is_none() {
            self.drag = Some(DragState { anchor_x: x });
        }

        self.calculate();
        if self.drag.is_some() {
            if let Some(sel) = self.selected {
                self.drag_reorder(sel);
            }
        }
        self.request_paint();
    }

    /// Primary button released: any drag ends here.
    pub fn pointer_released(&mut self) {
        self.primary_down = false;
        self.drag = None;
        self.calculate();
        self.request_paint();
    }

    /// Pointer left the control.
    pub fn pointer_left(&mut self) {
        self.pointer = POINTER_AWAY;
        self.request_paint();
    }

    /// Whether `page` should paint hover feedback: pointer inside the tab
    /// but outside its close button, no drag in progress, and (for real
    /// tabs) past the nav-button column.
    pub(crate) fn tab_hover_active(&self, page: &Page, pseudo: bool) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let (px, py) = self.pointer;
        if !page.tab_rect.contains(px, py) {
            return false;
        }
        if page.closable && page.close_rect.contains(px, py) {
            return false;
        }
        if !pseudo && px < self.nav_width_active() {
            return false;
        }
        true
    }

    /// Whether `page`'s close button is the active hit target.  Shared by
    /// the painter (highlight) and `pointer_pressed` (close), so the two
    /// can never disagree.  Tabs scrolled under the nav-button column do
    /// not expose their close button.
    pub(crate) fn close_hit_active(&self, page: &Page) -> bool {
        if !page.closable || !self.enabled || self.drag.is_some() {
            return false;
        }
        let (px, py) = self.pointer;
        page.close_rect.contains(px, py) && px >= self.nav_width_active()
    }

    /// One swap step of drag-to-reorder.  Compares the dragged tab's
    /// visual center against the adjacent tab's near edge; an oversized
    /// neighbor has its edge clipped to the dragged tab's width so a wide
    /// tab cannot trap the drag.
    fn drag_reorder(&mut self, sel: usize) {
        let Some(page) = self.pages.get(sel) else {
            return;
        };
        let sel_rect = page.tab_rect;
        let moved = page.content;
        let center = sel_rect.center_x();

        let mut target = None;
        if let Some(next) = self.pages.get(sel + 1) {
            let next_rect = next.tab_rect;
            let mut edge = next_rect.x;
            if next_rect.w > sel_rect.w {
                edge = next_rect.right() - sel_rect.w;
            }
            if center > edge {
                target = Some(sel + 1);
            }
        }
        if target.is_none() && sel > 0 {
            if let Some(prev) = self.pages.get(sel - 1) {
                let prev_rect = prev.tab_rect;
                let mut edge = prev_rect.right();
                if prev_rect.w > sel_rect.w {
                    edge = prev_rect.x + sel_rect.w;
                }
                if center < edge {
                    target = Some(sel - 1);
                }
            }
        }
        let Some(to) = target else {
            return;
        };

        // Width of the neighbor changing places with the dragged tab.
        let swapped_w = self.pages.get(to).map(|p| p.tab_rect.w).unwrap_or(0.0);
        self.pages.swap(sel, to);
        if let Some(drag) = self.drag.as_mut() {
            // Keep the visual offset continuous across the swap.
            if to > sel {
                drag.anchor_x += swapped_w;
            } else {
                drag.anchor_x -= swapped_w;
            }
        }
        self.selected = Some(to);
        self.calculate();
        self.notify(|o| o.page_reordered(moved, sel, to));
        self.request_paint();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/notebook_pointer.rs"]
mod tests;
