//! The notebook control: an ordered page collection, a selection, and the
//! interaction/geometry state that keeps the tab strip consistent.
//!
//! Everything is single-threaded and synchronous: any operation that
//! mutates state re-runs the geometry pass before it returns, so
//! hit-testing and painting never observe stale rectangles.

mod events;
pub(crate) mod layout;
mod page;
mod pointer;

pub use events::NotebookObserver;
pub use page::{ContentId, Icon, Page, PageList};

use anyhow::{Result, bail};

use crate::render::TextMeasure;
use crate::style::{Style, StyleChange};

use layout::{LayoutInput, NavButtons};
use page::{selection_after_insert, selection_after_remove};
use pointer::DragState;

/// Sentinel pointer position meaning "not over the control".
pub(crate) const POINTER_AWAY: (f32, f32) = (-1.0, -1.0);

pub struct Notebook {
    pages: PageList,
    selected: Option<usize>,
    style: Style,
    font: Box<dyn TextMeasure>,
    scale: f32,

    fixed_height: bool,
    nav_enabled: bool,
    reorder_enabled: bool,
    enabled: bool,
    loaded: bool,

    /// Container size in pixels, updated by `on_resized`.
    size: (f32, f32),

    pointer: (f32, f32),
    primary_down: bool,
    drag: Option<DragState>,
    scroll_x: f32,
    nav: NavButtons,

    observers: Vec<Box<dyn NotebookObserver>>,
    needs_paint: bool,
}

impl Notebook {
    pub fn new(font: Box<dyn TextMeasure>) -> Notebook {
        Notebook {
            pages: PageList::default(),
            selected: None,
            style: Style::default(),
            font,
            scale: 1.0,
            fixed_height: false,
            nav_enabled: false,
            reorder_enabled: true,
            enabled: true,
            loaded: false,
            size: (0.0, 0.0),
            pointer: POINTER_AWAY,
            primary_down: false,
            drag: None,
            scroll_x: 0.0,
            nav: NavButtons::new(),
            observers: Vec::new(),
            needs_paint: false,
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn NotebookObserver>) {
        self.observers.push(observer);
    }

    // ── Page collection ──────────────────────────────────────────────

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> &PageList {
        &self.pages
    }

    /// Content handle of the selected page, i.e. what the host should be
    /// displaying right now.
    pub fn displayed_content(&self) -> Option<ContentId> {
        self.selected.and_then(|i| self.pages.get(i)).map(|p| p.content)
    }

    /// Inserts `page` at `index` (indices above shift up).  An index past
    /// the end is a caller contract violation and panics.
    pub fn insert_page(&mut self, index: usize, page: Page) {
        self.pages.insert(index, page);

        let old = self.selected;
        let new = selection_after_insert(old, index);
        self.selected = new;
        self.calculate();
        if old.is_none() {
            // First page: it becomes the displayed content.
            self.scroll_selected_into_view();
            self.notify(|o| o.selection_changed(old, new));
        }
        self.request_paint();
    }

    /// Removes and returns the page at `index`, fixing the selection up:
    /// decrement when it was past the removed slot, clamp when it fell off
    /// the end, clear when the collection empties.  Raises
    /// `selection_changed` whenever the displayed content changes.
    pub fn remove_page(&mut self, index: usize) -> Page {
        let len_before = self.pages.len();
        let removed = self.pages.remove(index);

        let old = self.selected;
        let (new, content_changed) = selection_after_remove(old, len_before, index);
        self.selected = new;
        self.calculate();
        if content_changed {
            self.scroll_selected_into_view();
            self.notify(|o| o.selection_changed(old, new));
        }
        self.request_paint();
        removed
    }

    /// Closes the page at `index` through the cancelable notification
    /// path: `page_closing` first (any listener may cancel), then the
    /// removal, then `page_closed`.
    pub fn close_page(&mut self, index: usize) {
        if self.query_closing(index) {
            return;
        }
        let removed = self.remove_page(index);
        self.notify(|o| o.page_closed(removed.content));
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Sets the selection.  `None` is only legal while the collection is
    /// empty; any other out-of-range assignment is refused.
    pub fn set_selected_index(&mut self, index: Option<usize>) -> Result<()> {
        let count = self.pages.len();
        match index {
            None if count == 0 => Ok(()),
            None => bail!("cannot clear the selection while {count} pages exist"),
            Some(i) if i < count => {
                self.set_selection(Some(i));
                Ok(())
            }
            Some(i) => bail!("page index {i} out of range ({count} pages)"),
        }
    }

    pub(crate) fn set_selection(&mut self, new: Option<usize>) {
        let old = self.selected;
        if old == new {
            return;
        }
        self.selected = new;
        self.calculate();
        self.scroll_selected_into_view();
        self.notify(|o| o.selection_changed(old, new));
        self.request_paint();
    }

    // ── Style & properties ───────────────────────────────────────────

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Replaces the whole style.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        self.nav.width = None;
        self.calculate();
        self.request_paint();
    }

    /// Applies a declarative style change in one pass: a single geometry
    /// recompute when the change touches layout, otherwise just a redraw.
    pub fn apply_style(&mut self, change: StyleChange) {
        if change.apply_to(&mut self.style) {
            self.nav.width = None;
            self.calculate();
        }
        self.request_paint();
    }

    pub fn set_font(&mut self, font: Box<dyn TextMeasure>) {
        self.font = font;
        self.nav.width = None;
        self.calculate();
        self.request_paint();
    }

    pub fn set_scale(&mut self, scale: f32) {
        if scale != self.scale {
            self.scale = scale;
            self.calculate();
            self.request_paint();
        }
    }

    pub fn fixed_height(&self) -> bool {
        self.fixed_height
    }

    pub fn set_fixed_height(&mut self, fixed: bool) {
        if fixed != self.fixed_height {
            self.fixed_height = fixed;
            self.calculate();
            self.request_paint();
        }
    }

    pub fn nav_buttons_enabled(&self) -> bool {
        self.nav_enabled
    }

    pub fn set_nav_buttons_enabled(&mut self, enabled: bool) {
        if enabled != self.nav_enabled {
            self.nav_enabled = enabled;
            self.nav.width = None;
            self.calculate();
            self.request_paint();
        }
    }

    pub fn reorder_enabled(&self) -> bool {
        self.reorder_enabled
    }

    pub fn set_reorder_enabled(&mut self, enabled: bool) {
        self.reorder_enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled != self.enabled {
            self.enabled = enabled;
            self.request_paint();
        }
    }

    // ── Host lifecycle ───────────────────────────────────────────────

    /// The host attached the control to a live layout: run the first
    /// (forced) geometry pass.
    pub fn on_loaded(&mut self) {
        self.loaded = true;
        self.calculate_forced();
        self.request_paint();
    }

    pub fn on_resized(&mut self, width: f32, height: f32) {
        self.size = (width, height);
        self.calculate();
        self.request_paint();
    }

    /// Explicit geometry invalidation.
    pub fn invalidate(&mut self) {
        self.calculate();
        self.request_paint();
    }

    /// Height of the tab strip under the current style/font/pages.
    pub fn strip_height(&self) -> f32 {
        layout::strip_height(&self.pages, &self.layout_input())
    }

    /// Drains the redraw request flag; the host repaints when it was set.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_paint)
    }

    // ── Shared state the painter reads ───────────────────────────────

    pub(crate) fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Leading width reserved by the nav buttons; zero while disabled.
    pub(crate) fn nav_width_active(&self) -> f32 {
        if self.nav_enabled { self.nav.width.unwrap_or(0.0) } else { 0.0 }
    }

    pub(crate) fn nav_buttons(&self) -> &NavButtons {
        &self.nav
    }

    #[cfg(test)]
    pub(crate) fn scroll_offset(&self) -> f32 {
        self.scroll_x
    }

    // ── Geometry plumbing ────────────────────────────────────────────

    fn layout_input(&self) -> LayoutInput<'_> {
        LayoutInput {
            font: self.font.as_ref(),
            padding: self.style.padding,
            scale: self.scale,
            fixed_height: self.fixed_height,
            nav_enabled: self.nav_enabled,
            scroll_x: self.scroll_x,
            selected: self.selected,
            drag_offset: self.drag.as_ref().map(|d| self.pointer.0 - d.anchor_x),
        }
    }

    /// Re-runs the geometry pass, unless the control has not been loaded
    /// into a live layout yet.
    pub(crate) fn calculate(&mut self) {
        if !self.loaded {
            return;
        }
        self.calculate_forced();
    }

    fn calculate_forced(&mut self) {
        let drag_offset = self.drag.as_ref().map(|d| self.pointer.0 - d.anchor_x);
        let input = LayoutInput {
            font: self.font.as_ref(),
            padding: self.style.padding,
            scale: self.scale,
            fixed_height: self.fixed_height,
            nav_enabled: self.nav_enabled,
            scroll_x: self.scroll_x,
            selected: self.selected,
            drag_offset,
        };
        layout::compute(&mut self.pages, &mut self.nav, &input);
    }

    /// Adjusts the scroll offset so the selected tab sits inside the
    /// viewport, then re-lays out if it moved.
    fn scroll_selected_into_view(&mut self) {
        if !self.loaded {
            return;
        }
        let Some(page) = self.selected.and_then(|i| self.pages.get(i)) else {
            return;
        };
        let at_zero = page.tab_rect.offset_x(-self.scroll_x);
        let new_scroll =
            layout::scroll_for_visibility(at_zero, self.nav_width_active(), self.size.0, self.scroll_x);
        if new_scroll != self.scroll_x {
            self.scroll_x = new_scroll;
            self.calculate();
        }
    }

    pub(crate) fn request_paint(&mut self) {
        self.needs_paint = true;
    }

    // ── Notification dispatch ────────────────────────────────────────

    /// Runs `f` over every observer.  Observers are detached for the
    /// duration of the call so a listener may register further observers
    /// without aliasing the control.
    fn notify(&mut self, mut f: impl FnMut(&mut dyn NotebookObserver)) {
        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            f(observer.as_mut());
        }
        observers.append(&mut self.observers);
        self.observers = observers;
    }

    /// Asks every observer about a pending close.  Returns `true` when
    /// any listener cancels.
    fn query_closing(&mut self, index: usize) -> bool {
        let mut observers = std::mem::take(&mut self.observers);
        let mut canceled = false;
        for observer in &mut observers {
            canceled |= observer.page_closing(index);
        }
        observers.append(&mut self.observers);
        self.observers = observers;
        canceled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/notebook_pages.rs"]
mod pages_tests;
