use crate::core::Rect;

/// Opaque handle to the content a page displays.  The host maps it to the
/// real document/view; the notebook only carries it around and reports it
/// in notifications.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ContentId(pub u64);

/// A pre-decoded RGBA icon.  Decoding stays outside the core; the gallery
/// binary uses the `image` crate, tests build bitmaps by hand.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Icon {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// One document tab.
///
/// The three rectangles are a memoized product of the geometry pass — the
/// layout engine overwrites them wholesale, nothing else mutates them.
#[derive(Clone, Debug)]
pub struct Page {
    pub text: String,
    pub icon: Option<Icon>,
    pub closable: bool,
    pub content: ContentId,

    pub(crate) tab_rect: Rect,
    pub(crate) text_rect: Rect,
    pub(crate) close_rect: Rect,
}

impl Page {
    pub fn new(text: impl Into<String>, content: ContentId) -> Page {
        Page {
            text: text.into(),
            icon: None,
            closable: false,
            content,
            tab_rect: Rect::default(),
            text_rect: Rect::default(),
            close_rect: Rect::default(),
        }
    }

    pub fn closable(mut self, closable: bool) -> Page {
        self.closable = closable;
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Page {
        self.icon = Some(icon);
        self
    }

    /// Bounding rectangle of the whole tab, as of the last geometry pass.
    pub fn tab_rect(&self) -> Rect {
        self.tab_rect
    }

    /// Close-button rectangle; meaningless unless the page is closable.
    pub fn close_rect(&self) -> Rect {
        self.close_rect
    }
}

/// Ordered page store.  Insertion order is visual tab order; indices stay
/// contiguous `0..len`.
#[derive(Default)]
pub struct PageList {
    pages: Vec<Page>,
}

impl PageList {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Page> {
        self.pages.iter_mut()
    }

    pub(crate) fn insert(&mut self, index: usize, page: Page) {
        self.pages.insert(index, page);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Page {
        self.pages.remove(index)
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.pages.swap(a, b);
    }

    /// Widest icon across all pages, if any page carries one.
    pub(crate) fn max_icon_width(&self) -> Option<f32> {
        self.pages
            .iter()
            .filter_map(|p| p.icon.as_ref())
            .map(|icon| icon.width as f32)
            .reduce(f32::max)
    }

    /// Tallest icon across all pages.
    pub(crate) fn max_icon_height(&self) -> f32 {
        self.pages
            .iter()
            .filter_map(|p| p.icon.as_ref())
            .map(|icon| icon.height as f32)
            .fold(0.0, f32::max)
    }
}

/// Selection index after removing `removed` from a list of `len_before`
/// pages.  The `bool` reports whether the displayed content changed and a
/// notification is due (the pure index decrement keeps the same page on
/// screen and stays silent).
pub(crate) fn selection_after_remove(
    selected: Option<usize>,
    len_before: usize,
    removed: usize,
) -> (Option<usize>, bool) {
    let len_after = len_before - 1;
    if len_after == 0 {
        return (None, selected.is_some());
    }
    let Some(sel) = selected else {
        return (None, false);
    };

    if sel > removed {
        (Some(sel - 1), false)
    } else if sel > len_after - 1 {
        (Some(len_after - 1), true)
    } else if sel == removed {
        (Some(sel), true)
    } else {
        (Some(sel), false)
    }
}

/// Selection index after inserting at `index`: shifts when the insertion
/// lands at or before the current selection, adopts the new page when
/// nothing was selected.
pub(crate) fn selection_after_insert(selected: Option<usize>, index: usize) -> Option<usize> {
    match selected {
        None => Some(index),
        Some(sel) if index <= sel => Some(sel + 1),
        keep => keep,
    }
}
