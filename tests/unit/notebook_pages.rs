use std::cell::RefCell;
use std::rc::Rc;

use super::layout::FixedMeasure;
use super::*;

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Selection(Option<usize>, Option<usize>),
    Closing(usize),
    Closed(ContentId),
    Reordered(ContentId, usize, usize),
}

struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
    cancel_close: bool,
}

impl NotebookObserver for Recorder {
    fn selection_changed(&mut self, old: Option<usize>, new: Option<usize>) {
        self.events.borrow_mut().push(Event::Selection(old, new));
    }

    fn page_closing(&mut self, index: usize) -> bool {
        self.events.borrow_mut().push(Event::Closing(index));
        self.cancel_close
    }

    fn page_closed(&mut self, content: ContentId) {
        self.events.borrow_mut().push(Event::Closed(content));
    }

    fn page_reordered(&mut self, content: ContentId, from: usize, to: usize) {
        self.events.borrow_mut().push(Event::Reordered(content, from, to));
    }
}

fn loaded_notebook() -> Notebook {
    let mut nb = Notebook::new(Box::new(FixedMeasure));
    nb.on_loaded();
    nb.on_resized(400.0, 40.0);
    nb
}

/// Notebook with `count` pages ("page0".."pageN") and a recording
/// observer attached after the inserts, so the log starts clean.
fn notebook_with(count: usize) -> (Notebook, Rc<RefCell<Vec<Event>>>) {
    let mut nb = loaded_notebook();
    for i in 0..count {
        nb.insert_page(i, Page::new(format!("page{i}"), ContentId(i as u64)));
    }
    let events = Rc::new(RefCell::new(Vec::new()));
    nb.add_observer(Box::new(Recorder { events: events.clone(), cancel_close: false }));
    (nb, events)
}

#[test]
fn first_insert_selects_and_notifies() {
    let mut nb = loaded_notebook();
    let events = Rc::new(RefCell::new(Vec::new()));
    nb.add_observer(Box::new(Recorder { events: events.clone(), cancel_close: false }));

    nb.insert_page(0, Page::new("home", ContentId(7)));
    assert_eq!(nb.selected_index(), Some(0));
    assert_eq!(nb.displayed_content(), Some(ContentId(7)));
    assert_eq!(*events.borrow(), vec![Event::Selection(None, Some(0))]);
}

#[test]
fn insert_before_selection_shifts_silently() {
    let (mut nb, events) = notebook_with(2);
    nb.set_selected_index(Some(1)).unwrap();
    events.borrow_mut().clear();

    nb.insert_page(0, Page::new("new", ContentId(99)));
    assert_eq!(nb.selected_index(), Some(2));
    assert_eq!(nb.displayed_content(), Some(ContentId(1)));
    assert!(events.borrow().is_empty(), "index shift must not notify");
}

#[test]
fn remove_selected_notifies_with_new_content() {
    let (mut nb, events) = notebook_with(3);
    nb.set_selected_index(Some(1)).unwrap();
    events.borrow_mut().clear();

    let removed = nb.remove_page(1);
    assert_eq!(removed.content, ContentId(1));
    assert_eq!(nb.selected_index(), Some(1));
    assert_eq!(nb.displayed_content(), Some(ContentId(2)));
    assert_eq!(*events.borrow(), vec![Event::Selection(Some(1), Some(1))]);
}

#[test]
fn remove_last_remaining_page_clears_selection() {
    let (mut nb, events) = notebook_with(1);
    nb.remove_page(0);
    assert_eq!(nb.selected_index(), None);
    assert_eq!(nb.displayed_content(), None);
    assert_eq!(*events.borrow(), vec![Event::Selection(Some(0), None)]);
}

#[test]
fn remove_before_selection_is_silent() {
    let (mut nb, events) = notebook_with(3);
    nb.set_selected_index(Some(2)).unwrap();
    events.borrow_mut().clear();

    nb.remove_page(0);
    assert_eq!(nb.selected_index(), Some(1));
    assert_eq!(nb.displayed_content(), Some(ContentId(2)));
    assert!(events.borrow().is_empty());
}

#[test]
fn remove_before_selection_keeps_content_on_screen() {
    // [A, B, C] with B selected; removing A leaves [B, C] showing B.
    let (mut nb, events) = notebook_with(3);
    nb.set_selected_index(Some(1)).unwrap();
    events.borrow_mut().clear();

    nb.remove_page(0);
    assert_eq!(nb.selected_index(), Some(0));
    assert_eq!(nb.displayed_content(), Some(ContentId(1)));
    assert!(events.borrow().is_empty());
}

#[test]
fn set_selected_index_rejects_out_of_range() {
    let (mut nb, _) = notebook_with(2);
    assert!(nb.set_selected_index(Some(2)).is_err());
    assert!(nb.set_selected_index(None).is_err());
    assert_eq!(nb.selected_index(), Some(0));

    let mut empty = loaded_notebook();
    assert!(empty.set_selected_index(None).is_ok());
    assert!(empty.set_selected_index(Some(0)).is_err());
}

#[test]
fn selecting_the_same_index_is_silent() {
    let (mut nb, events) = notebook_with(2);
    nb.set_selected_index(Some(0)).unwrap();
    assert!(events.borrow().is_empty());
}

#[test]
fn close_emits_closing_then_closed() {
    let (mut nb, events) = notebook_with(2);
    nb.close_page(1);
    assert_eq!(nb.page_count(), 1);
    assert_eq!(
        *events.borrow(),
        vec![Event::Closing(1), Event::Closed(ContentId(1))]
    );
}

#[test]
fn canceled_close_keeps_the_page() {
    let mut nb = loaded_notebook();
    nb.insert_page(0, Page::new("keep", ContentId(5)));
    let events = Rc::new(RefCell::new(Vec::new()));
    nb.add_observer(Box::new(Recorder { events: events.clone(), cancel_close: true }));

    nb.close_page(0);
    assert_eq!(nb.page_count(), 1);
    assert_eq!(*events.borrow(), vec![Event::Closing(0)]);
}

#[test]
fn redraw_flag_drains() {
    let (mut nb, _) = notebook_with(1);
    assert!(nb.take_redraw());
    assert!(!nb.take_redraw());
    nb.set_enabled(false);
    assert!(nb.take_redraw());
}

#[test]
fn strip_height_follows_font_metrics() {
    let nb = loaded_notebook();
    // ceil(ascent 12 * scale 1) + padding 6
    assert_eq!(nb.strip_height(), 18.0);
}

#[test]
fn selecting_offscreen_tab_scrolls_it_into_view() {
    let mut nb = loaded_notebook();
    nb.on_resized(100.0, 40.0);
    for i in 0..3 {
        // 4 chars * 8 px + padding 6 = 38 px per tab
        nb.insert_page(i, Page::new("aaaa", ContentId(i as u64)));
    }
    nb.set_selected_index(Some(2)).unwrap();
    // Tab 2 spans 76..114 at rest; viewport is 100 px wide.
    assert_eq!(nb.scroll_offset(), -14.0);
    assert_eq!(nb.page(2).unwrap().tab_rect().right(), 100.0);
}

#[test]
fn padding_change_relayouts_tabs() {
    let (mut nb, _) = notebook_with(1);
    let before = nb.page(0).unwrap().tab_rect().w;
    let padding = nb.style().padding;
    nb.apply_style(crate::style::StyleChange {
        padding: Some(padding + 4.0),
        ..Default::default()
    });
    assert_eq!(nb.page(0).unwrap().tab_rect().w, before + 4.0);
}

#[test]
fn font_change_invalidates_the_nav_width_cache() {
    struct WideMeasure;
    impl crate::render::TextMeasure for WideMeasure {
        fn measure(&self, text: &str) -> crate::render::TextSize {
            crate::render::TextSize { width: text.chars().count() as f32 * 10.0, height: 20.0 }
        }
        fn ascent(&self) -> f32 {
            15.0
        }
    }

    let (mut nb, _) = notebook_with(2);
    nb.set_nav_buttons_enabled(true);
    // Two one-char pseudo-tabs at 8 px advance + 6 px padding each.
    assert_eq!(nb.page(0).unwrap().tab_rect().x, 28.0);

    nb.set_font(Box::new(WideMeasure));
    assert_eq!(nb.page(0).unwrap().tab_rect().x, 32.0);

    // Padding feeds the pseudo-tab width too, so a style change with a
    // new padding rebuilds the cache as well.
    nb.apply_style(crate::style::StyleChange {
        padding: Some(10.0),
        ..Default::default()
    });
    assert_eq!(nb.page(0).unwrap().tab_rect().x, 40.0);
}

#[test]
fn every_registered_observer_is_notified() {
    struct Register {
        events: Rc<RefCell<Vec<Event>>>,
    }
    impl NotebookObserver for Register {
        fn selection_changed(&mut self, old: Option<usize>, new: Option<usize>) {
            self.events.borrow_mut().push(Event::Selection(old, new));
        }
    }

    let (mut nb, events) = notebook_with(2);
    nb.set_selected_index(Some(1)).unwrap();
    nb.add_observer(Box::new(Register { events: events.clone() }));
    events.borrow_mut().clear();

    nb.set_selected_index(Some(0)).unwrap();
    // Both registered observers fire.
    assert_eq!(events.borrow().len(), 2);
}
