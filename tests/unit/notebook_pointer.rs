use std::cell::RefCell;
use std::rc::Rc;

use crate::notebook::layout::FixedMeasure;
use crate::notebook::{ContentId, Notebook, NotebookObserver, Page};

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Selection(Option<usize>, Option<usize>),
    Closing(usize),
    Closed(ContentId),
    Reordered(ContentId, usize, usize),
}

struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl NotebookObserver for Recorder {
    fn selection_changed(&mut self, old: Option<usize>, new: Option<usize>) {
        self.events.borrow_mut().push(Event::Selection(old, new));
    }

    fn page_closing(&mut self, index: usize) -> bool {
        self.events.borrow_mut().push(Event::Closing(index));
        false
    }

    fn page_closed(&mut self, content: ContentId) {
        self.events.borrow_mut().push(Event::Closed(content));
    }

    fn page_reordered(&mut self, content: ContentId, from: usize, to: usize) {
        self.events.borrow_mut().push(Event::Reordered(content, from, to));
    }
}

/// Three equal tabs labelled "aaaa": with the fixed 8 px advance and the
/// default 6 px padding each tab is 38 px wide, spanning 0..38, 38..76,
/// 76..114.  Strip height is 18, so y = 5 is inside every tab.
fn three_tab_notebook() -> (Notebook, Rc<RefCell<Vec<Event>>>) {
    let mut nb = Notebook::new(Box::new(FixedMeasure));
    nb.on_loaded();
    nb.on_resized(400.0, 40.0);
    for i in 0..3 {
        nb.insert_page(i, Page::new("aaaa", ContentId(i as u64)));
    }
    let events = Rc::new(RefCell::new(Vec::new()));
    nb.add_observer(Box::new(Recorder { events: events.clone() }));
    (nb, events)
}

fn click(nb: &mut Notebook, x: f32, y: f32) {
    nb.pointer_moved(x, y);
    nb.pointer_pressed();
    nb.pointer_released();
}

#[test]
fn click_selects_the_tab_under_the_pointer() {
    let (mut nb, events) = three_tab_notebook();
    click(&mut nb, 50.0, 5.0);
    assert_eq!(nb.selected_index(), Some(1));
    assert_eq!(*events.borrow(), vec![Event::Selection(Some(0), Some(1))]);
}

#[test]
fn click_outside_every_tab_changes_nothing() {
    let (mut nb, events) = three_tab_notebook();
    click(&mut nb, 200.0, 5.0);
    assert_eq!(nb.selected_index(), Some(0));
    assert!(events.borrow().is_empty());
}

#[test]
fn click_on_close_button_closes_the_page() {
    let mut nb = Notebook::new(Box::new(FixedMeasure));
    nb.on_loaded();
    nb.on_resized(400.0, 40.0);
    // 38 px of text+padding plus close diameter 9 + padding * 2 = 59 px.
    nb.insert_page(0, Page::new("aaaa", ContentId(0)).closable(true));
    nb.insert_page(1, Page::new("aaaa", ContentId(1)));
    let events = Rc::new(RefCell::new(Vec::new()));
    nb.add_observer(Box::new(Recorder { events: events.clone() }));

    let close = nb.page(0).unwrap().close_rect();
    click(&mut nb, close.center_x(), close.y + close.h / 2.0);
    assert_eq!(nb.page_count(), 1);
    assert_eq!(nb.displayed_content(), Some(ContentId(1)));
    assert_eq!(
        *events.borrow(),
        vec![
            Event::Closing(0),
            Event::Selection(Some(0), Some(0)),
            Event::Closed(ContentId(0)),
        ]
    );
}

#[test]
fn disabled_control_ignores_pointer_down() {
    let (mut nb, events) = three_tab_notebook();
    nb.set_enabled(false);
    click(&mut nb, 50.0, 5.0);
    assert_eq!(nb.selected_index(), Some(0));
    assert!(events.borrow().is_empty());
}

#[test]
fn drag_right_swaps_with_the_next_tab() {
    let (mut nb, events) = three_tab_notebook();
    nb.pointer_moved(50.0, 5.0);
    nb.pointer_pressed();
    events.borrow_mut().clear();

    // Drag begins on the first held move; anchor = 55.
    nb.pointer_moved(55.0, 5.0);
    assert!(events.borrow().is_empty(), "small drags must not reorder");

    // Offset 20: tab 1 visual span 58..96, center 77, past tab 2's
    // un-dragged left edge at 76.
    nb.pointer_moved(75.0, 5.0);
    assert_eq!(nb.selected_index(), Some(2));
    assert_eq!(nb.page(2).unwrap().content, ContentId(1));
    assert_eq!(nb.page(1).unwrap().content, ContentId(2));
    assert_eq!(*events.borrow(), vec![Event::Reordered(ContentId(1), 1, 2)]);

    nb.pointer_released();
    // Order sticks after the drag ends and tabs snap back to the grid.
    assert_eq!(nb.page(2).unwrap().tab_rect().x, 76.0);
}

#[test]
fn drag_left_swaps_with_the_previous_tab() {
    let (mut nb, events) = three_tab_notebook();
    nb.pointer_moved(50.0, 5.0);
    nb.pointer_pressed();
    events.borrow_mut().clear();

    nb.pointer_moved(49.0, 5.0);
    // Offset -21: tab 1 visual span 17..55, center 36, before tab 0's
    // right edge at 38.
    nb.pointer_moved(28.0, 5.0);
    assert_eq!(nb.selected_index(), Some(0));
    assert_eq!(*events.borrow(), vec![Event::Reordered(ContentId(1), 1, 0)]);
}

#[test]
fn oversized_neighbor_swaps_at_the_clipped_edge() {
    // Tab 0 is 38 px ("aaaa"), tab 1 is 102 px (12 chars), spanning
    // 38..140.  Dragging tab 0 right must not swap at tab 1's left edge
    // (38) but at the clipped edge 140 - 38 = 102.
    let mut nb = Notebook::new(Box::new(FixedMeasure));
    nb.on_loaded();
    nb.on_resized(400.0, 40.0);
    nb.insert_page(0, Page::new("aaaa", ContentId(0)));
    nb.insert_page(1, Page::new("aaaaaaaaaaaa", ContentId(1)));
    let events = Rc::new(RefCell::new(Vec::new()));
    nb.add_observer(Box::new(Recorder { events: events.clone() }));

    nb.pointer_moved(20.0, 5.0);
    nb.pointer_pressed();
    nb.pointer_moved(25.0, 5.0);

    // Offset 83: dragged center is 102, exactly on the clipped edge.
    nb.pointer_moved(108.0, 5.0);
    assert!(events.borrow().is_empty(), "center on the edge must not swap");
    assert_eq!(nb.selected_index(), Some(0));

    // One pixel further crosses it.
    nb.pointer_moved(109.0, 5.0);
    assert_eq!(nb.selected_index(), Some(1));
    assert_eq!(nb.page(0).unwrap().content, ContentId(1));
    assert_eq!(*events.borrow(), vec![Event::Reordered(ContentId(0), 0, 1)]);

    // The wide tab now precedes the dragged one; its clipped right edge
    // (0 + 38) is far behind the dragged center, so holding the pointer
    // here must not oscillate the pages back.
    nb.pointer_moved(110.0, 5.0);
    nb.pointer_moved(109.0, 5.0);
    assert_eq!(nb.selected_index(), Some(1));
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn reorder_can_be_disabled() {
    let (mut nb, events) = three_tab_notebook();
    nb.set_reorder_enabled(false);
    nb.pointer_moved(50.0, 5.0);
    nb.pointer_pressed();
    events.borrow_mut().clear();
    nb.pointer_moved(110.0, 5.0);
    assert_eq!(nb.selected_index(), Some(1));
    assert!(events.borrow().is_empty());
}

#[test]
fn moving_without_a_pressed_button_never_drags() {
    let (mut nb, events) = three_tab_notebook();
    nb.set_selected_index(Some(1)).unwrap();
    events.borrow_mut().clear();
    nb.pointer_moved(50.0, 5.0);
    nb.pointer_moved(110.0, 5.0);
    assert!(events.borrow().is_empty());
    assert_eq!(nb.page(1).unwrap().tab_rect().x, 38.0);
}

#[test]
fn nav_buttons_step_the_selection() {
    let (mut nb, events) = three_tab_notebook();
    nb.set_nav_buttons_enabled(true);
    nb.set_selected_index(Some(1)).unwrap();
    events.borrow_mut().clear();

    // Pseudo-tabs are 14 px each: "<" spans 0..14, ">" spans 14..28.
    click(&mut nb, 7.0, 5.0);
    assert_eq!(nb.selected_index(), Some(0));
    click(&mut nb, 21.0, 5.0);
    click(&mut nb, 21.0, 5.0);
    assert_eq!(nb.selected_index(), Some(2));
    assert_eq!(
        *events.borrow(),
        vec![
            Event::Selection(Some(1), Some(0)),
            Event::Selection(Some(0), Some(1)),
            Event::Selection(Some(1), Some(2)),
        ]
    );

    // At the last page the next button is a no-op.
    click(&mut nb, 21.0, 5.0);
    assert_eq!(nb.selected_index(), Some(2));
}

#[test]
fn nav_boundary_clicks_do_not_wrap() {
    let (mut nb, events) = three_tab_notebook();
    nb.set_nav_buttons_enabled(true);
    events.borrow_mut().clear();
    click(&mut nb, 7.0, 5.0);
    assert_eq!(nb.selected_index(), Some(0));
    assert!(events.borrow().is_empty());
}

#[test]
fn hover_stops_at_the_close_button_and_during_drags() {
    let mut nb = Notebook::new(Box::new(FixedMeasure));
    nb.on_loaded();
    nb.on_resized(400.0, 40.0);
    nb.insert_page(0, Page::new("aaaa", ContentId(0)).closable(true));
    nb.insert_page(1, Page::new("aaaa", ContentId(1)));

    let close = nb.page(0).unwrap().close_rect();
    nb.pointer_moved(2.0, 5.0);
    assert!(nb.tab_hover_active(nb.page(0).unwrap(), false));
    assert!(!nb.close_hit_active(nb.page(0).unwrap()));

    nb.pointer_moved(close.center_x(), close.y + 1.0);
    assert!(!nb.tab_hover_active(nb.page(0).unwrap(), false));
    assert!(nb.close_hit_active(nb.page(0).unwrap()));

    // Non-closable page never reports a close hit.
    nb.pointer_moved(nb.page(1).unwrap().tab_rect().center_x(), 5.0);
    assert!(!nb.close_hit_active(nb.page(1).unwrap()));
}

#[test]
fn tabs_under_the_nav_column_reject_hits() {
    let mut nb = Notebook::new(Box::new(FixedMeasure));
    nb.on_loaded();
    nb.on_resized(100.0, 40.0);
    nb.set_nav_buttons_enabled(true);
    for i in 0..3 {
        nb.insert_page(i, Page::new("aaaa", ContentId(i as u64)).closable(true));
    }
    // Scrolling the last tab into a 100 px viewport pushes earlier tabs
    // under the 28 px nav column.
    nb.set_selected_index(Some(2)).unwrap();
    assert!(nb.scroll_offset() < 0.0);

    let first = nb.page(0).unwrap().tab_rect();
    assert!(first.x < 28.0);
    nb.pointer_moved(first.x + 2.0, 5.0);
    assert!(!nb.tab_hover_active(nb.page(0).unwrap(), false));
    assert!(!nb.close_hit_active(nb.page(0).unwrap()));
}

#[test]
fn close_buttons_under_the_nav_column_cannot_be_clicked() {
    let mut nb = Notebook::new(Box::new(FixedMeasure));
    nb.on_loaded();
    nb.on_resized(100.0, 40.0);
    nb.set_nav_buttons_enabled(true);
    for i in 0..3 {
        nb.insert_page(i, Page::new("aaaa", ContentId(i as u64)).closable(true));
    }
    nb.set_selected_index(Some(2)).unwrap();
    let events = Rc::new(RefCell::new(Vec::new()));
    nb.add_observer(Box::new(Recorder { events: events.clone() }));

    // Tab 0 is scrolled left of the 28 px nav column; its close square
    // sits at negative x.
    let close = nb.page(0).unwrap().close_rect();
    assert!(close.right() < 28.0);
    nb.pointer_moved(close.center_x(), close.y + close.h / 2.0);
    assert!(close.contains(close.center_x(), close.y + close.h / 2.0));
    assert!(!nb.close_hit_active(nb.page(0).unwrap()));

    // Pressing there selects the tab instead of closing it.
    nb.pointer_pressed();
    nb.pointer_released();
    assert_eq!(nb.page_count(), 3);
    assert_eq!(nb.selected_index(), Some(0));
    assert!(
        !events.borrow().iter().any(|e| matches!(e, Event::Closing(_) | Event::Closed(_))),
        "no close notification may fire"
    );
}

#[test]
fn pointer_leave_clears_hover() {
    let (mut nb, _) = three_tab_notebook();
    nb.pointer_moved(50.0, 5.0);
    assert!(nb.tab_hover_active(nb.page(1).unwrap(), false));
    nb.pointer_left();
    assert!(!nb.tab_hover_active(nb.page(1).unwrap(), false));
}
