//! End-to-end interaction scenarios for the autocomplete widget.
//!
//! Each test drives the widget the way a host loop does: events in, frames
//! rendered with a hit grid, pointer presses broadcast through a hub, and
//! ticks with an explicit clock.

use std::cell::RefCell;
use std::rc::Rc;

use seekbox_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use seekbox_core::geometry::Rect;
use seekbox_render::frame::{Frame, HitId, HitRegion};
use seekbox_widgets::Widget;
use seekbox_widgets::autocomplete::{Autocomplete, HIT_INPUT, MouseResult};
use seekbox_widgets::options::{SelectOption, Selection};
use seekbox_widgets::pointer::{PointerDown, PointerHub};
use web_time::{Duration, Instant};

// ── Helpers ─────────────────────────────────────────────────────────────

const ID: HitId = HitId::new(7);

fn fruits() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Apple", "apple"),
        SelectOption::new("Banana", "banana"),
        SelectOption::new("Cherry", "cherry"),
        SelectOption::new("Date", "date"),
        SelectOption::new("Grape", "grape"),
    ]
}

struct Harness {
    ac: Autocomplete,
    changes: Rc<RefCell<Vec<Selection>>>,
    inputs: Rc<RefCell<Vec<String>>>,
    t0: Instant,
}

impl Harness {
    fn new(multiple: bool) -> Self {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let inputs = Rc::new(RefCell::new(Vec::new()));
        let change_sink = Rc::clone(&changes);
        let input_sink = Rc::clone(&inputs);
        let ac = Autocomplete::new(fruits(), move |s| change_sink.borrow_mut().push(s))
            .with_hit_id(ID)
            .with_multiple(multiple)
            .with_placeholder("Type to search...")
            .with_on_input_change(move |t| input_sink.borrow_mut().push(t.to_string()));
        Self {
            ac,
            changes,
            inputs,
            t0: Instant::now(),
        }
    }

    fn at(&self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }

    fn key(&mut self, code: KeyCode, ms: u64) -> bool {
        let now = self.at(ms);
        self.ac.handle_event(&Event::Key(KeyEvent::new(code)), now)
    }

    fn type_text(&mut self, text: &str, ms: u64) {
        for c in text.chars() {
            self.key(KeyCode::Char(c), ms);
        }
    }

    /// Feed the last reported selection back, as a host would.
    fn accept_change(&mut self) {
        if let Some(next) = self.changes.borrow().last().cloned() {
            self.ac.set_value(next);
        }
    }

    fn render(&self) -> Frame {
        let mut frame = Frame::with_hit_grid(30, 16);
        let area = Rect::new(0, 0, 30, self.ac.height(30));
        self.ac.render(area, &mut frame);
        self.ac.render_overlay(frame.bounds(), &mut frame);
        frame
    }

    fn click(&mut self, frame: &Frame, x: u16, y: u16, ms: u64) -> MouseResult {
        let now = self.at(ms);
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y);
        self.ac.handle_mouse(&event, frame.hit_test(x, y), now)
    }

    fn labels(&self) -> Vec<String> {
        self.ac.value().iter().map(|o| o.label.clone()).collect()
    }
}

fn find(frame: &Frame, needle: &str) -> Option<(u16, u16)> {
    (0..frame.height()).find_map(|y| {
        let row = frame.buffer.row_text(y);
        row.find(needle)
            .map(|byte| (row[..byte].chars().count() as u16, y))
    })
}

// ═════════════════════════════════════════════════════════════════════════
// Debounced input change
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn input_change_fires_once_after_quiet_period() {
    let mut h = Harness::new(false);
    h.ac.set_focused(true);
    h.type_text("a", 0);
    h.type_text("p", 100);
    h.type_text("p", 150);

    assert!(!h.ac.tick(h.at(449)));
    assert!(h.inputs.borrow().is_empty());
    assert!(h.ac.tick(h.at(450)));
    assert_eq!(h.inputs.borrow().as_slice(), ["app"]);
    assert!(!h.ac.tick(h.at(2000)));
    assert_eq!(h.inputs.borrow().len(), 1);
}

#[test]
fn no_notification_without_edits() {
    let mut h = Harness::new(false);
    h.ac.set_focused(true);
    h.key(KeyCode::Down, 0);
    assert!(!h.ac.tick(h.at(1000)));
    assert!(h.inputs.borrow().is_empty());
}

#[test]
fn single_activation_reports_label_as_input() {
    let mut h = Harness::new(false);
    h.ac.set_focused(true);
    h.key(KeyCode::Enter, 0);
    h.ac.tick(h.at(300));
    assert_eq!(h.inputs.borrow().as_slice(), ["Apple"]);
}

#[test]
fn reselecting_the_same_label_does_not_notify_again() {
    let mut h = Harness::new(false);
    h.ac.set_focused(true);
    h.key(KeyCode::Enter, 0);
    h.ac.tick(h.at(300));
    assert_eq!(h.inputs.borrow().as_slice(), ["Apple"]);
    h.accept_change();

    h.ac.open();
    assert!(h.key(KeyCode::Enter, 400));
    assert_eq!(h.changes.borrow().len(), 2);
    assert!(!h.ac.has_pending_input_change());
    assert!(!h.ac.tick(h.at(2000)));
    assert_eq!(h.inputs.borrow().len(), 1);
}

// ═════════════════════════════════════════════════════════════════════════
// Keyboard selection
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn typing_filters_and_enter_selects() {
    let mut h = Harness::new(false);
    h.ac.set_focused(true);
    h.type_text("an", 0);
    let labels: Vec<_> = h.ac.filtered().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["Banana"]);

    assert!(h.key(KeyCode::Enter, 10));
    assert_eq!(
        h.changes.borrow().as_slice(),
        [Selection::Single(Some(SelectOption::new("Banana", "banana")))]
    );
    assert_eq!(h.ac.input_value(), "Banana");
    assert!(!h.ac.is_open());
}

#[test]
fn filtering_is_case_insensitive() {
    let mut h = Harness::new(false);
    h.ac.set_focused(true);
    h.type_text("GRA", 0);
    let labels: Vec<_> = h.ac.filtered().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["Grape"]);
}

#[test]
fn arrow_down_cycles_through_full_list() {
    let mut h = Harness::new(false);
    h.ac.set_focused(true);
    let len = h.ac.filtered().len();
    for _ in 0..len {
        h.key(KeyCode::Down, 0);
    }
    assert_eq!(h.ac.highlighted(), Some(0));
}

#[test]
fn reopen_after_escape_by_typing() {
    let mut h = Harness::new(false);
    h.ac.set_focused(true);
    h.key(KeyCode::Escape, 0);
    assert!(!h.ac.is_open());
    h.type_text("c", 5);
    assert!(h.ac.is_open());
}

#[test]
fn custom_filter_replaces_label_match() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let mut ac = Autocomplete::new(fruits(), move |s| sink.borrow_mut().push(s))
        .with_filter(|option, input| option.value.starts_with(input));
    ac.set_focused(true);
    let now = Instant::now();
    ac.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char('d'))), now);
    let labels: Vec<_> = ac.filtered().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["Date"]);
}

// ═════════════════════════════════════════════════════════════════════════
// Mouse selection and chips
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn clicking_input_opens() {
    let mut h = Harness::new(false);
    let frame = h.render();
    let (x, y) = find(&frame, "Type to search").unwrap();
    assert_eq!(frame.hit_test(x, y), Some((ID, HitRegion::Content, HIT_INPUT)));
    assert_eq!(h.click(&frame, x, y, 0), MouseResult::Opened);
    assert!(h.ac.is_open());
    assert!(h.ac.focused());
}

#[test]
fn multi_select_toggles_and_stays_open() {
    let mut h = Harness::new(true);
    h.ac.set_focused(true);

    let frame = h.render();
    let (x, y) = find(&frame, "Apple").unwrap();
    assert_eq!(h.click(&frame, x, y, 0), MouseResult::Activated(0));
    h.accept_change();
    assert!(h.ac.is_open());

    let frame = h.render();
    let (x, y) = find(&frame, "│Banana").unwrap();
    assert!(matches!(h.click(&frame, x + 1, y, 10), MouseResult::Activated(1)));
    h.accept_change();

    let frame = h.render();
    let (x, y) = find(&frame, "│Apple").unwrap();
    assert_eq!(h.click(&frame, x + 1, y, 20), MouseResult::Activated(0));
    h.accept_change();

    assert_eq!(h.labels(), ["Banana"]);
    assert_eq!(h.changes.borrow().len(), 3);
    assert!(h.ac.is_open());
    assert_eq!(h.ac.input_value(), "");
}

#[test]
fn editing_in_multi_mode_keeps_selection() {
    let mut h = Harness::new(true);
    h.ac.set_value(Selection::Multiple(vec![SelectOption::new("Apple", "apple")]));
    h.ac.set_focused(true);

    h.type_text("ch", 0);
    let labels: Vec<_> = h.ac.filtered().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["Cherry"]);
    h.key(KeyCode::Backspace, 10);
    assert_eq!(h.ac.input_value(), "c");

    assert!(h.changes.borrow().is_empty());
    assert_eq!(h.labels(), ["Apple"]);
    // The open list covers the chip row.
    h.key(KeyCode::Escape, 20);
    let frame = h.render();
    assert!(find(&frame, " Apple ×").is_some());
}

#[test]
fn chip_dismiss_deselects() {
    let mut h = Harness::new(true);
    h.ac.set_value(Selection::Multiple(vec![
        SelectOption::new("Apple", "apple"),
        SelectOption::new("Banana", "banana"),
    ]));
    let frame = h.render();
    let (bx, by) = find(&frame, " Banana ×").unwrap();
    // Chip body does nothing.
    assert_eq!(h.click(&frame, bx + 1, by, 0), MouseResult::Ignored);
    let dismiss = bx + " Banana ".chars().count() as u16;
    assert_eq!(frame.hit_test(dismiss, by), Some((ID, HitRegion::Button, 1)));
    assert_eq!(h.click(&frame, dismiss, by, 0), MouseResult::Dismissed(1));
    h.accept_change();
    assert_eq!(h.labels(), ["Apple"]);
}

#[test]
fn hover_moves_highlight() {
    let mut h = Harness::new(false);
    h.ac.set_focused(true);
    let frame = h.render();
    let (x, y) = find(&frame, "│Cherry").unwrap();
    let event = MouseEvent::new(MouseEventKind::Moved, x + 1, y);
    assert_eq!(
        h.ac.handle_mouse(&event, frame.hit_test(x + 1, y), h.at(0)),
        MouseResult::HoverChanged
    );
    assert_eq!(h.ac.highlighted(), Some(2));
}

#[test]
fn wheel_over_list_moves_highlight() {
    let mut h = Harness::new(false);
    h.ac.set_focused(true);
    let frame = h.render();
    let (x, y) = find(&frame, "│Apple").unwrap();
    let event = MouseEvent::new(MouseEventKind::ScrollUp, x + 1, y);
    assert_eq!(
        h.ac.handle_mouse(&event, frame.hit_test(x + 1, y), h.at(0)),
        MouseResult::Scrolled
    );
    assert_eq!(h.ac.highlighted(), Some(4));
}

// ═════════════════════════════════════════════════════════════════════════
// Outside press and lifecycle
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn outside_press_closes_inside_press_does_not() {
    let hub = PointerHub::new();
    let mut h = Harness::new(false);
    h.ac.mount(&hub);
    h.ac.set_focused(true);

    hub.dispatch(PointerDown::new(2, 5, Some((ID, HitRegion::Item, 0))));
    h.ac.tick(h.at(0));
    assert!(h.ac.is_open());

    hub.dispatch(PointerDown::new(29, 15, None));
    assert!(h.ac.tick(h.at(1)));
    assert!(!h.ac.is_open());
}

#[test]
fn press_on_other_widget_counts_as_outside() {
    let hub = PointerHub::new();
    let mut h = Harness::new(false);
    h.ac.mount(&hub);
    h.ac.set_focused(true);
    hub.dispatch(PointerDown::new(0, 0, Some((HitId::new(99), HitRegion::Content, 0))));
    h.ac.tick(h.at(0));
    assert!(!h.ac.is_open());
}

#[test]
fn press_while_closed_does_not_close_a_later_open() {
    let hub = PointerHub::new();
    let mut h = Harness::new(false);
    h.ac.mount(&hub);
    hub.dispatch(PointerDown::new(0, 0, Some((HitId::new(99), HitRegion::Content, 0))));
    assert!(!h.ac.is_open());

    h.ac.set_focused(true);
    assert!(h.ac.is_open());
    assert!(!h.ac.tick(h.at(0)));
    assert!(h.ac.is_open());

    hub.dispatch(PointerDown::new(29, 15, None));
    assert!(h.ac.tick(h.at(1)));
    assert!(!h.ac.is_open());
}

#[test]
fn unmount_releases_listener_and_timer() {
    let hub = PointerHub::new();
    let mut h = Harness::new(false);
    h.ac.mount(&hub);
    assert_eq!(hub.listener_count(), 1);
    h.ac.set_focused(true);
    h.type_text("ch", 0);
    assert!(h.ac.has_pending_input_change());

    h.ac.unmount();
    assert_eq!(hub.listener_count(), 0);
    assert!(!h.ac.has_pending_input_change());
    assert!(!h.ac.tick(h.at(5000)));
    assert!(h.inputs.borrow().is_empty());
}

#[test]
fn drop_releases_listener() {
    let hub = PointerHub::new();
    let mut h = Harness::new(false);
    h.ac.mount(&hub);
    drop(h);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn two_instances_close_independently() {
    let hub = PointerHub::new();
    let mut first = Harness::new(false);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let mut second = Autocomplete::new(fruits(), move |s| sink.borrow_mut().push(s))
        .with_hit_id(HitId::new(8))
        .with_multiple(true);
    first.ac.mount(&hub);
    second.mount(&hub);
    first.ac.set_focused(true);
    second.set_focused(true);

    hub.dispatch(PointerDown::new(1, 1, Some((HitId::new(8), HitRegion::Content, HIT_INPUT))));
    first.ac.tick(first.at(0));
    second.tick(first.at(0));
    assert!(!first.ac.is_open());
    assert!(second.is_open());
}

// ═════════════════════════════════════════════════════════════════════════
// Disabled
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn disabled_ignores_input_and_shows_loading() {
    let mut h = Harness::new(false);
    h.ac.set_disabled(true);
    let frame = h.render();
    let (x, y) = find(&frame, "Loading...").unwrap();
    assert_eq!(h.click(&frame, x, y, 0), MouseResult::Ignored);
    assert!(!h.ac.is_open());
    h.ac.set_focused(true);
    assert!(!h.key(KeyCode::Char('a'), 0));
    assert_eq!(h.ac.input_value(), "");
    assert!(h.changes.borrow().is_empty());
}

// ═════════════════════════════════════════════════════════════════════════
// Tracing
// ═════════════════════════════════════════════════════════════════════════

#[cfg(feature = "tracing")]
mod tracing_capture {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt};

    #[derive(Default)]
    struct MessageVisitor(Option<String>);

    impl Visit for MessageVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.0 = Some(value.to_string());
            }
        }

        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" && self.0.is_none() {
                self.0 = Some(format!("{value:?}").trim_matches('"').to_string());
            }
        }
    }

    struct CaptureLayer {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLayer {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            if let Some(message) = visitor.0 {
                self.messages.lock().unwrap().push(message);
            }
        }
    }

    #[test]
    fn selection_and_visibility_events_are_logged() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(CaptureLayer {
            messages: Arc::clone(&messages),
        });

        tracing::subscriber::with_default(subscriber, || {
            let mut h = Harness::new(false);
            h.ac.set_focused(true);
            h.key(KeyCode::Enter, 0);
        });

        let messages = messages.lock().unwrap();
        assert!(messages.iter().any(|m| m == "autocomplete.open"));
        assert!(messages.iter().any(|m| m == "autocomplete.selection"));
        assert!(messages.iter().any(|m| m == "autocomplete.close"));
    }
}
