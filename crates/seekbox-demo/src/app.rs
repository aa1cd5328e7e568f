#![forbid(unsafe_code)]

//! Demo model: two fruit pickers and a status area.
//!
//! Widget callbacks cannot borrow the model, so they post [`Msg`]s into a
//! channel that [`App`] drains after every event and tick.

use std::sync::mpsc::{self, Receiver, Sender};

use seekbox::prelude::*;
use seekbox::{MouseButton, MouseEventKind, MouseResult};
use web_time::Instant;

/// Hit ID of the single-select picker.
pub const SINGLE_ID: HitId = HitId::new(1);
/// Hit ID of the multi-select picker.
pub const MULTI_ID: HitId = HitId::new(2);

const PICKER_WIDTH: u16 = 32;
const LEFT_MARGIN: u16 = 2;

/// The five demo fruits.
pub fn fruit_options() -> Vec<SelectOption> {
    [
        ("Apple", "apple"),
        ("Banana", "banana"),
        ("Cherry", "cherry"),
        ("Date", "date"),
        ("Grape", "grape"),
    ]
    .into_iter()
    .map(|(label, value)| SelectOption::new(label, value))
    .collect()
}

/// Messages posted by widget callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A picker reported a new selection.
    Changed(usize, Selection),
    /// A picker reported debounced input text.
    Searched(usize, String),
}

/// Top-level demo state.
pub struct App {
    pickers: [Autocomplete; 2],
    focus: Option<usize>,
    hub: PointerHub,
    rx: Receiver<Msg>,
    last_search: Option<(usize, String)>,
    quit: bool,
}

fn picker(index: usize, tx: &Sender<Msg>, config: AutocompleteConfig) -> Autocomplete {
    let change_tx = tx.clone();
    let search_tx = tx.clone();
    Autocomplete::new(fruit_options(), move |selection| {
        let _ = change_tx.send(Msg::Changed(index, selection));
    })
    .with_config(config)
    .with_placeholder("Type to search...")
    .with_on_input_change(move |text| {
        let _ = search_tx.send(Msg::Searched(index, text.to_string()));
    })
}

fn describe(selection: &Selection) -> String {
    if selection.is_empty() {
        return "none".to_string();
    }
    selection
        .iter()
        .map(|o| o.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl App {
    /// Build both pickers and attach them to a fresh pointer hub.
    pub fn new(config: AutocompleteConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let hub = PointerHub::new();

        let mut single = picker(0, &tx, config.clone())
            .with_hit_id(SINGLE_ID)
            .with_label("Select a fruit");
        let mut multi = picker(1, &tx, config)
            .with_hit_id(MULTI_ID)
            .with_multiple(true)
            .with_label("Select multiple fruits");
        single.mount(&hub);
        multi.mount(&hub);

        Self {
            pickers: [single, multi],
            focus: None,
            hub,
            rx,
            last_search: None,
            quit: false,
        }
    }

    /// Picker at `index` (0 = single, 1 = multiple).
    pub fn picker(&self, index: usize) -> &Autocomplete {
        &self.pickers[index]
    }

    /// Focused picker, if any.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Most recent debounced search, with the picker it came from.
    pub fn last_search(&self) -> Option<(usize, &str)> {
        self.last_search.as_ref().map(|(i, s)| (*i, s.as_str()))
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one message.
    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Changed(index, selection) => {
                tracing::info!(picker = index, selected = %describe(&selection), "selection changed");
                self.pickers[index].set_value(selection);
            }
            Msg::Searched(index, text) => {
                tracing::debug!(picker = index, query = %text, "search");
                self.last_search = Some((index, text));
            }
        }
    }

    fn drain(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.update(msg);
        }
    }

    fn set_focus(&mut self, focus: Option<usize>) {
        if let Some(prev) = self.focus.filter(|&p| Some(p) != focus) {
            self.pickers[prev].set_focused(false);
            self.pickers[prev].close();
        }
        self.focus = focus;
        if let Some(next) = focus {
            self.pickers[next].set_focused(true);
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let len = self.pickers.len();
        let next = match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.set_focus(Some(next));
    }

    /// Route one terminal event. `frame` is the last rendered frame, used for
    /// hit testing.
    pub fn handle_event(&mut self, event: &Event, frame: &Frame, now: Instant) {
        match event {
            Event::Key(key)
                if key.is_actionable()
                    && key.ctrl()
                    && matches!(key.code, KeyCode::Char('c' | 'q')) =>
            {
                self.quit = true;
            }
            Event::Key(key) if key.is_actionable() && key.code == KeyCode::Tab => {
                self.cycle_focus(true);
            }
            Event::Key(key) if key.is_actionable() && key.code == KeyCode::BackTab => {
                self.cycle_focus(false);
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse, frame, now),
            _ => {
                if let Some(index) = self.focus {
                    self.pickers[index].handle_event(event, now);
                }
            }
        }
        self.drain();
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, frame: &Frame, now: Instant) {
        let hit = frame.hit_test(mouse.x, mouse.y);
        if mouse.is_down() {
            self.hub.dispatch(PointerDown::new(mouse.x, mouse.y, hit));
        }

        let target = hit.and_then(|(id, _, _)| self.pickers.iter().position(|p| p.id() == id));
        match target {
            Some(index) => {
                if self.pickers[index].handle_mouse(mouse, hit, now) == MouseResult::Opened {
                    self.set_focus(Some(index));
                }
            }
            None if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                self.set_focus(None);
            }
            None => {}
        }

        // Let every picker see the broadcast press now rather than next tick.
        for picker in &mut self.pickers {
            picker.poll_pointer();
        }
    }

    /// Advance timers. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for picker in &mut self.pickers {
            changed |= picker.tick(now);
        }
        self.drain();
        changed
    }

    /// Draw everything. Open lists are drawn last, the focused one on top.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.bounds();
        let title = "seekbox demo   Tab: switch   Ctrl+C: quit";
        frame
            .buffer
            .set_string(LEFT_MARGIN, 0, title, Style::new().bold(), area.right());

        // Two columns, so one picker's list never covers the other's input.
        let width = PICKER_WIDTH.min(area.width.saturating_sub(LEFT_MARGIN * 3) / 2);
        let mut bottom = 2;
        for (column, picker) in self.pickers.iter().enumerate() {
            let x = LEFT_MARGIN + (width + LEFT_MARGIN) * column as u16;
            let height = picker.height(width);
            picker.render(Rect::new(x, 2, width, height).intersection(&area), frame);
            bottom = bottom.max(2 + height);
        }
        let y = bottom.saturating_add(1);

        let status = [
            format!("Selected fruit: {}", describe(self.pickers[0].value())),
            format!("Selected fruits: {}", describe(self.pickers[1].value())),
            match &self.last_search {
                Some((_, text)) => format!("Last search: {text:?}"),
                None => "Last search: -".to_string(),
            },
        ];
        let dim = Style::new().dim();
        for (row, line) in status.iter().enumerate() {
            let sy = y.saturating_add(row as u16);
            if sy >= area.bottom() {
                break;
            }
            frame.buffer.set_string(LEFT_MARGIN, sy, line, dim, area.right());
        }

        let order: Vec<usize> = match self.focus {
            Some(f) => (0..self.pickers.len())
                .filter(|&i| i != f)
                .chain(std::iter::once(f))
                .collect(),
            None => (0..self.pickers.len()).collect(),
        };
        for index in order {
            self.pickers[index].render_overlay(area, frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekbox::{KeyEvent, Modifiers};
    use web_time::Duration;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn render(app: &App) -> Frame {
        let mut frame = Frame::with_hit_grid(80, 30);
        app.view(&mut frame);
        frame
    }

    fn find(frame: &Frame, needle: &str) -> Option<(u16, u16)> {
        (0..frame.height()).find_map(|y| {
            let row = frame.buffer.row_text(y);
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u16, y))
        })
    }

    fn click(app: &mut App, frame: &Frame, x: u16, y: u16, now: Instant) {
        let down = Event::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            x,
            y,
        ));
        app.handle_event(&down, frame, now);
    }

    #[test]
    fn starts_unfocused_and_closed() {
        let app = App::new(AutocompleteConfig::default());
        assert_eq!(app.focus(), None);
        assert!(!app.picker(0).is_open());
        assert!(!app.picker(1).is_open());
        let frame = render(&app);
        assert!(find(&frame, "Select a fruit").is_some());
        assert!(find(&frame, "Select multiple fruits").is_some());
    }

    #[test]
    fn tab_cycles_focus_and_closes_previous() {
        let mut app = App::new(AutocompleteConfig::default());
        let frame = render(&app);
        let now = Instant::now();
        app.handle_event(&key(KeyCode::Tab), &frame, now);
        assert_eq!(app.focus(), Some(0));
        assert!(app.picker(0).is_open());
        app.handle_event(&key(KeyCode::Tab), &frame, now);
        assert_eq!(app.focus(), Some(1));
        assert!(!app.picker(0).is_open());
        assert!(app.picker(1).is_open());
        app.handle_event(&key(KeyCode::BackTab), &frame, now);
        assert_eq!(app.focus(), Some(0));
    }

    #[test]
    fn single_pick_by_keyboard_updates_status() {
        let mut app = App::new(AutocompleteConfig::default());
        let t0 = Instant::now();
        let frame = render(&app);
        app.handle_event(&key(KeyCode::Tab), &frame, t0);
        app.handle_event(&key(KeyCode::Char('a')), &frame, t0);
        app.handle_event(&key(KeyCode::Char('n')), &frame, t0);
        app.handle_event(&key(KeyCode::Enter), &frame, t0);
        assert_eq!(app.picker(0).value().single().map(|o| o.label.as_str()), Some("Banana"));

        app.tick(t0 + Duration::from_millis(300));
        assert_eq!(app.last_search(), Some((0, "Banana")));
        let frame = render(&app);
        assert!(find(&frame, "Selected fruit: Banana").is_some());
    }

    #[test]
    fn clicking_second_picker_closes_first() {
        let mut app = App::new(AutocompleteConfig::default());
        let now = Instant::now();
        let frame = render(&app);
        app.handle_event(&key(KeyCode::Tab), &frame, now);
        assert!(app.picker(0).is_open());

        let frame = render(&app);
        let (_, y) = find(&frame, "│Type to search").unwrap();
        let row = frame.buffer.row_text(y);
        let x = row[..row.rfind("│Type to search").unwrap()].chars().count() as u16 + 1;
        assert_eq!(frame.hit_test(x, y).map(|h| h.0), Some(MULTI_ID));
        click(&mut app, &frame, x, y, now);
        assert_eq!(app.focus(), Some(1));
        assert!(!app.picker(0).is_open());
        assert!(app.picker(1).is_open());
    }

    #[test]
    fn multi_pick_by_mouse_and_dismiss_chip() {
        let mut app = App::new(AutocompleteConfig::default());
        let now = Instant::now();
        let frame = render(&app);
        app.handle_event(&key(KeyCode::Tab), &frame, now);
        app.handle_event(&key(KeyCode::Tab), &frame, now);

        let frame = render(&app);
        let (x, y) = find(&frame, "│Cherry").unwrap();
        click(&mut app, &frame, x + 1, y, now);
        let frame = render(&app);
        let (x, y) = find(&frame, "│Apple").unwrap();
        click(&mut app, &frame, x + 1, y, now);
        assert!(app.picker(1).is_open());
        let labels: Vec<_> = app.picker(1).value().iter().map(|o| o.label.clone()).collect();
        assert_eq!(labels, ["Cherry", "Apple"]);

        // Close the list so the chips are visible, then dismiss Cherry.
        app.handle_event(&key(KeyCode::Escape), &frame, now);
        let frame = render(&app);
        let (cx, cy) = find(&frame, " Cherry ×").unwrap();
        click(&mut app, &frame, cx + " Cherry ".chars().count() as u16, cy, now);
        let labels: Vec<_> = app.picker(1).value().iter().map(|o| o.label.clone()).collect();
        assert_eq!(labels, ["Apple"]);
    }

    #[test]
    fn click_on_empty_space_blurs_and_closes() {
        let mut app = App::new(AutocompleteConfig::default());
        let now = Instant::now();
        let frame = render(&app);
        app.handle_event(&key(KeyCode::Tab), &frame, now);
        let frame = render(&app);
        click(&mut app, &frame, 79, 29, now);
        assert_eq!(app.focus(), None);
        assert!(!app.picker(0).is_open());
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = App::new(AutocompleteConfig::default());
        let frame = render(&app);
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL));
        app.handle_event(&event, &frame, Instant::now());
        assert!(app.should_quit());
    }
}
