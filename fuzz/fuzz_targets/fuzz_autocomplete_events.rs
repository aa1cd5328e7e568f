#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use seekbox_core::event::{
    Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind, PasteEvent,
};
use seekbox_render::frame::{Frame, HitId};
use seekbox_widgets::Widget;
use seekbox_widgets::autocomplete::Autocomplete;
use seekbox_widgets::options::SelectOption;
use seekbox_widgets::pointer::{PointerDown, PointerHub};
use web_time::{Duration, Instant};

const WIDTH: u16 = 40;
const HEIGHT: u16 = 20;

#[derive(Debug, Arbitrary)]
enum Step {
    Key(u8, bool),
    Char(char),
    Paste(String),
    Click(u8, u8),
    Hover(u8, u8),
    Scroll(u8, u8, bool),
    Advance(u16),
    Disable(bool),
    Focus(bool),
}

fn key_code(n: u8) -> KeyCode {
    match n % 10 {
        0 => KeyCode::Up,
        1 => KeyCode::Down,
        2 => KeyCode::Enter,
        3 => KeyCode::Escape,
        4 => KeyCode::Backspace,
        5 => KeyCode::Delete,
        6 => KeyCode::Left,
        7 => KeyCode::Right,
        8 => KeyCode::Home,
        _ => KeyCode::End,
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let multiple = bool::arbitrary(&mut u).unwrap_or(false);
    let Ok(steps) = Vec::<Step>::arbitrary(&mut u) else {
        return;
    };

    let options = ["Apple", "Banana", "Cherry", "Date", "Grape", "Kiwi", "Lime"]
        .iter()
        .map(|label| SelectOption::new(*label, label.to_lowercase()))
        .collect::<Vec<_>>();
    let hub = PointerHub::new();
    let mut ac = Autocomplete::new(options, |_| {})
        .with_hit_id(HitId::new(1))
        .with_multiple(multiple)
        .with_on_input_change(|_| {});
    ac.mount(&hub);

    let mut now = Instant::now();
    let mut frame = Frame::with_hit_grid(WIDTH, HEIGHT);

    for step in steps.into_iter().take(256) {
        frame.clear();
        ac.render(frame.bounds().inset(1), &mut frame);
        ac.render_overlay(frame.bounds(), &mut frame);

        match step {
            Step::Key(n, ctrl) => {
                let modifiers = if ctrl { Modifiers::CTRL } else { Modifiers::NONE };
                let event = Event::Key(KeyEvent::new(key_code(n)).with_modifiers(modifiers));
                ac.handle_event(&event, now);
            }
            Step::Char(c) => {
                ac.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(c))), now);
            }
            Step::Paste(text) => {
                ac.handle_event(&Event::Paste(PasteEvent::bracketed(text)), now);
            }
            Step::Click(x, y) => {
                let (x, y) = (u16::from(x) % WIDTH, u16::from(y) % HEIGHT);
                let hit = frame.hit_test(x, y);
                hub.dispatch(PointerDown::new(x, y, hit));
                let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y);
                ac.handle_mouse(&event, hit, now);
            }
            Step::Hover(x, y) => {
                let (x, y) = (u16::from(x) % WIDTH, u16::from(y) % HEIGHT);
                let event = MouseEvent::new(MouseEventKind::Moved, x, y);
                ac.handle_mouse(&event, frame.hit_test(x, y), now);
            }
            Step::Scroll(x, y, down) => {
                let (x, y) = (u16::from(x) % WIDTH, u16::from(y) % HEIGHT);
                let kind = if down {
                    MouseEventKind::ScrollDown
                } else {
                    MouseEventKind::ScrollUp
                };
                ac.handle_mouse(&MouseEvent::new(kind, x, y), frame.hit_test(x, y), now);
            }
            Step::Advance(ms) => {
                now += Duration::from_millis(u64::from(ms));
                ac.tick(now);
            }
            Step::Disable(disabled) => ac.set_disabled(disabled),
            Step::Focus(focused) => ac.set_focused(focused),
        }

        // Invariants that hold after every step.
        let len = ac.filtered().len();
        match ac.highlighted() {
            Some(i) => assert!(i < len),
            None => assert_eq!(len, 0),
        }
        if ac.is_disabled() {
            assert!(!ac.is_open());
        }
        assert!(ac.value().len() <= 7);
    }

    ac.unmount();
    assert_eq!(hub.listener_count(), 0);
    assert!(!ac.has_pending_input_change());
});
