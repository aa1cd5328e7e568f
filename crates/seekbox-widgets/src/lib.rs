#![forbid(unsafe_code)]

//! Widgets for seekbox.
//!
//! The centerpiece is [`autocomplete::Autocomplete`], a searchable selection
//! input. It is assembled from smaller pieces that are usable on their own:
//!
//! - [`options`]: option filtering and the selection value type.
//! - [`input::TextInput`]: single-line, grapheme-aware text editing.
//! - [`popover::Popover`]: anchored floating placement with flip and shift.
//! - [`debounce::Debouncer`]: deadline-based quiet-period notification.
//! - [`pointer::PointerHub`]: screen-wide pointer-down broadcast.
//! - [`config::AutocompleteConfig`]: tunables with env overrides.

pub mod autocomplete;
pub mod config;
pub mod debounce;
pub mod input;
pub mod options;
pub mod pointer;
pub mod popover;

use seekbox_core::geometry::Rect;
use seekbox_render::cell::Cell;
use seekbox_render::frame::Frame;
use seekbox_render::style::Style;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Frame` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Fill `area` with blanks carrying `style`.
pub(crate) fn clear_area(frame: &mut Frame, area: Rect, style: Style) {
    let mut blank = Cell::default();
    style.apply_to(&mut blank);
    frame.buffer.fill(area, &blank);
}

/// Draw single-row text clipped to `area`. Returns the column after the text.
pub(crate) fn draw_text(frame: &mut Frame, area: Rect, text: &str, style: Style) -> u16 {
    if area.is_empty() {
        return area.x;
    }
    frame
        .buffer
        .set_string(area.x, area.y, text, style, area.right())
}

/// Draw a single-line box border around `area`.
pub(crate) fn draw_border(frame: &mut Frame, area: Rect, style: Style) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let (x, y) = (area.x, area.y);
    let (right, bottom) = (area.right() - 1, area.bottom() - 1);
    let mut put = |cx: u16, cy: u16, ch: char| {
        let mut cell = Cell::from_char(ch);
        style.apply_to(&mut cell);
        frame.buffer.set(cx, cy, cell);
    };

    put(x, y, '┌');
    put(right, y, '┐');
    put(x, bottom, '└');
    put(right, bottom, '┘');
    for col in (x + 1)..right {
        put(col, y, '─');
        put(col, bottom, '─');
    }
    for row in (y + 1)..bottom {
        put(x, row, '│');
        put(right, row, '│');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_draws_corners() {
        let mut frame = Frame::new(4, 3);
        draw_border(&mut frame, Rect::new(0, 0, 4, 3), Style::new());
        assert_eq!(frame.buffer.row_text(0), "┌──┐");
        assert_eq!(frame.buffer.row_text(1), "│  │");
        assert_eq!(frame.buffer.row_text(2), "└──┘");
    }

    #[test]
    fn draw_text_clips_to_area() {
        let mut frame = Frame::new(10, 1);
        let end = draw_text(&mut frame, Rect::new(2, 0, 3, 1), "Cherry", Style::new());
        assert_eq!(end, 5);
        assert_eq!(frame.buffer.row_text(0), "  Che     ");
    }

    #[test]
    fn clear_area_applies_style() {
        use seekbox_render::cell::PackedRgba;
        let mut frame = Frame::new(2, 1);
        clear_area(&mut frame, Rect::new(0, 0, 2, 1), Style::new().bg(PackedRgba::BLACK));
        assert_eq!(frame.buffer.get(1, 0).map(|c| c.bg), Some(PackedRgba::BLACK));
    }
}
