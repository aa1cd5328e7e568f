#![forbid(unsafe_code)]

//! Single-line text input.
//!
//! [`TextInput`] stores its value as a `String` and its cursor as a grapheme
//! index, so combining sequences and wide characters move and delete as one
//! unit. Rendering scrolls horizontally to keep the cursor in view.

use seekbox_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use seekbox_core::geometry::Rect;
use seekbox_core::text_width::grapheme_width;
use seekbox_render::cell::StyleFlags;
use seekbox_render::frame::Frame;
use seekbox_render::style::Style;
use unicode_segmentation::UnicodeSegmentation;

use crate::Widget;

/// A single-line text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Horizontal scroll offset in cells, updated during render.
    scroll_cells: std::cell::Cell<usize>,
    placeholder: String,
    style: Style,
    placeholder_style: Style,
    /// Controls cursor output.
    focused: bool,
}

impl TextInput {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value (builder). Cursor moves to the end.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Set the placeholder (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the text style (builder).
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the placeholder style (builder).
    #[must_use]
    pub fn with_placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Set focus (builder).
    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value; the cursor moves to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = sanitize(&value.into());
        self.cursor = self.grapheme_count();
    }

    /// Clear the value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.scroll_cells.set(0);
    }

    /// Cursor position as a grapheme index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current placeholder.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Replace the placeholder.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Whether the input has focus.
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Set focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Screen position of the cursor when rendered into `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let visual = self.cursor_visual_pos();
        let scroll = self.scroll_cells.get();
        let rel = visual.saturating_sub(scroll);
        let max_rel = usize::from(area.width.saturating_sub(1));
        (area.x.saturating_add(rel.min(max_rel) as u16), area.y)
    }

    /// Handle a key or paste event.
    ///
    /// Returns `true` if the value or cursor changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let changed = match event {
            Event::Key(key) if key.is_actionable() => self.handle_key(key),
            Event::Paste(paste) => {
                let before = self.value.len();
                self.insert_text(&paste.text);
                self.value.len() != before
            }
            _ => false,
        };

        #[cfg(feature = "tracing")]
        if changed {
            tracing::trace!(
                cursor = self.cursor,
                graphemes = self.grapheme_count(),
                "input edited"
            );
        }

        changed
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(Modifiers::CTRL);
        let before = (self.value.len(), self.cursor);

        match key.code {
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char('u') if ctrl => {
                let end = self.grapheme_byte_offset(self.cursor);
                self.value.drain(..end);
                self.cursor = 0;
            }
            KeyCode::Char(c) if !ctrl => self.insert_char(c),
            KeyCode::Backspace if ctrl => self.delete_word_back(),
            KeyCode::Backspace => self.delete_char_back(),
            KeyCode::Delete => self.delete_char_forward(),
            KeyCode::Left if ctrl => self.move_cursor_word_left(),
            KeyCode::Right if ctrl => self.move_cursor_word_right(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.grapheme_count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.grapheme_count(),
            _ => return false,
        }

        (self.value.len(), self.cursor) != before
    }

    /// Insert text at the cursor. Line breaks and tabs become spaces; other
    /// control characters are dropped.
    pub fn insert_text(&mut self, text: &str) {
        let clean = sanitize(text);
        if clean.is_empty() {
            return;
        }
        let old_count = self.grapheme_count();
        let offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert_str(offset, &clean);
        let added = self.grapheme_count().saturating_sub(old_count);
        self.cursor = (self.cursor + added).min(self.grapheme_count());
    }

    fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let old_count = self.grapheme_count();
        let offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert(offset, c);
        // A combining mark merges into the previous grapheme.
        if self.grapheme_count() > old_count {
            self.cursor += 1;
        }
    }

    fn delete_char_back(&mut self) {
        if self.cursor > 0 {
            let start = self.grapheme_byte_offset(self.cursor - 1);
            let end = self.grapheme_byte_offset(self.cursor);
            self.value.drain(start..end);
            self.cursor -= 1;
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor < self.grapheme_count() {
            let start = self.grapheme_byte_offset(self.cursor);
            let end = self.grapheme_byte_offset(self.cursor + 1);
            self.value.drain(start..end);
        }
    }

    fn delete_word_back(&mut self) {
        let old = self.cursor;
        self.move_cursor_word_left();
        if self.cursor < old {
            let start = self.grapheme_byte_offset(self.cursor);
            let end = self.grapheme_byte_offset(old);
            self.value.drain(start..end);
        }
    }

    fn move_cursor_word_left(&mut self) {
        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let mut pos = self.cursor.min(graphemes.len());
        while pos > 0 && !is_word(graphemes[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word(graphemes[pos - 1]) {
            pos -= 1;
        }
        self.cursor = pos;
    }

    fn move_cursor_word_right(&mut self) {
        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let max = graphemes.len();
        let mut pos = self.cursor.min(max);
        while pos < max && is_word(graphemes[pos]) {
            pos += 1;
        }
        while pos < max && !is_word(graphemes[pos]) {
            pos += 1;
        }
        self.cursor = pos;
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn cursor_visual_pos(&self) -> usize {
        self.value
            .graphemes(true)
            .take(self.cursor)
            .map(grapheme_width)
            .sum()
    }

    /// Adjust the scroll offset so the cursor cell is visible.
    fn effective_scroll(&self, viewport_width: usize) -> usize {
        let cursor = self.cursor_visual_pos();
        let mut scroll = self.scroll_cells.get();
        if cursor < scroll {
            scroll = cursor;
        }
        if viewport_width > 0 && cursor >= scroll + viewport_width {
            scroll = cursor + 1 - viewport_width;
        }
        self.scroll_cells.set(scroll);
        scroll
    }
}

fn is_word(g: &str) -> bool {
    g.chars().any(char::is_alphanumeric)
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}

impl Widget for TextInput {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "TextInput",
            x = area.x,
            y = area.y,
            w = area.width
        )
        .entered();

        if area.is_empty() {
            return;
        }
        let row = area.row(0);
        crate::clear_area(frame, row, self.style);

        let viewport = usize::from(row.width);
        if self.value.is_empty() {
            crate::draw_text(frame, row, &self.placeholder, self.style.patch(self.placeholder_style));
        } else {
            let scroll = self.effective_scroll(viewport);
            let mut visual = 0usize;
            let mut x = row.x;
            for g in self.value.graphemes(true) {
                let w = grapheme_width(g);
                if w == 0 {
                    continue;
                }
                // Graphemes straddling the left edge are skipped.
                if visual < scroll {
                    visual += w;
                    continue;
                }
                if visual + w > scroll + viewport {
                    break;
                }
                x = frame.buffer.set_string(x, row.y, g, self.style, row.right());
                visual += w;
            }
        }

        if self.focused {
            let (cx, cy) = self.cursor_position(row);
            if let Some(cell) = frame.buffer.get_mut(cx, cy) {
                cell.attrs ^= StyleFlags::REVERSE;
            }
            frame.set_cursor(Some((cx, cy)));
            frame.set_cursor_visible(true);
        }
    }
}
