#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The presenter remembers the last buffer it wrote and, on the next
//! [`Presenter::present`], emits only the cells that differ. It also tracks
//! the terminal's current SGR state and cursor position so redundant style
//! and cursor sequences are skipped. All output goes through a `BufWriter`
//! and is flushed once per frame.
//!
//! # Usage
//!
//! ```
//! use seekbox_render::frame::Frame;
//! use seekbox_render::presenter::Presenter;
//!
//! let mut presenter = Presenter::new(Vec::new());
//! let mut frame = Frame::new(10, 2);
//! frame.buffer.set_string(0, 0, "Apple", Default::default(), 10);
//! presenter.present_frame(&frame)?;
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, BufWriter, Write};

use crate::buffer::Buffer;
use crate::cell::{Cell, CellContent, PackedRgba, StyleFlags};
use crate::frame::Frame;

/// Size of the internal write buffer.
const BUFFER_CAPACITY: usize = 16 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            attrs: cell.attrs,
        }
    }
}

/// State-tracked ANSI presenter over any writer.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    previous: Option<Buffer>,
    current_style: Option<CellStyle>,
    cursor_x: Option<u16>,
    cursor_y: Option<u16>,
}

impl<W: Write> Presenter<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            previous: None,
            current_style: None,
            cursor_x: None,
            cursor_y: None,
        }
    }

    /// Present a full frame: changed cells, then the cursor request.
    pub fn present_frame(&mut self, frame: &Frame) -> io::Result<usize> {
        let changed = self.present(&frame.buffer)?;
        match frame.cursor_position {
            Some((x, y)) if frame.cursor_visible => {
                self.move_cursor_to(x, y)?;
                self.writer.write_all(b"\x1b[?25h")?;
            }
            _ => self.writer.write_all(b"\x1b[?25l")?,
        }
        self.writer.flush()?;
        Ok(changed)
    }

    /// Emit the cells of `buffer` that differ from the last presented buffer.
    ///
    /// A size change (or the first call) redraws everything. Returns the
    /// number of cells written.
    pub fn present(&mut self, buffer: &Buffer) -> io::Result<usize> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "present",
            width = buffer.width(),
            height = buffer.height()
        )
        .entered();

        let full = !matches!(
            &self.previous,
            Some(prev) if prev.width() == buffer.width() && prev.height() == buffer.height()
        );
        if full {
            self.writer.write_all(b"\x1b[2J")?;
            self.reset();
        }

        let mut changed = 0usize;
        for (y, row) in buffer.rows() {
            for (x, cell) in row.iter().enumerate() {
                let x = x as u16;
                let same = !full
                    && self
                        .previous
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .is_some_and(|prev| prev == cell);
                if same || cell.is_continuation() {
                    continue;
                }
                self.move_cursor_to(x, y)?;
                self.emit_cell(cell)?;
                changed += 1;
            }
        }

        self.writer.write_all(b"\x1b[0m")?;
        self.current_style = None;
        self.writer.flush()?;
        self.previous = Some(buffer.clone());

        #[cfg(feature = "tracing")]
        tracing::trace!(changed, full, "frame presented");

        Ok(changed)
    }

    fn emit_cell(&mut self, cell: &Cell) -> io::Result<()> {
        self.emit_style_changes(cell)?;
        match &cell.content {
            CellContent::Empty | CellContent::Continuation => self.writer.write_all(b" ")?,
            CellContent::Char(c) => {
                let mut buf = [0u8; 4];
                self.writer.write_all(c.encode_utf8(&mut buf).as_bytes())?;
            }
            CellContent::Grapheme(g) => self.writer.write_all(g.as_bytes())?,
        }
        if let Some(x) = self.cursor_x {
            self.cursor_x = Some(x.saturating_add(cell.content.width() as u16));
        }
        Ok(())
    }

    /// Reset then apply; simpler than incremental SGR diffs.
    fn emit_style_changes(&mut self, cell: &Cell) -> io::Result<()> {
        let style = CellStyle::from_cell(cell);
        if self.current_style == Some(style) {
            return Ok(());
        }
        self.writer.write_all(b"\x1b[0m")?;
        if style.fg.a() > 0 {
            write!(
                self.writer,
                "\x1b[38;2;{};{};{}m",
                style.fg.r(),
                style.fg.g(),
                style.fg.b()
            )?;
        }
        if style.bg.a() > 0 {
            write!(
                self.writer,
                "\x1b[48;2;{};{};{}m",
                style.bg.r(),
                style.bg.g(),
                style.bg.b()
            )?;
        }
        const SGR_CODES: [(StyleFlags, &[u8]); 5] = [
            (StyleFlags::BOLD, b"\x1b[1m"),
            (StyleFlags::DIM, b"\x1b[2m"),
            (StyleFlags::ITALIC, b"\x1b[3m"),
            (StyleFlags::UNDERLINE, b"\x1b[4m"),
            (StyleFlags::REVERSE, b"\x1b[7m"),
        ];
        for (flag, code) in SGR_CODES {
            if style.attrs.contains(flag) {
                self.writer.write_all(code)?;
            }
        }
        self.current_style = Some(style);
        Ok(())
    }

    fn move_cursor_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        if self.cursor_x == Some(x) && self.cursor_y == Some(y) {
            return Ok(());
        }
        // CUP is 1-indexed.
        write!(self.writer, "\x1b[{};{}H", y + 1, x + 1)?;
        self.cursor_x = Some(x);
        self.cursor_y = Some(y);
        Ok(())
    }

    /// Forget tracked terminal state; the next present redraws fully.
    pub fn reset(&mut self) {
        self.previous = None;
        self.current_style = None;
        self.cursor_x = None;
        self.cursor_y = None;
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Recover the writer, flushing first.
    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn output(presenter: Presenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn first_present_is_full_redraw() {
        let mut p = Presenter::new(Vec::new());
        let mut buf = Buffer::new(3, 1);
        buf.set_string(0, 0, "abc", Style::new(), 3);
        assert_eq!(p.present(&buf).unwrap(), 3);
        let out = output(p);
        assert!(out.starts_with("\x1b[2J"));
        assert!(out.contains("abc"));
    }

    #[test]
    fn unchanged_buffer_writes_no_cells() {
        let mut p = Presenter::new(Vec::new());
        let buf = Buffer::new(4, 2);
        p.present(&buf).unwrap();
        assert_eq!(p.present(&buf).unwrap(), 0);
    }

    #[test]
    fn only_changed_cells_written() {
        let mut p = Presenter::new(Vec::new());
        let mut buf = Buffer::new(5, 1);
        buf.set_string(0, 0, "Date", Style::new(), 5);
        p.present(&buf).unwrap();
        buf.set_string(0, 0, "Data", Style::new(), 5);
        assert_eq!(p.present(&buf).unwrap(), 1);
        let out = output(p);
        assert!(out.contains("\x1b[1;4H\x1b[0ma"));
    }

    #[test]
    fn style_tracking_avoids_redundant_sgr() {
        let mut p = Presenter::new(Vec::new());
        let mut buf = Buffer::new(3, 1);
        buf.set_string(0, 0, "xyz", Style::new().fg(PackedRgba::rgb(1, 2, 3)), 3);
        p.present(&buf).unwrap();
        let out = output(p);
        assert_eq!(out.matches("38;2;1;2;3").count(), 1);
    }

    #[test]
    fn continuation_cells_skipped() {
        let mut p = Presenter::new(Vec::new());
        let mut buf = Buffer::new(3, 1);
        buf.set_string(0, 0, "果a", Style::new(), 3);
        assert_eq!(p.present(&buf).unwrap(), 2);
        let out = output(p);
        assert!(out.contains("果a"));
    }

    #[test]
    fn frame_cursor_shown_or_hidden() {
        let mut p = Presenter::new(Vec::new());
        let mut frame = Frame::new(4, 1);
        frame.set_cursor(Some((2, 0)));
        p.present_frame(&frame).unwrap();
        frame.set_cursor(None);
        p.present_frame(&frame).unwrap();
        let out = output(p);
        assert!(out.contains("\x1b[1;3H\x1b[?25h"));
        assert!(out.ends_with("\x1b[?25l"));
    }

    #[test]
    fn resize_triggers_full_redraw() {
        let mut p = Presenter::new(Vec::new());
        p.present(&Buffer::new(2, 1)).unwrap();
        assert_eq!(p.present(&Buffer::new(3, 1)).unwrap(), 3);
    }
}
