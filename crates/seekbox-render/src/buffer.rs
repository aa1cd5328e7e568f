#![forbid(unsafe_code)]

//! Cell grid.
//!
//! [`Buffer`] is a row-major grid of [`Cell`]s. Writes outside the grid are
//! ignored. Writing a wide grapheme also writes continuation cells to its
//! right, and overwriting either half of a wide grapheme blanks the other
//! half so the grid never holds an orphaned continuation.

use seekbox_core::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;

use crate::cell::{Cell, CellContent};
use crate::style::Style;

/// A width x height grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer.
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Full-buffer rectangle.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Cell at `(x, y)`.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable cell at `(x, y)`.
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Write a cell, maintaining wide-grapheme invariants.
    ///
    /// A wide cell that would run off the right edge is not written.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let width = cell.content.width();
        if width > 1 && usize::from(x) + width > usize::from(self.width) {
            return;
        }

        self.clear_wide_neighbors(x, y);
        for offset in 1..width {
            // width <= 2, so offset fits in u16
            self.clear_wide_neighbors(x + offset as u16, y);
        }

        let fg = cell.fg;
        let bg = cell.bg;
        self.cells[idx] = cell;
        for offset in 1..width {
            let cont = idx + offset;
            self.cells[cont] = Cell::continuation().with_fg(fg).with_bg(bg);
        }
    }

    /// Blank any wide grapheme that overlaps `(x, y)`.
    fn clear_wide_neighbors(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if self.cells[idx].is_continuation() {
            // Walk left to the lead cell.
            let mut lead = x;
            while lead > 0 {
                lead -= 1;
                let Some(i) = self.index(lead, y) else { break };
                if !self.cells[i].is_continuation() {
                    self.blank_from(lead, y);
                    break;
                }
            }
        } else if self.cells[idx].content.width() > 1 {
            self.blank_from(x, y);
        }
    }

    fn blank_from(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let width = self.cells[idx].content.width();
        for offset in 0..width {
            if let Some(cell) = self.cells.get_mut(idx + offset) {
                cell.content = CellContent::Empty;
            }
        }
    }

    /// Fill `area` (clipped to the buffer) with clones of `cell`.
    pub fn fill(&mut self, area: Rect, cell: &Cell) {
        let area = area.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, cell.clone());
            }
        }
    }

    /// Apply `style` to every cell in `area`, leaving content alone.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        let area = area.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    style.apply_to(cell);
                }
            }
        }
    }

    /// Write `text` starting at `(x, y)`, stopping at `max_x` (exclusive).
    ///
    /// Returns the column after the last written grapheme.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        let mut col = x;
        for g in text.graphemes(true) {
            let content = CellContent::from_grapheme(g);
            let w = content.width();
            if w == 0 {
                continue;
            }
            if usize::from(col) + w > usize::from(max_x) {
                break;
            }
            let mut cell = Cell::new(content);
            style.apply_to(&mut cell);
            self.set(col, y, cell);
            col = col.saturating_add(w as u16);
        }
        col
    }

    /// Reset every cell to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Text of row `y` with continuation cells skipped and empty cells as spaces.
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            let Some(cell) = self.get(x, y) else { break };
            match &cell.content {
                CellContent::Empty => out.push(' '),
                CellContent::Char(c) => out.push(*c),
                CellContent::Grapheme(g) => out.push_str(g),
                CellContent::Continuation => {}
            }
        }
        out
    }

    /// Iterate rows as `(y, cells)`.
    pub fn rows(&self) -> impl Iterator<Item = (u16, &[Cell])> {
        let width = usize::from(self.width).max(1);
        self.cells
            .chunks(width)
            .take(usize::from(self.height))
            .enumerate()
            .map(|(y, row)| (y as u16, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::StyleFlags;

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut buf = Buffer::new(3, 1);
        buf.set(5, 0, Cell::from_char('x'));
        assert!(buf.get(5, 0).is_none());
        assert_eq!(buf.row_text(0), "   ");
    }

    #[test]
    fn wide_char_writes_continuation() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('果'));
        assert!(buf.get(1, 0).is_some_and(Cell::is_continuation));
        assert_eq!(buf.row_text(0), "果  ");
    }

    #[test]
    fn overwriting_continuation_blanks_lead() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('果'));
        buf.set(1, 0, Cell::from_char('a'));
        assert!(buf.get(0, 0).is_some_and(Cell::is_empty));
        assert_eq!(buf.row_text(0), " a  ");
    }

    #[test]
    fn wide_char_at_edge_is_dropped() {
        let mut buf = Buffer::new(2, 1);
        buf.set(1, 0, Cell::from_char('果'));
        assert!(buf.get(1, 0).is_some_and(Cell::is_empty));
    }

    #[test]
    fn set_string_clips_at_max() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.set_string(1, 0, "Banana", Style::new().bold(), 4);
        assert_eq!(end, 4);
        assert_eq!(buf.row_text(0), " Ban      ");
        assert!(buf.get(1, 0).is_some_and(|c| c.attrs.contains(StyleFlags::BOLD)));
    }

    #[test]
    fn fill_and_clear() {
        let mut buf = Buffer::new(3, 2);
        buf.fill(Rect::new(1, 0, 5, 5), &Cell::from_char('#'));
        assert_eq!(buf.row_text(0), " ##");
        assert_eq!(buf.row_text(1), " ##");
        buf.clear();
        assert_eq!(buf.row_text(1), "   ");
    }

    #[test]
    fn rows_iterates_height() {
        let buf = Buffer::new(2, 3);
        assert_eq!(buf.rows().count(), 3);
    }
}
