#![forbid(unsafe_code)]

//! Terminal cells.
//!
//! A [`Cell`] holds one column's worth of content plus colors and attribute
//! flags. Wide graphemes occupy their lead cell and one or more
//! [`CellContent::Continuation`] cells to the right.

use bitflags::bitflags;
use seekbox_core::text_width::grapheme_width;

/// RGBA color packed into a `u32` (`0xRRGGBBAA`).
///
/// Alpha 0 means "unset": the presenter leaves the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (terminal default).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xFF)
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha component.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }
}

bitflags! {
    /// Text attributes for a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const REVERSE   = 0b0001_0000;
    }
}

/// What a cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellContent {
    /// Nothing drawn; presented as a space.
    #[default]
    Empty,
    /// A single-codepoint grapheme.
    Char(char),
    /// A multi-codepoint grapheme cluster.
    Grapheme(Box<str>),
    /// Trailing column of a wide grapheme to the left.
    Continuation,
}

impl CellContent {
    /// Build content for a grapheme cluster.
    pub fn from_grapheme(g: &str) -> Self {
        let mut chars = g.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Self::Empty,
            (Some(c), None) => Self::Char(c),
            _ => Self::Grapheme(g.into()),
        }
    }

    /// Display width in cells.
    pub fn width(&self) -> usize {
        match self {
            Self::Empty => 1,
            Self::Char(c) => {
                let mut buf = [0u8; 4];
                grapheme_width(c.encode_utf8(&mut buf)).max(1)
            }
            Self::Grapheme(g) => grapheme_width(g).max(1),
            Self::Continuation => 0,
        }
    }
}

/// One terminal cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    /// Displayed content.
    pub content: CellContent,
    /// Foreground color.
    pub fg: PackedRgba,
    /// Background color.
    pub bg: PackedRgba,
    /// Attribute flags.
    pub attrs: StyleFlags,
}

impl Cell {
    /// Cell with the given content and default colors.
    pub fn new(content: CellContent) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    /// Cell displaying a single character.
    pub fn from_char(c: char) -> Self {
        Self::new(CellContent::Char(c))
    }

    /// Continuation marker for wide graphemes.
    pub fn continuation() -> Self {
        Self::new(CellContent::Continuation)
    }

    /// Set the foreground color.
    #[must_use]
    pub fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    /// Set the attribute flags.
    #[must_use]
    pub fn with_attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = attrs;
        self
    }

    /// Whether nothing is drawn in this cell.
    pub fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// Whether this cell trails a wide grapheme.
    pub fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }
}
