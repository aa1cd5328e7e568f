#![forbid(unsafe_code)]

//! Partial styles that layer onto cells.
//!
//! A [`Style`] only carries the properties it wants to change; unset fields
//! leave whatever the cell already had. Widgets build styles with the
//! chained setters and apply them with [`Style::apply_to`].

use crate::cell::{Cell, PackedRgba, StyleFlags};

/// Optional foreground, background, and attribute overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    /// Foreground override.
    pub fg: Option<PackedRgba>,
    /// Background override.
    pub bg: Option<PackedRgba>,
    /// Attributes added on top of the cell's.
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// Empty style: changes nothing.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    fn with_flag(mut self, flag: StyleFlags) -> Self {
        let current = self.attrs.unwrap_or_default();
        self.attrs = Some(current | flag);
        self
    }

    /// Add bold.
    #[must_use]
    pub fn bold(self) -> Self {
        self.with_flag(StyleFlags::BOLD)
    }

    /// Add dim.
    #[must_use]
    pub fn dim(self) -> Self {
        self.with_flag(StyleFlags::DIM)
    }

    /// Add italic.
    #[must_use]
    pub fn italic(self) -> Self {
        self.with_flag(StyleFlags::ITALIC)
    }

    /// Add underline.
    #[must_use]
    pub fn underline(self) -> Self {
        self.with_flag(StyleFlags::UNDERLINE)
    }

    /// Add reverse video.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.with_flag(StyleFlags::REVERSE)
    }

    /// Whether this style changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Layer `other` on top of `self`; `other` wins where both are set.
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: match (self.attrs, other.attrs) {
                (Some(a), Some(b)) => Some(a | b),
                (a, b) => b.or(a),
            },
        }
    }

    /// Apply the set properties to a cell.
    pub fn apply_to(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.attrs |= attrs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_style_is_noop() {
        let mut cell = Cell::from_char('a').with_fg(PackedRgba::WHITE);
        Style::new().apply_to(&mut cell);
        assert_eq!(cell.fg, PackedRgba::WHITE);
        assert!(Style::default().is_empty());
    }

    #[test]
    fn flags_accumulate() {
        let style = Style::new().bold().underline();
        assert_eq!(
            style.attrs,
            Some(StyleFlags::BOLD | StyleFlags::UNDERLINE)
        );
    }

    #[test]
    fn patch_prefers_other() {
        let base = Style::new().fg(PackedRgba::WHITE).bold();
        let top = Style::new().fg(PackedRgba::BLACK).dim();
        let merged = base.patch(top);
        assert_eq!(merged.fg, Some(PackedRgba::BLACK));
        assert_eq!(merged.attrs, Some(StyleFlags::BOLD | StyleFlags::DIM));
    }

    #[test]
    fn apply_sets_colors_and_flags() {
        let mut cell = Cell::from_char('x');
        Style::new()
            .bg(PackedRgba::rgb(1, 2, 3))
            .reverse()
            .apply_to(&mut cell);
        assert_eq!(cell.bg, PackedRgba::rgb(1, 2, 3));
        assert!(cell.attrs.contains(StyleFlags::REVERSE));
    }
}
