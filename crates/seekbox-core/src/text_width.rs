#![forbid(unsafe_code)]

//! Display width helpers shared by render and widgets.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a single grapheme cluster in terminal cells.
///
/// Zero-width clusters (combining marks on their own) report 0; everything
/// else is clamped to 1..=2.
#[inline]
pub fn grapheme_width(grapheme: &str) -> usize {
    let w = UnicodeWidthStr::width(grapheme);
    if w == 0 {
        return 0;
    }
    w.clamp(1, 2)
}

/// Display width of a string in terminal cells, summed per grapheme.
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_width).sum()
}

/// Longest prefix of `text` that fits in `max_width` cells, on grapheme boundaries.
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, g) in text.grapheme_indices(true) {
        let w = grapheme_width(g);
        if used + w > max_width {
            return &text[..idx];
        }
        used += w;
    }
    text
}
