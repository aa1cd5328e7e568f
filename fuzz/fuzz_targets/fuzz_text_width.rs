#![no_main]

use libfuzzer_sys::fuzz_target;
use seekbox_core::text_width::{display_width, grapheme_width, truncate_to_width};
use unicode_segmentation::UnicodeSegmentation;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    let width = display_width(text);
    if text.is_empty() {
        assert_eq!(width, 0);
    }

    // Width is the sum of grapheme widths.
    let summed: usize = text.graphemes(true).map(grapheme_width).sum();
    assert_eq!(width, summed);

    // Truncation never exceeds the limit and always yields a prefix.
    let limit = data.first().map_or(0, |b| usize::from(*b % 64));
    let truncated = truncate_to_width(text, limit);
    assert!(display_width(truncated) <= limit);
    assert!(text.starts_with(truncated));
});
