use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Fit `s` into `max_cells` terminal cells, ending in `…` when cut
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Right-pad with spaces to exactly `cells` wide (truncating if longer)
pub fn pad_to_width(s: &str, cells: usize) -> String {
    let fitted = truncate_to_width(s, cells);
    let w = display_width(&fitted);
    format!("{}{}", fitted, " ".repeat(cells.saturating_sub(w)))
}

/// Byte offset of the grapheme after the one at `byte_offset`
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    let len = s[byte_offset..].graphemes(true).next().map_or(0, str::len);
    Some(byte_offset + len)
}

/// Byte offset of the grapheme before `byte_offset`
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

/// Start of the word left of `byte_offset` (whitespace-delimited)
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let graphemes: Vec<(usize, &str)> = s[..byte_offset].grapheme_indices(true).collect();
    let is_space = |g: &str| g.chars().all(char::is_whitespace);
    let mut idx = graphemes.len();
    while idx > 0 && is_space(graphemes[idx - 1].1) {
        idx -= 1;
    }
    while idx > 0 && !is_space(graphemes[idx - 1].1) {
        idx -= 1;
    }
    graphemes.get(idx).map_or(byte_offset, |(i, _)| *i)
}

/// Display column of `byte_offset`
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width("cafe\u{0301}"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_fits() {
        assert_eq!(truncate_to_width("hi", 10), "hi");
        assert_eq!(truncate_to_width("hello", 5), "hello");
        assert_eq!(truncate_to_width("hello world", 8), "hello w\u{2026}");
        assert_eq!(truncate_to_width("你好世界", 5), "你好\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
    }

    #[test]
    fn pad_and_cut() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abc\u{2026}");
        assert_eq!(display_width(&pad_to_width("你好世界", 5)), 5);
    }

    #[test]
    fn grapheme_steps() {
        let s = "a🎉b";
        assert_eq!(next_grapheme_boundary(s, 0), Some(1));
        assert_eq!(next_grapheme_boundary(s, 1), Some(5));
        assert_eq!(next_grapheme_boundary(s, 6), None);
        assert_eq!(prev_grapheme_boundary(s, 5), Some(1));
        assert_eq!(prev_grapheme_boundary(s, 0), None);

        let combined = "e\u{0301}x";
        assert_eq!(next_grapheme_boundary(combined, 0), Some(3));
        assert_eq!(prev_grapheme_boundary(combined, 3), Some(0));
    }

    #[test]
    fn word_left() {
        let s = "buy oat milk";
        assert_eq!(word_boundary_left(s, s.len()), 8);
        assert_eq!(word_boundary_left(s, 8), 4);
        assert_eq!(word_boundary_left(s, 3), 0);
        assert_eq!(word_boundary_left("milk  ", 6), 0);
        assert_eq!(word_boundary_left("", 0), 0);
    }

    #[test]
    fn cursor_column() {
        assert_eq!(byte_offset_to_display_col("你好", 3), 2);
        assert_eq!(byte_offset_to_display_col("abc", 10), 3);
    }
}
