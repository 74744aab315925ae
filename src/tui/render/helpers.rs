use std::borrow::Cow;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` out to `width` and append a right-aligned hint, if it fits
pub(super) fn push_right_hint<'a>(
    spans: &mut Vec<Span<'a>>,
    hint: impl Into<Cow<'a, str>>,
    width: usize,
    hint_style: Style,
    bg_style: Style,
) {
    let hint = hint.into();
    let content_width = spans_width(spans);
    let hint_width = unicode::display_width(&hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), bg_style));
        spans.push(Span::styled(hint, hint_style));
    }
}

/// The part of `s` between display columns `skip` and `skip + width`.
/// A wide character straddling either edge is dropped.
pub(super) fn visible_columns(s: &str, skip: usize, width: usize) -> String {
    let mut out = String::new();
    let mut col = 0;
    for g in s.graphemes(true) {
        let w = unicode::display_width(g);
        if col >= skip && col + w <= skip + width {
            out.push_str(g);
        }
        col += w;
        if col >= skip + width {
            break;
        }
    }
    out
}

/// Word-wrap `text` into lines of at most `max_width` columns.
/// Every line (including the first) is prefixed with `indent`.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_len = unicode::display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();
    let mut current_len = indent_len;

    for word in text.split_whitespace() {
        let word_len = unicode::display_width(word);
        let space = if current_len == indent_len { 0 } else { 1 };
        if current_len + space + word_len > max_width && current_len > indent_len {
            lines.push(current);
            current = indent.to_string();
            current_len = indent_len;
        }
        if current_len > indent_len {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if current_len > indent_len || lines.is_empty() {
        lines.push(current);
    }
    lines
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap_text(" ", "Failed to save tasks: disk full", 16),
            vec![" Failed to save", " tasks: disk", " full"]
        );
        assert_eq!(wrap_text(" ", "", 10), vec![" "]);
    }

    #[test]
    fn visible_columns_window() {
        assert_eq!(visible_columns("hello world", 6, 5), "world");
        assert_eq!(visible_columns("hello", 0, 10), "hello");
        // The wide char at columns 1-2 is cut by the left edge
        assert_eq!(visible_columns("a漢b", 2, 5), "b");
    }

    #[test]
    fn centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect_fixed(40, 40, area), area);
    }
}
