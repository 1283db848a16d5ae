//! Shared utility functions

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_cols` terminal columns, ending with `…` when cut.
///
/// Widths come from `unicode-width`, so wide glyphs (CJK, Ge'ez) count as
/// what they occupy on screen rather than their byte or char length.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_to_width("Evening Gown", 8), "Evening…");
/// assert_eq!(truncate_to_width("Suits", 8), "Suits");
/// ```
pub fn truncate_to_width(s: &str, max_cols: usize) -> String {
    if s.width() <= max_cols {
        return s.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }

    // Leave one column for the ellipsis
    let budget = max_cols - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Pad `s` with spaces on the right up to `cols` display columns
pub fn pad_to_width(s: &str, cols: usize) -> String {
    let width = s.width();
    if width >= cols {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(cols - width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_to_width("Suits", 10), "Suits");
    }

    #[test]
    fn test_truncate_ascii_adds_ellipsis() {
        assert_eq!(truncate_to_width("Evening Gown", 8), "Evening…");
        assert_eq!(truncate_to_width("Evening Gown", 8).width(), 8);
    }

    #[test]
    fn test_truncate_wide_chars_by_columns() {
        // Each of these occupies two columns
        let s = "日本語";
        assert_eq!(truncate_to_width(s, 6), "日本語");
        assert_eq!(truncate_to_width(s, 5), "日本…");
        assert_eq!(truncate_to_width(s, 4), "日…");
    }

    #[test]
    fn test_truncate_to_zero() {
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
    }
}
