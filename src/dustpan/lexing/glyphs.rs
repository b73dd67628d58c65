//! Glyph classification
//!
//! Every structural character of the note format has a plain (ASCII) and a
//! full-width spelling. Writers switch between the two depending on their
//! input method, so the grammar treats both as the same glyph.

/// Field-start marker: `@` or `＠`.
pub fn is_marker(c: char) -> bool {
    matches!(c, '@' | '＠')
}

/// Separator between a field name and its inline body: `:` or `：`.
pub fn is_field_terminator(c: char) -> bool {
    matches!(c, ':' | '：')
}

/// Opening parenthesis of a log-date group: `(` or `（`.
pub fn is_open_group(c: char) -> bool {
    matches!(c, '(' | '（')
}

/// Closing parenthesis of a log-date group: `)` or `）`.
pub fn is_close_group(c: char) -> bool {
    matches!(c, ')' | '）')
}

/// Horizontal whitespace: space, tab and the ideographic space (U+3000).
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{3000}')
}

pub fn trim_start_spaces(s: &str) -> &str {
    s.trim_start_matches(is_space)
}

pub fn trim_spaces(s: &str) -> &str {
    s.trim_matches(is_space)
}

/// True when the line holds nothing but whitespace.
pub fn is_blank(s: &str) -> bool {
    s.chars().all(is_space)
}

/// Byte offset and byte width of the first rune matching `pred`.
pub fn find_rune(s: &str, pred: impl Fn(char) -> bool) -> Option<(usize, usize)> {
    s.char_indices()
        .find(|&(_, c)| pred(c))
        .map(|(i, c)| (i, c.len_utf8()))
}

/// Byte offset and byte width of the last rune matching `pred`.
pub fn rfind_rune(s: &str, pred: impl Fn(char) -> bool) -> Option<(usize, usize)> {
    s.char_indices()
        .rev()
        .find(|&(_, c)| pred(c))
        .map(|(i, c)| (i, c.len_utf8()))
}

/// Collapse internal whitespace runs to a single ASCII space and trim both ends.
pub fn normalize_spaces(s: &str) -> String {
    s.split(is_space)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_widths_are_accepted() {
        assert!(is_marker('@') && is_marker('＠'));
        assert!(is_field_terminator(':') && is_field_terminator('：'));
        assert!(is_open_group('(') && is_open_group('（'));
        assert!(is_close_group(')') && is_close_group('）'));
        assert!(is_space(' ') && is_space('\t') && is_space('　'));
    }

    #[test]
    fn test_near_misses_are_rejected() {
        assert!(!is_marker('a'));
        assert!(!is_field_terminator(';'));
        assert!(!is_open_group('['));
        assert!(!is_close_group(']'));
        assert!(!is_space('\n'));
    }

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize_spaces("  compile 　\t option　  "), "compile option");
        assert_eq!(normalize_spaces("作者"), "作者");
        assert_eq!(normalize_spaces(" \t　"), "");
    }

    #[test]
    fn test_find_rune_reports_width() {
        assert_eq!(find_rune("ab：c", is_field_terminator), Some((2, 3)));
        assert_eq!(rfind_rune("(a)(b", is_open_group), Some((3, 1)));
        assert_eq!(find_rune("abc", is_marker), None);
    }
}
