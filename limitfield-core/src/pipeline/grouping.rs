//! Length limiting and grouping (stage 3).
//!
//! With grouping enabled, whitespace is stripped first, the length limit counts
//! only the remaining scalars, and a single [`SEPARATOR`] is placed between
//! full groups. Without grouping, the text is cut to the first `max_length`
//! scalars, whitespace included.

/// Separator inserted between groups.
pub const SEPARATOR: char = ' ';

/// Returns the first `n` scalars of `text`.
#[inline]
pub fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Appends `text` to `out`, limited to `max_length` and grouped by `group_size`.
pub fn limit_into(
    text: &str,
    max_length: Option<usize>,
    group_size: Option<usize>,
    out: &mut String,
) {
    let Some(size) = group_size else {
        match max_length {
            Some(max) => out.push_str(prefix_chars(text, max)),
            None => out.push_str(text),
        }
        return;
    };

    let limit = max_length.unwrap_or(usize::MAX);
    let mut kept = 0usize;

    for c in text.chars().filter(|c| !c.is_whitespace()) {
        if kept == limit {
            break;
        }
        if kept > 0 && kept % size == 0 {
            out.push(SEPARATOR);
        }
        out.push(c);
        kept += 1;
    }
}

/// Convenience wrapper around [`limit_into`] returning a new string.
pub fn limit(text: &str, max_length: Option<usize>, group_size: Option<usize>) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    limit_into(text, max_length, group_size, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_counts_scalars_not_bytes() {
        assert_eq!(prefix_chars("héllo", 2), "hé");
        assert_eq!(prefix_chars("你好世界", 3), "你好世");
        assert_eq!(prefix_chars("ab", 5), "ab");
        assert_eq!(prefix_chars("ab", 0), "");
    }

    #[test]
    fn no_limits_is_identity() {
        assert_eq!(limit("a b  c", None, None), "a b  c");
    }

    #[test]
    fn truncate_without_grouping_counts_spaces() {
        assert_eq!(limit("ab cd ef", Some(4), None), "ab c");
    }

    #[test]
    fn grouping_without_limit() {
        assert_eq!(limit("888888888", None, Some(4)), "8888 8888 8");
        assert_eq!(limit("12345678", None, Some(4)), "1234 5678");
    }

    #[test]
    fn grouping_strips_existing_whitespace() {
        assert_eq!(limit("12 34\t5678 9", None, Some(4)), "1234 5678 9");
        assert_eq!(limit("1234 5678", None, Some(4)), "1234 5678");
    }

    #[test]
    fn grouping_limit_excludes_separators() {
        assert_eq!(limit("1234567890123456789", Some(16), Some(4)), "1234 5678 9012 3456");
        assert_eq!(limit("123456", Some(5), Some(2)), "12 34 5");
    }

    #[test]
    fn no_trailing_separator() {
        let out = limit("12345678", None, Some(4));
        assert!(!out.ends_with(SEPARATOR));
        assert_eq!(limit("1234", None, Some(4)), "1234");
    }

    #[test]
    fn group_size_one() {
        assert_eq!(limit("abc", None, Some(1)), "a b c");
    }

    #[test]
    fn whitespace_only_input_groups_to_empty() {
        assert_eq!(limit(" \t\n ", None, Some(3)), "");
    }

    #[test]
    fn unicode_groups() {
        assert_eq!(limit("你好世界和平", None, Some(2)), "你好 世界 和平");
    }

    #[test]
    fn limit_into_appends() {
        let mut out = String::from(">");
        limit_into("abcd", None, Some(2), &mut out);
        assert_eq!(out, ">ab cd");
    }
}
