//! Best-effort line scanner.
//!
//! Understands `key: value` lines, quoted strings and single-line bracket
//! lists. No nesting, no multi-line values, no escapes. Lines without a colon
//! are ignored and later keys overwrite earlier ones.

use crate::{FrontMatter, Value};

pub(crate) fn parse_header(header: &str) -> FrontMatter {
    let mut meta = FrontMatter::new();
    for line in header.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        meta.insert(key, parse_value(value.trim()));
    }
    meta
}

fn parse_value(raw: &str) -> Value {
    let value = strip_quotes(raw);
    match value
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
    {
        Some(inner) if inner.trim().is_empty() => Value::List(Vec::new()),
        Some(inner) => Value::List(inner.split(',').map(|s| s.trim().to_owned()).collect()),
        None => Value::String(value.to_owned()),
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_and_quoted_values() {
        let meta = parse_header("title: \"Hello\"\nauthor: 'Sara'\nplain: text here");
        assert_eq!(meta.get_str("title"), Some("Hello"));
        assert_eq!(meta.get_str("author"), Some("Sara"));
        assert_eq!(meta.get_str("plain"), Some("text here"));
    }

    #[test]
    fn test_bracket_list() {
        let meta = parse_header("tags: [rust, web , notes]");
        assert_eq!(
            meta.get_list("tags"),
            Some(&["rust".to_owned(), "web".to_owned(), "notes".to_owned()][..])
        );
    }

    #[test]
    fn test_empty_bracket_list() {
        let meta = parse_header("tags: []");
        assert_eq!(meta.get_list("tags"), Some(&[][..]));
    }

    #[test]
    fn test_value_containing_colon() {
        let meta = parse_header("time: 10:30\nurl: https://example.com");
        assert_eq!(meta.get_str("time"), Some("10:30"));
        assert_eq!(meta.get_str("url"), Some("https://example.com"));
    }

    #[test]
    fn test_lines_without_colon_ignored() {
        let meta = parse_header("just text\n- item\ntitle: Kept");
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get_str("title"), Some("Kept"));
    }

    #[test]
    fn test_mismatched_quotes_kept() {
        let meta = parse_header("title: \"Half'");
        assert_eq!(meta.get_str("title"), Some("\"Half'"));
    }

    #[test]
    fn test_quoted_brackets_become_list() {
        let meta = parse_header("tags: \"[a, b]\"");
        assert_eq!(
            meta.get_list("tags"),
            Some(&["a".to_owned(), "b".to_owned()][..])
        );
    }

    #[test]
    fn test_later_key_wins() {
        let meta = parse_header("title: One\ntitle: Two");
        assert_eq!(meta.get_str("title"), Some("Two"));
    }

    #[test]
    fn test_empty_value() {
        let meta = parse_header("cover:");
        assert_eq!(meta.get_str("cover"), Some(""));
    }
}
