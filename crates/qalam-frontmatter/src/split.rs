//! Front matter delimiter grammar shared by both parsing modes.
//!
//! A header starts with a first line consisting only of `---` and ends at
//! the next line consisting only of `---`. Trailing whitespace (including
//! `\r`) on delimiter lines is ignored.

/// Delimiter line marking the start and end of a header.
pub(crate) const DELIMITER: &str = "---";

/// Split a document into `(header, body)`.
///
/// Returns `None` when the opening or closing delimiter is missing.
pub(crate) fn split(text: &str) -> Option<(&str, &str)> {
    let (first, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (text, ""),
    };
    if !is_delimiter(first) {
        return None;
    }
    let header_start = text.len() - rest.len();

    let mut offset = header_start;
    for line in rest.split_inclusive('\n') {
        if is_delimiter(line) {
            let header = text[header_start..offset]
                .strip_suffix('\n')
                .map_or("", |h| h.strip_suffix('\r').unwrap_or(h));
            let body = &text[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }
    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let (header, body) = split("---\ntitle: Hi\n---\n# Body\n").unwrap();
        assert_eq!(header, "title: Hi");
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_multiline_header() {
        let (header, body) = split("---\na: 1\nb: 2\n---\nbody").unwrap();
        assert_eq!(header, "a: 1\nb: 2");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_empty_header() {
        let (header, body) = split("---\n---\nbody").unwrap();
        assert_eq!(header, "");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_closing_delimiter_at_eof() {
        let (header, body) = split("---\ntitle: Hi\n---").unwrap();
        assert_eq!(header, "title: Hi");
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_crlf() {
        let (header, body) = split("---\r\ntitle: Hi\r\n---\r\nbody").unwrap();
        assert_eq!(header.trim_end(), "title: Hi");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_trailing_spaces_on_delimiters() {
        let (header, _) = split("---  \ntitle: Hi\n--- \nbody").unwrap();
        assert_eq!(header, "title: Hi");
    }

    #[test]
    fn test_no_opening_delimiter() {
        assert!(split("# Title\n---\n").is_none());
        assert!(split("").is_none());
        assert!(split("----\ntitle: x\n---\n").is_none());
    }

    #[test]
    fn test_no_closing_delimiter() {
        assert!(split("---\ntitle: Hi\n# Body").is_none());
    }

    #[test]
    fn test_horizontal_rule_in_body_kept() {
        let (_, body) = split("---\na: b\n---\nintro\n---\nmore").unwrap();
        assert_eq!(body, "intro\n---\nmore");
    }
}
