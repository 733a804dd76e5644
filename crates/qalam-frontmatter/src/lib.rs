//! Front matter parsing for markdown documents.
//!
//! A document may start with a header block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: "Hello"
//! tags: [rust, web]
//! ---
//! # Body
//! ```
//!
//! Both parsing modes share the same delimiter grammar and produce the same
//! flat [`FrontMatter`] mapping of strings and string lists:
//!
//! - [`Mode::Strict`] parses the header as YAML and rejects malformed headers
//!   with a [`FrontMatterError`]. Nested values do not fit the flat mapping
//!   and are left out. Used by the manifest builder.
//! - [`Mode::Lenient`] scans `key: value` lines and never fails. Used when
//!   rendering pages.
//!
//! If the opening or closing delimiter is missing, both modes return empty
//! metadata and the whole input as body.
//!
//! # Example
//!
//! ```
//! use qalam_frontmatter::{Mode, parse};
//!
//! let doc = parse("---\ntitle: Hello\n---\nBody", Mode::Lenient).unwrap();
//! assert_eq!(doc.meta.get_str("title"), Some("Hello"));
//! assert_eq!(doc.body, "Body");
//! ```

mod lenient;
mod split;
mod strict;

use std::collections::BTreeMap;
use std::fmt::Write;

/// Front matter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Scalar value in string form.
    String(String),
    /// List of scalar values in string form.
    List(Vec<String>),
}

impl Value {
    /// String value, if this is a scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// List items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::String(_) => None,
        }
    }
}

/// Flat key/value metadata from a document header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: BTreeMap<String, Value>,
}

impl FrontMatter {
    /// Create empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Scalar value for the key. Lists return `None`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// List value for the key. Scalars return `None`.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(Value::as_list)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize as a delimited header block followed by `body`.
    ///
    /// Strings are written double-quoted and lists as `[a, b]`, which both
    /// parsing modes read back unchanged as long as values contain no quotes,
    /// commas or line breaks.
    #[must_use]
    pub fn to_document(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + 64);
        out.push_str(split::DELIMITER);
        out.push('\n');
        for (key, value) in &self.fields {
            match value {
                Value::String(s) => {
                    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
                    writeln!(out, "{key}: \"{escaped}\"").unwrap();
                }
                Value::List(items) => {
                    writeln!(out, "{key}: [{}]", items.join(", ")).unwrap();
                }
            }
        }
        out.push_str(split::DELIMITER);
        out.push('\n');
        out.push_str(body);
        out
    }
}

/// Parsing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// YAML header, errors on malformed input.
    Strict,
    /// Line scanner, never fails.
    Lenient,
}

/// A document split into metadata and body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document<'a> {
    /// Header metadata (empty when there is no header).
    pub meta: FrontMatter,
    /// Text after the header (the whole input when there is no header).
    pub body: &'a str,
}

/// Front matter parse error (strict mode only).
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// YAML syntax error.
    #[error("invalid YAML in front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The header is valid YAML but not a mapping.
    #[error("front matter must be a mapping of keys to values")]
    NotAMapping,
    /// A key is not a scalar.
    #[error("front matter keys must be scalars")]
    InvalidKey,
}

/// Parse a document in the given mode.
///
/// # Errors
///
/// Only [`Mode::Strict`] can fail; see [`parse_strict`].
pub fn parse(text: &str, mode: Mode) -> Result<Document<'_>, FrontMatterError> {
    match mode {
        Mode::Strict => parse_strict(text),
        Mode::Lenient => Ok(parse_lenient(text)),
    }
}

/// Parse a document with the YAML header parser.
///
/// # Errors
///
/// Returns a [`FrontMatterError`] if the header is not valid YAML or is not a
/// mapping.
pub fn parse_strict(text: &str) -> Result<Document<'_>, FrontMatterError> {
    match split::split(text) {
        Some((header, body)) => Ok(Document {
            meta: strict::parse_header(header)?,
            body,
        }),
        None => Ok(unparsed(text)),
    }
}

/// Parse a document with the best-effort line scanner.
#[must_use]
pub fn parse_lenient(text: &str) -> Document<'_> {
    match split::split(text) {
        Some((header, body)) => Document {
            meta: lenient::parse_header(header),
            body,
        },
        None => unparsed(text),
    }
}

fn unparsed(text: &str) -> Document<'_> {
    Document {
        meta: FrontMatter::new(),
        body: text,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_meta() -> FrontMatter {
        let mut meta = FrontMatter::new();
        meta.insert("title", Value::String("Building a blog".to_owned()));
        meta.insert("date", Value::String("2024-05-01".to_owned()));
        meta.insert("excerpt", Value::String("Notes on static sites".to_owned()));
        meta.insert(
            "tags",
            Value::List(vec!["rust".to_owned(), "web".to_owned()]),
        );
        meta
    }

    #[test]
    fn test_round_trip_lenient() {
        let meta = sample_meta();
        let text = meta.to_document("# Body\n");
        let doc = parse_lenient(&text);
        assert_eq!(doc.meta, meta);
        assert_eq!(doc.body, "# Body\n");
    }

    #[test]
    fn test_round_trip_strict() {
        let meta = sample_meta();
        let text = meta.to_document("# Body\n");
        let doc = parse_strict(&text).unwrap();
        assert_eq!(doc.meta, meta);
        assert_eq!(doc.body, "# Body\n");
    }

    #[test]
    fn test_round_trip_arabic_text() {
        let mut meta = FrontMatter::new();
        meta.insert("title", Value::String("مقدمة في رست".to_owned()));
        let text = meta.to_document("");
        assert_eq!(parse_lenient(&text).meta, meta);
        assert_eq!(parse_strict(&text).unwrap().meta, meta);
    }

    #[test]
    fn test_round_trip_empty() {
        let text = FrontMatter::new().to_document("body");
        assert!(parse_lenient(&text).meta.is_empty());
        assert_eq!(parse_strict(&text).unwrap().body, "body");
    }

    #[test]
    fn test_missing_delimiter_returns_whole_input() {
        let text = "# Just markdown\n\ntitle: not metadata";
        for mode in [Mode::Strict, Mode::Lenient] {
            let doc = parse(text, mode).unwrap();
            assert!(doc.meta.is_empty());
            assert_eq!(doc.body, text);
        }
    }

    #[test]
    fn test_unterminated_header_returns_whole_input() {
        let text = "---\ntitle: Hi\nno end";
        assert_eq!(parse_lenient(text).body, text);
        assert_eq!(parse_strict(text).unwrap().body, text);
    }

    #[test]
    fn test_modes_agree_on_simple_headers() {
        let text = "---\ntitle: 'Hello'\ntags: [a, b]\n---\nbody";
        assert_eq!(parse_lenient(text), parse_strict(text).unwrap());
    }

    #[test]
    fn test_strict_rejects_what_lenient_accepts() {
        let text = "---\ntitle: [broken\nauthor:\n---\nbody";
        assert!(parse_strict(text).is_err());
        let doc = parse_lenient(text);
        assert_eq!(doc.meta.get_str("title"), Some("[broken"));
        assert_eq!(doc.body, "body");
    }
}
