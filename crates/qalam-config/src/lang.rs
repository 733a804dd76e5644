//! Language codes, text direction and per-language values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Content language.
///
/// The site is bilingual: every page, entry and label exists in Arabic,
/// English, or both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Arabic (`ar`).
    Ar,
    /// English (`en`).
    En,
}

impl Lang {
    /// Both languages, Arabic first.
    pub const ALL: [Lang; 2] = [Lang::Ar, Lang::En];

    /// Two-letter language code used in filenames and URLs.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    /// The other language of the pair.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Ar => Self::En,
            Self::En => Self::Ar,
        }
    }

    /// Parse a language code, returning `None` for anything but `ar`/`en`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ar" => Some(Self::Ar),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown language code.
#[derive(Debug, thiserror::Error)]
#[error("unknown language code: {0:?} (expected \"ar\" or \"en\")")]
pub struct ParseLangError(String);

impl FromStr for Lang {
    type Err = ParseLangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ParseLangError(s.to_owned()))
    }
}

/// Text direction for a language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Right to left.
    Rtl,
    /// Left to right.
    #[default]
    Ltr,
}

impl Direction {
    /// Value for the HTML `dir` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rtl => "rtl",
            Self::Ltr => "ltr",
        }
    }
}

/// A value that may be given separately for each language.
///
/// Serialized as `{ ar: ..., en: ... }` with both keys optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerLang<T> {
    /// Arabic value.
    pub ar: Option<T>,
    /// English value.
    pub en: Option<T>,
}

impl<T> Default for PerLang<T> {
    fn default() -> Self {
        Self { ar: None, en: None }
    }
}

impl<T> PerLang<T> {
    /// Create a value with both languages set.
    pub fn new(ar: Option<T>, en: Option<T>) -> Self {
        Self { ar, en }
    }

    /// Value for exactly this language.
    pub fn get(&self, lang: Lang) -> Option<&T> {
        match lang {
            Lang::Ar => self.ar.as_ref(),
            Lang::En => self.en.as_ref(),
        }
    }

    /// Whether a value is present for this language.
    pub fn has(&self, lang: Lang) -> bool {
        self.get(lang).is_some()
    }
}

impl PerLang<String> {
    /// Localized text with fallback: the requested language, then Arabic,
    /// then English. Empty strings count as missing.
    #[must_use]
    pub fn resolve(&self, lang: Lang) -> &str {
        [self.get(lang), self.ar.as_ref(), self.en.as_ref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_codes() {
        assert_eq!(Lang::Ar.code(), "ar");
        assert_eq!(Lang::En.to_string(), "en");
        assert_eq!(Lang::from_code("en"), Some(Lang::En));
        assert_eq!(Lang::from_code("fr"), None);
        assert_eq!("ar".parse::<Lang>().unwrap(), Lang::Ar);
        assert!("EN".parse::<Lang>().is_err());
    }

    #[test]
    fn test_lang_other() {
        assert_eq!(Lang::Ar.other(), Lang::En);
        assert_eq!(Lang::En.other(), Lang::Ar);
    }

    #[test]
    fn test_resolve_prefers_requested_language() {
        let text = PerLang::new(Some("مرحبا".to_owned()), Some("Hello".to_owned()));
        assert_eq!(text.resolve(Lang::En), "Hello");
        assert_eq!(text.resolve(Lang::Ar), "مرحبا");
    }

    #[test]
    fn test_resolve_falls_back_to_arabic() {
        let text = PerLang::new(Some("مرحبا".to_owned()), Some(String::new()));
        assert_eq!(text.resolve(Lang::En), "مرحبا");
    }

    #[test]
    fn test_resolve_falls_back_to_english_when_arabic_missing() {
        let text = PerLang::new(None, Some("Hello".to_owned()));
        assert_eq!(text.resolve(Lang::Ar), "Hello");
        assert_eq!(PerLang::<String>::default().resolve(Lang::Ar), "");
    }

    #[test]
    fn test_deserialize_partial() {
        let value: PerLang<Direction> = serde_yaml::from_str("ar: rtl").unwrap();
        assert_eq!(value.get(Lang::Ar), Some(&Direction::Rtl));
        assert!(!value.has(Lang::En));
    }
}
