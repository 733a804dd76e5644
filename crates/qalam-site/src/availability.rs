//! Per-language content availability and language fallback.
//!
//! Static pages are available in a language when the configuration gives
//! them a label in that language. Collection entries are available in the
//! languages present in their manifest metadata.

use qalam_config::{Lang, PageEntry};
use qalam_manifest::Entry;

/// Which languages a page or entry has content in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Availability {
    ar: bool,
    en: bool,
}

impl Availability {
    #[must_use]
    pub fn new(ar: bool, en: bool) -> Self {
        Self { ar, en }
    }

    /// Availability of a static page from its configured labels.
    #[must_use]
    pub fn of_page(page: &PageEntry) -> Self {
        Self::new(page.labels.has(Lang::Ar), page.labels.has(Lang::En))
    }

    /// Availability of a collection entry from its manifest languages.
    #[must_use]
    pub fn of_entry(entry: &Entry) -> Self {
        Self::new(entry.has(Lang::Ar), entry.has(Lang::En))
    }

    #[must_use]
    pub fn has(self, lang: Lang) -> bool {
        match lang {
            Lang::Ar => self.ar,
            Lang::En => self.en,
        }
    }

    /// Whether content exists in both languages.
    #[must_use]
    pub fn both(self) -> bool {
        self.ar && self.en
    }

    /// Language to show content in.
    ///
    /// Keeps `current` when it is available and switches to the other
    /// language otherwise, even when that one has no content either.
    #[must_use]
    pub fn resolve(self, current: Lang) -> Lang {
        if self.has(current) {
            current
        } else {
            current.other()
        }
    }
}

#[cfg(test)]
mod tests {
    use qalam_config::PerLang;

    use super::*;

    #[test]
    fn test_page_availability_from_labels() {
        let page = PageEntry {
            slug: "about".to_owned(),
            labels: PerLang::new(None, Some("About".to_owned())),
        };
        let availability = Availability::of_page(&page);
        assert!(!availability.has(Lang::Ar));
        assert!(availability.has(Lang::En));
        assert!(!availability.both());
    }

    #[test]
    fn test_resolve_keeps_available_language() {
        assert_eq!(Availability::new(true, true).resolve(Lang::En), Lang::En);
        assert_eq!(Availability::new(true, false).resolve(Lang::Ar), Lang::Ar);
    }

    #[test]
    fn test_resolve_switches_to_other_language() {
        assert_eq!(Availability::new(false, true).resolve(Lang::Ar), Lang::En);
        assert_eq!(Availability::new(true, false).resolve(Lang::En), Lang::Ar);
    }

    #[test]
    fn test_resolve_switches_when_nothing_available() {
        assert_eq!(Availability::default().resolve(Lang::En), Lang::Ar);
        assert_eq!(Availability::default().resolve(Lang::Ar), Lang::En);
    }
}
