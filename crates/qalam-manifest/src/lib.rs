//! Collection manifests for Qalam.
//!
//! A manifest is a precomputed JSON index of one collection's entries,
//! written by the [`builder`] to `<collection>/_manifest.json`:
//!
//! ```json
//! {
//!   "entries": [
//!     {
//!       "slug": "hello",
//!       "langs": {
//!         "ar": { "title": "…", "date": "2024-05-01", "excerpt": "", "tags": null, "cover": null },
//!         "en": { "title": "Hello", "date": "2024-05-01", "excerpt": "", "tags": ["rust"], "cover": null }
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Entries are stored newest first. Readers never re-sort.

pub mod builder;

use std::collections::BTreeMap;
use std::path::PathBuf;

use qalam_config::Lang;
use serde::{Deserialize, Serialize};

pub use builder::{
    BuildReport, CollectionOutcome, CollectionReport, SkipReason, SkippedFile, build_all,
    build_collection,
};

/// Manifest filename inside a collection directory.
pub const MANIFEST_FILENAME: &str = "_manifest.json";

/// Sort key used for entries without a date.
pub const MIN_DATE: &str = "0000-00-00";

/// Index of a collection's entries, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Manifest {
    /// Parse a manifest document.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Json` if the document is not a valid manifest.
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize as pretty-printed JSON (two-space indent, no trailing newline).
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find an entry by slug.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// One addressable item of a collection, in one or both languages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub slug: String,
    /// Metadata per language. Never empty for built manifests.
    pub langs: BTreeMap<Lang, EntryMeta>,
}

impl Entry {
    /// Metadata for display in `lang`, falling back to Arabic, then English.
    #[must_use]
    pub fn meta(&self, lang: Lang) -> Option<&EntryMeta> {
        self.langs
            .get(&lang)
            .or_else(|| self.langs.get(&Lang::Ar))
            .or_else(|| self.langs.get(&Lang::En))
    }

    /// Whether the entry has content in `lang`.
    #[must_use]
    pub fn has(&self, lang: Lang) -> bool {
        self.langs.contains_key(&lang)
    }

    /// Whether the entry has content in both languages.
    #[must_use]
    pub fn has_both(&self) -> bool {
        Lang::ALL.iter().all(|&lang| self.has(lang))
    }

    /// Date used for ordering: the date of the first language's metadata.
    #[must_use]
    pub fn sort_date(&self) -> &str {
        self.langs
            .values()
            .next()
            .map_or(MIN_DATE, |meta| meta.date.as_str())
    }
}

/// Per-language entry metadata taken from front matter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMeta {
    pub title: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    #[serde(default)]
    pub excerpt: String,
    /// Tags; `null` when the field is absent or not a list.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Cover image path.
    #[serde(default)]
    pub cover: Option<String>,
}

impl EntryMeta {
    /// Tags, treating `null` as empty.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// Manifest error.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Manifest JSON could not be parsed or produced.
    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),
    /// Collection directory could not be globbed.
    #[error("invalid collection directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Manifest could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
