//! Persisted language preference.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use qalam_config::Lang;
use serde::{Deserialize, Serialize};

/// Storage for the visitor's language choice.
///
/// Saving is best-effort: failures are logged, never returned.
pub trait PreferenceStore: Send + Sync {
    /// Stored language, if any.
    fn load(&self) -> Option<Lang>;

    /// Persist the language.
    fn save(&self, lang: Lang);
}

/// Preference kept in memory for the lifetime of the store.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    lang: Mutex<Option<Lang>>,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lang(lang: Lang) -> Self {
        Self {
            lang: Mutex::new(Some(lang)),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> Option<Lang> {
        *self.lang.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn save(&self, lang: Lang) {
        *self.lang.lock().unwrap_or_else(PoisonError::into_inner) = Some(lang);
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    lang: Option<Lang>,
}

/// Preference stored as a small TOML file (`lang = "ar"`).
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self) -> Option<Lang> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<StoredPreferences>(&content) {
            Ok(stored) => stored.lang,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable preferences");
                None
            }
        }
    }

    fn save(&self, lang: Lang) {
        let stored = StoredPreferences { lang: Some(lang) };
        let content = match toml::to_string(&stored) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize preferences");
                return;
            }
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!(path = %parent.display(), error = %e, "Failed to create preferences directory");
            return;
        }
        if let Err(e) = std::fs::write(&self.path, content) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to save preferences");
        }
    }
}
