//! Configuration management for Qalam.
//!
//! Two layers are provided:
//!
//! - [`SiteConfig`]: the declarative site document (`config.yaml`) with site
//!   metadata, the author profile, navigation pages and collections.
//! - [`Settings`]: runtime settings (site root, initial language, cache size,
//!   builder directories) resolved from [`CliSettings`] overrides.

mod lang;
mod site;

use std::path::{Path, PathBuf};

pub use lang::{Direction, Lang, ParseLangError, PerLang};
pub use site::{
    Author, CollectionEntry, CollectionKind, PageEntry, Platform, Seo, SiteConfig, SocialLink,
    Theme, Website,
};

/// Site configuration filename, relative to the site root.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Default number of pages kept in the in-memory page cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Collection directories scanned by the manifest builder when no site
/// configuration is available.
pub const DEFAULT_COLLECTION_DIRS: [&str; 2] = ["pages/blogs", "pages/posts"];

/// CLI settings that override defaults.
///
/// All fields are optional. Only non-None values override the defaults.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site root directory.
    pub root: Option<PathBuf>,
    /// Override initial language.
    pub lang: Option<Lang>,
    /// Override page cache capacity.
    pub cache_capacity: Option<usize>,
    /// Override public site origin.
    pub origin: Option<String>,
    /// Explicit collection directories for the manifest builder.
    pub collection_dirs: Vec<PathBuf>,
}

/// Resolved runtime settings.
#[derive(Debug)]
pub struct Settings {
    /// Site root (directory containing `config.yaml` and `pages/`).
    pub root: PathBuf,
    /// Initial language, overriding stored preference and `defaultLang`.
    pub lang: Option<Lang>,
    /// Maximum number of cached pages.
    pub cache_capacity: usize,
    /// Public site origin, overriding `seo.origin`.
    pub origin: Option<String>,
    /// Explicit collection directories (absolute or relative to `root`).
    pub collection_dirs: Vec<PathBuf>,
}

impl Settings {
    /// Resolve settings from CLI overrides.
    ///
    /// If no root is given, searches for `config.yaml` in the current
    /// directory and its parents, falling back to the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if an explicit root doesn't exist and
    /// `ConfigError::Validation` for invalid overrides.
    pub fn resolve(cli_settings: &CliSettings) -> Result<Self, ConfigError> {
        let root = match &cli_settings.root {
            Some(root) => {
                if !root.is_dir() {
                    return Err(ConfigError::NotFound(root.clone()));
                }
                root.clone()
            }
            None => Self::discover_root()
                .unwrap_or_else(|| std::env::current_dir().unwrap_or_default()),
        };

        let settings = Self {
            lang: cli_settings.lang,
            cache_capacity: cli_settings
                .cache_capacity
                .unwrap_or(DEFAULT_CACHE_CAPACITY),
            origin: cli_settings.origin.clone(),
            collection_dirs: cli_settings.collection_dirs.clone(),
            ..Self::with_root(root)
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Create settings for a known root with defaults.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lang: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            origin: None,
            collection_dirs: Vec::new(),
        }
    }

    /// Validate settings values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::Validation(
                "cache capacity must be greater than 0".to_owned(),
            ));
        }
        if let Some(origin) = &self.origin {
            require_http_url(origin, "origin")?;
        }
        Ok(())
    }

    /// Path of the site configuration document.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILENAME)
    }

    /// Collection directories to scan with the manifest builder.
    ///
    /// Explicit directories win; otherwise `pages/<slug>` for each configured
    /// collection; otherwise the built-in defaults.
    #[must_use]
    pub fn builder_dirs(&self, site: Option<&SiteConfig>) -> Vec<PathBuf> {
        if !self.collection_dirs.is_empty() {
            return self
                .collection_dirs
                .iter()
                .map(|d| self.root.join(d))
                .collect();
        }
        match site {
            Some(site) if !site.collections.is_empty() => site
                .collections
                .iter()
                .map(|c| self.root.join("pages").join(&c.slug))
                .collect(),
            _ => DEFAULT_COLLECTION_DIRS
                .iter()
                .map(|d| self.root.join(d))
                .collect(),
        }
    }

    /// Search for the config file in current directory and parents.
    fn discover_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            if current.join(CONFIG_FILENAME).exists() {
                return Some(current);
            }
            if !current.pop() {
                return None;
            }
        }
    }
}

/// Load a site configuration from a file on disk.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file doesn't exist, and any error
/// of [`SiteConfig::from_yaml`].
pub fn load_site_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    SiteConfig::from_yaml(&content)
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"
siteName: { ar: "موقع", en: "Site" }
defaultLang: en
author: { name: { en: "A" }, bio: { en: "B" }, avatar: a.png }
theme: { accent: "#112233" }
footer: { en: "{year}" }
collections:
  - [notes, "ملاحظات", "Notes", list]
"##;

    #[test]
    fn test_with_root_defaults() {
        let settings = Settings::with_root("/site");
        assert_eq!(settings.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(settings.config_path(), PathBuf::from("/site/config.yaml"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_resolve_explicit_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = Settings::resolve(&CliSettings {
            root: Some(temp_dir.path().to_path_buf()),
            lang: Some(Lang::En),
            cache_capacity: Some(8),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(settings.root, temp_dir.path());
        assert_eq!(settings.lang, Some(Lang::En));
        assert_eq!(settings.cache_capacity, 8);
    }

    #[test]
    fn test_resolve_missing_root() {
        let err = Settings::resolve(&CliSettings {
            root: Some(PathBuf::from("/definitely/not/here")),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_validate_zero_capacity() {
        let mut settings = Settings::with_root("/site");
        settings.cache_capacity = 0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("cache capacity"));
    }

    #[test]
    fn test_validate_origin_scheme() {
        let mut settings = Settings::with_root("/site");
        settings.origin = Some("example.com".to_owned());
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Validation(_))
        ));
        settings.origin = Some("https://example.com".to_owned());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_builder_dirs_defaults() {
        let settings = Settings::with_root("/site");
        assert_eq!(
            settings.builder_dirs(None),
            vec![
                PathBuf::from("/site/pages/blogs"),
                PathBuf::from("/site/pages/posts")
            ]
        );
    }

    #[test]
    fn test_builder_dirs_from_site_config() {
        let settings = Settings::with_root("/site");
        let site = SiteConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(
            settings.builder_dirs(Some(&site)),
            vec![PathBuf::from("/site/pages/notes")]
        );
    }

    #[test]
    fn test_builder_dirs_explicit_override() {
        let mut settings = Settings::with_root("/site");
        settings.collection_dirs = vec![PathBuf::from("content/essays")];
        let site = SiteConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(
            settings.builder_dirs(Some(&site)),
            vec![PathBuf::from("/site/content/essays")]
        );
    }

    #[test]
    fn test_load_site_config_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, MINIMAL).unwrap();

        let site = load_site_config(&path).unwrap();
        assert_eq!(site.default_lang, Lang::En);
        assert!(site.pages.is_empty());
    }

    #[test]
    fn test_load_site_config_missing_file() {
        let err = load_site_config(Path::new("/nope/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("/nope/config.yaml"));
    }
}
