//! The site document (`config.yaml`).
//!
//! Describes site metadata, the author profile, navigation entries and
//! collections. Loaded once per session and never mutated afterwards.

use std::collections::HashSet;

use serde::Deserialize;

use crate::lang::{Direction, Lang, PerLang};
use crate::{ConfigError, require_non_empty};

/// Placeholder replaced by the current year in footer templates.
const YEAR_PLACEHOLDER: &str = "{year}";

/// Parsed and validated site configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site name per language.
    pub site_name: PerLang<String>,
    /// Language used when no preference has been stored.
    pub default_lang: Lang,
    /// Text direction per language (missing entries default to `ltr`).
    #[serde(default)]
    pub lang_dir: PerLang<Direction>,
    /// Author profile shown in the sidebar.
    pub author: Author,
    /// Theme settings.
    pub theme: Theme,
    /// Footer template per language, may contain `{year}`.
    pub footer: PerLang<String>,
    /// Ordered static pages.
    #[serde(default)]
    pub pages: Vec<PageEntry>,
    /// Ordered collections.
    #[serde(default)]
    pub collections: Vec<CollectionEntry>,
    /// Search engine and social card defaults.
    #[serde(default)]
    pub seo: Option<Seo>,
}

/// Author profile.
#[derive(Clone, Debug, Deserialize)]
pub struct Author {
    /// Display name per language.
    pub name: PerLang<String>,
    /// Short biography per language.
    pub bio: PerLang<String>,
    /// Avatar image path or URL.
    pub avatar: String,
    /// Free-form location line.
    #[serde(default)]
    pub location: Option<String>,
    /// Personal website link.
    #[serde(default)]
    pub website: Option<Website>,
    /// Social profile links.
    #[serde(default)]
    pub social: Vec<SocialLink>,
}

/// Website link in the author profile.
#[derive(Clone, Debug, Deserialize)]
pub struct Website {
    pub url: String,
    pub label: String,
}

/// Social profile link.
#[derive(Clone, Debug, Deserialize)]
pub struct SocialLink {
    /// Platform, used to pick an icon.
    pub platform: Platform,
    pub url: String,
    pub label: String,
}

/// Known social platforms.
///
/// Resolved once while parsing; unknown platform names map to [`Platform::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Github,
    Instagram,
    Linkedin,
    Email,
    #[serde(other)]
    Other,
}

/// Theme settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Theme {
    /// Accent color as `#rrggbb`.
    pub accent: String,
}

impl Theme {
    /// Accent color components, if the accent is a valid `#rrggbb` value.
    #[must_use]
    pub fn accent_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.accent.strip_prefix('#').unwrap_or(&self.accent);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Translucent accent used for highlighted backgrounds.
    #[must_use]
    pub fn accent_light(&self) -> Option<String> {
        self.accent_rgb()
            .map(|(r, g, b)| format!("rgba({r},{g},{b},0.08)"))
    }
}

/// Search engine and social card defaults.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Seo {
    /// Default page description per language.
    #[serde(default)]
    pub description: Option<PerLang<String>>,
    /// Default social card image.
    #[serde(default)]
    pub image: Option<String>,
    /// Public origin of the site (e.g. `https://example.com`), used to make
    /// image and page URLs absolute.
    #[serde(default)]
    pub origin: Option<String>,
}

/// Static page navigation entry: `[slug, arabic label, english label]`.
///
/// A missing (`null`) label means the page does not exist in that language.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, Option<String>, Option<String>)")]
pub struct PageEntry {
    pub slug: String,
    pub labels: PerLang<String>,
}

impl From<(String, Option<String>, Option<String>)> for PageEntry {
    fn from((slug, ar, en): (String, Option<String>, Option<String>)) -> Self {
        Self {
            slug,
            labels: PerLang::new(ar, en),
        }
    }
}

impl PageEntry {
    /// Navigation label for the language, `None` when the page is absent in it.
    #[must_use]
    pub fn label(&self, lang: Lang) -> Option<&str> {
        self.labels.get(lang).map(String::as_str)
    }
}

/// Kind of collection, which selects the listing layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Cards with cover images.
    Blog,
    /// Plain chronological list. Any unknown kind is treated as a list.
    #[serde(other)]
    List,
}

/// Collection entry: `[slug, arabic label, english label, kind]`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String, String, CollectionKind)")]
pub struct CollectionEntry {
    pub slug: String,
    pub labels: PerLang<String>,
    pub kind: CollectionKind,
}

impl From<(String, String, String, CollectionKind)> for CollectionEntry {
    fn from((slug, ar, en, kind): (String, String, String, CollectionKind)) -> Self {
        Self {
            slug,
            labels: PerLang::new(Some(ar), Some(en)),
            kind,
        }
    }
}

impl CollectionEntry {
    /// Collection label for the language.
    #[must_use]
    pub fn label(&self, lang: Lang) -> &str {
        self.labels.resolve(lang)
    }
}

impl SiteConfig {
    /// Parse and validate a site configuration document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed YAML or missing required keys
    /// and `ConfigError::Validation` for invalid values.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.accent_rgb().is_none() || !self.theme.accent.starts_with('#') {
            return Err(ConfigError::Validation(format!(
                "theme.accent must be a #rrggbb color, got {:?}",
                self.theme.accent
            )));
        }

        let mut seen = HashSet::new();
        let slugs = self
            .pages
            .iter()
            .map(|p| ("pages", p.slug.as_str()))
            .chain(self.collections.iter().map(|c| ("collections", c.slug.as_str())));
        for (section, slug) in slugs {
            require_non_empty(slug, &format!("{section}[].slug"))?;
            if slug.contains('/') || slug.contains("..") {
                return Err(ConfigError::Validation(format!(
                    "{section} slug {slug:?} cannot contain '/' or '..'"
                )));
            }
            if !seen.insert(slug) {
                return Err(ConfigError::Validation(format!(
                    "duplicate slug {slug:?} in pages/collections"
                )));
            }
        }

        Ok(())
    }

    /// Site name for the language (falls back to Arabic).
    #[must_use]
    pub fn site_name(&self, lang: Lang) -> &str {
        self.site_name.resolve(lang)
    }

    /// Text direction for the language.
    #[must_use]
    pub fn direction(&self, lang: Lang) -> Direction {
        self.lang_dir.get(lang).copied().unwrap_or_default()
    }

    /// Footer text for the language with `{year}` substituted.
    #[must_use]
    pub fn footer_text(&self, lang: Lang, year: i32) -> String {
        self.footer
            .resolve(lang)
            .replacen(YEAR_PLACEHOLDER, &year.to_string(), 1)
    }

    /// Default page description for the language.
    #[must_use]
    pub fn description(&self, lang: Lang) -> &str {
        self.seo
            .as_ref()
            .and_then(|seo| seo.description.as_ref())
            .map_or("", |d| d.resolve(lang))
    }

    /// Default social card image.
    #[must_use]
    pub fn seo_image(&self) -> Option<&str> {
        self.seo.as_ref().and_then(|seo| seo.image.as_deref())
    }

    /// Public origin of the site, without trailing slash.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.seo
            .as_ref()
            .and_then(|seo| seo.origin.as_deref())
            .map(|o| o.trim_end_matches('/'))
    }

    /// Look up a static page entry.
    #[must_use]
    pub fn page(&self, slug: &str) -> Option<&PageEntry> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    /// Look up a collection entry.
    #[must_use]
    pub fn collection(&self, slug: &str) -> Option<&CollectionEntry> {
        self.collections.iter().find(|c| c.slug == slug)
    }

    /// Whether the slug names a configured collection.
    #[must_use]
    pub fn is_collection(&self, slug: &str) -> bool {
        self.collection(slug).is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r##"
siteName:
  ar: "مدونة"
  en: "Blog"
defaultLang: ar
langDir:
  ar: rtl
  en: ltr
author:
  name: { ar: "سارة", en: "Sara" }
  bio: { ar: "مطورة", en: "Developer" }
  avatar: images/avatar.jpg
  location: Cairo
  website: { url: "https://sara.dev", label: "sara.dev" }
  social:
    - { platform: github, url: "https://github.com/sara", label: GitHub }
    - { platform: mastodon, url: "https://example.social/@sara", label: Mastodon }
theme:
  accent: "#0d9488"
footer:
  ar: "© {year} سارة"
  en: "© {year} Sara"
pages:
  - [home, "الرئيسية", "Home"]
  - [about, null, "About"]
collections:
  - [blogs, "المدونة", "Blog", blog]
  - [posts, "منشورات", "Posts", list]
  - [notes, "ملاحظات", "Notes", gallery]
seo:
  description: { ar: "وصف", en: "Description" }
  image: images/card.png
  origin: "https://sara.dev/"
"##;

    fn sample() -> SiteConfig {
        SiteConfig::from_yaml(SAMPLE).unwrap()
    }

    #[test]
    fn test_parse_full_config() {
        let config = sample();
        assert_eq!(config.default_lang, Lang::Ar);
        assert_eq!(config.site_name(Lang::En), "Blog");
        assert_eq!(config.direction(Lang::Ar), Direction::Rtl);
        assert_eq!(config.author.location.as_deref(), Some("Cairo"));
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.collections.len(), 3);
    }

    #[test]
    fn test_page_tuple_with_null_label() {
        let config = sample();
        let about = config.page("about").unwrap();
        assert_eq!(about.label(Lang::Ar), None);
        assert_eq!(about.label(Lang::En), Some("About"));
    }

    #[test]
    fn test_collection_kind_resolution() {
        let config = sample();
        assert_eq!(config.collection("blogs").unwrap().kind, CollectionKind::Blog);
        assert_eq!(config.collection("posts").unwrap().kind, CollectionKind::List);
        assert_eq!(config.collection("notes").unwrap().kind, CollectionKind::List);
        assert!(config.is_collection("posts"));
        assert!(!config.is_collection("about"));
    }

    #[test]
    fn test_unknown_platform_is_other() {
        let config = sample();
        let platforms: Vec<Platform> = config.author.social.iter().map(|s| s.platform).collect();
        assert_eq!(platforms, vec![Platform::Github, Platform::Other]);
    }

    #[test]
    fn test_footer_year_substitution() {
        let config = sample();
        assert_eq!(config.footer_text(Lang::En, 2026), "© 2026 Sara");
    }

    #[test]
    fn test_seo_defaults() {
        let config = sample();
        assert_eq!(config.description(Lang::En), "Description");
        assert_eq!(config.seo_image(), Some("images/card.png"));
        assert_eq!(config.origin(), Some("https://sara.dev"));
    }

    #[test]
    fn test_missing_lang_dir_defaults_to_ltr() {
        let yaml = SAMPLE.replace("  ar: rtl\n", "");
        let config = SiteConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config.direction(Lang::Ar), Direction::Ltr);
    }

    #[test]
    fn test_accent_light() {
        let config = sample();
        assert_eq!(config.theme.accent_rgb(), Some((13, 148, 136)));
        assert_eq!(
            config.theme.accent_light().as_deref(),
            Some("rgba(13,148,136,0.08)")
        );
    }

    #[test]
    fn test_invalid_accent_rejected() {
        let yaml = SAMPLE.replace("\"#0d9488\"", "teal");
        let err = SiteConfig::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("theme.accent"));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let yaml = SAMPLE.replace("[about, null, \"About\"]", "[posts, null, \"About\"]");
        let err = SiteConfig::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate slug"));
    }

    #[test]
    fn test_slug_with_slash_rejected() {
        let yaml = SAMPLE.replace("[about, null", "[\"a/b\", null");
        let err = SiteConfig::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_missing_required_key_is_parse_error() {
        let yaml = SAMPLE.replace("defaultLang: ar\n", "");
        let err = SiteConfig::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_default_lang_is_parse_error() {
        let yaml = SAMPLE.replace("defaultLang: ar", "defaultLang: fr");
        assert!(matches!(
            SiteConfig::from_yaml(&yaml),
            Err(ConfigError::Parse(_))
        ));
    }
}
