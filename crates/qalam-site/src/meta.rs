//! Search engine and social card metadata.

use std::fmt::Write;

use qalam_config::{Lang, SiteConfig};
use qalam_renderer::escape_html;

/// Values for the description, Open Graph and Twitter card tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    /// Absolute image URL, or empty.
    pub image: String,
    /// Page URL (`origin/#fragment`), or just the fragment without an origin.
    pub url: String,
}

impl MetaTags {
    /// Build tags for a page.
    ///
    /// `description` and `image` come from the page (entry excerpt and cover)
    /// and fall back to the site defaults. Relative images are made absolute
    /// against `origin`.
    #[must_use]
    pub fn build(
        config: &SiteConfig,
        origin: Option<&str>,
        lang: Lang,
        title: &str,
        description: Option<&str>,
        image: Option<&str>,
        fragment: &str,
    ) -> Self {
        let description = description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| config.description(lang));
        let image = image
            .filter(|i| !i.is_empty())
            .or_else(|| config.seo_image())
            .map_or_else(String::new, |image| absolute_url(image, origin));
        let url = format!("{}/#{fragment}", origin.unwrap_or_default());

        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            image,
            url,
        }
    }

    /// Render the `<meta>` elements.
    #[must_use]
    pub fn to_html(&self) -> String {
        let title = escape_html(&self.title);
        let description = escape_html(&self.description);
        let image = escape_html(&self.image);
        let url = escape_html(&self.url);

        let tags = [
            ("name", "description", &description),
            ("property", "og:title", &title),
            ("property", "og:description", &description),
            ("property", "og:image", &image),
            ("property", "og:url", &url),
            ("name", "twitter:title", &title),
            ("name", "twitter:description", &description),
            ("name", "twitter:image", &image),
        ];

        let mut html = String::new();
        for (attr, key, value) in tags {
            writeln!(html, r#"<meta {attr}="{key}" content="{value}">"#).unwrap();
        }
        html
    }
}

/// Prefix a relative URL with the origin, inserting `/` when needed.
fn absolute_url(url: &str, origin: Option<&str>) -> String {
    if url.starts_with("http") {
        return url.to_owned();
    }
    let origin = origin.unwrap_or_default();
    if url.starts_with('/') {
        format!("{origin}{url}")
    } else {
        format!("{origin}/{url}")
    }
}
