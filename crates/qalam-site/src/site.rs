//! Loaded site and route rendering.
//!
//! [`Site`] holds everything that is fixed for a session: the configuration,
//! collection manifests, the content storage and the page cache. Rendering is
//! a pure function of a fragment and the session language; the resulting
//! [`PageView`] reports the language actually used, and the caller decides
//! whether to adopt it (see [`AppState`](crate::AppState)).

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use chrono::Datelike;
use qalam_config::{
    CONFIG_FILENAME, CollectionKind, ConfigError, DEFAULT_CACHE_CAPACITY, Lang, Settings,
    SiteConfig,
};
use qalam_frontmatter::parse_lenient;
use qalam_manifest::{MANIFEST_FILENAME, Manifest};
use qalam_renderer::{Icon, escape_html, render_content};
use qalam_storage::{Storage, StorageError};

use crate::availability::Availability;
use crate::chrome::{self, LangToggle, NavLink};
use crate::dates::format_date;
use crate::meta::MetaTags;
use crate::page_cache::{CacheKey, CachedPage, LruPageCache, NullPageCache, PageCache};
use crate::route::{Route, normalize_fragment};
use crate::view::PageView;

/// Error loading a site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The configuration document could not be read.
    #[error("Failed to read site configuration: {0}")]
    Storage(#[from] StorageError),
    /// The configuration document is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Options for [`Site::load`].
#[derive(Clone, Debug)]
pub struct SiteOptions {
    /// Page cache capacity. Zero disables caching.
    pub cache_capacity: usize,
    /// Public origin, overriding `seo.origin`.
    pub origin: Option<String>,
    /// Year substituted into the footer. Defaults to the current year.
    pub year: Option<i32>,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            origin: None,
            year: None,
        }
    }
}

impl From<&Settings> for SiteOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            cache_capacity: settings.cache_capacity,
            origin: settings.origin.clone(),
            year: None,
        }
    }
}

/// Route content before the shared chrome is added.
struct Body {
    content: String,
    title: String,
    description: Option<String>,
    image: Option<String>,
    found: bool,
    warnings: Vec<String>,
}

impl Body {
    fn not_found(content: String, title: String) -> Self {
        Self {
            content,
            title,
            description: None,
            image: None,
            found: false,
            warnings: Vec::new(),
        }
    }
}

/// A loaded site.
pub struct Site {
    config: SiteConfig,
    manifests: HashMap<String, Manifest>,
    storage: Arc<dyn Storage>,
    cache: Box<dyn PageCache>,
    origin: Option<String>,
    year: i32,
}

impl Site {
    /// Read `config.yaml` and collection manifests from storage.
    ///
    /// A missing or unreadable manifest is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the configuration cannot be read or parsed.
    pub fn load(storage: Arc<dyn Storage>, options: SiteOptions) -> Result<Self, SiteError> {
        let text = storage.read(CONFIG_FILENAME)?;
        let config = SiteConfig::from_yaml(&text)?;
        Ok(Self::new(config, storage, options))
    }

    /// Create a site from an already parsed configuration.
    #[must_use]
    pub fn new(config: SiteConfig, storage: Arc<dyn Storage>, options: SiteOptions) -> Self {
        let manifests = load_manifests(&config, storage.as_ref());
        let cache: Box<dyn PageCache> = if options.cache_capacity == 0 {
            Box::new(NullPageCache)
        } else {
            Box::new(LruPageCache::new(options.cache_capacity))
        };
        let origin = options
            .origin
            .map(|o| o.trim_end_matches('/').to_owned())
            .or_else(|| config.origin().map(str::to_owned));
        let year = options.year.unwrap_or_else(|| chrono::Local::now().year());

        Self {
            config,
            manifests,
            storage,
            cache,
            origin,
            year,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Manifest of a configured collection.
    #[must_use]
    pub fn manifest(&self, collection: &str) -> Option<&Manifest> {
        self.manifests.get(collection)
    }

    /// Availability of a static page. Unknown slugs are available nowhere.
    #[must_use]
    pub fn page_availability(&self, slug: &str) -> Availability {
        self.config
            .page(slug)
            .map(Availability::of_page)
            .unwrap_or_default()
    }

    /// Availability of a collection entry, `None` if the manifest has no
    /// such entry.
    #[must_use]
    pub fn entry_availability(&self, collection: &str, slug: &str) -> Option<Availability> {
        self.manifest(collection)?
            .find(slug)
            .map(Availability::of_entry)
    }

    /// Route a fragment against this site's collections.
    #[must_use]
    pub fn route(&self, fragment: &str) -> Route {
        Route::resolve(fragment, &self.config)
    }

    /// Fetch `pages/<path>.<lang>.md`.
    ///
    /// Results, including failures, are cached by path and language; a
    /// failed fetch is never retried.
    pub fn fetch_markdown(&self, path: &str, lang: Lang) -> CachedPage {
        let key = CacheKey::new(path, lang);
        if let Some(page) = self.cache.get(&key) {
            return page;
        }

        let file = format!("pages/{path}.{}.md", lang.code());
        let page = match self.storage.read(&file) {
            Ok(text) => CachedPage::Found(text),
            Err(e) if e.is_not_found() => {
                tracing::info!(path = %file, "Content not found");
                CachedPage::NotFound
            }
            Err(e) => {
                tracing::warn!(path = %file, error = %e, "Failed to fetch content");
                CachedPage::NotFound
            }
        };
        self.cache.insert(key, page.clone());
        page
    }

    /// Render a fragment in the given session language.
    ///
    /// The returned view's `lang` differs from `lang` when the page is only
    /// available in the other language.
    #[must_use]
    pub fn render(&self, fragment: &str, lang: Lang) -> PageView {
        let fragment = normalize_fragment(fragment);
        let route = self.route(fragment);

        let (lang, body) = match &route {
            Route::StaticPage { slug } => self.render_static_page(slug, lang),
            Route::Listing { collection } => (lang, self.render_listing(collection, lang)),
            Route::Entry { collection, slug } => self.render_entry(collection, slug, lang),
        };

        self.assemble(route, fragment, lang, body)
    }

    fn render_static_page(&self, slug: &str, lang: Lang) -> (Lang, Body) {
        let lang = self.page_availability(slug).resolve(lang);
        let site_name = self.config.site_name(lang);

        let CachedPage::Found(text) = self.fetch_markdown(slug, lang) else {
            let content = "<h1>Page not found</h1><p>This page does not exist.</p>".to_owned();
            return (lang, Body::not_found(content, site_name.to_owned()));
        };

        let document = parse_lenient(&text);
        let result = render_content(document.body);
        let title = match result.title {
            Some(h1) => format!("{h1} — {site_name}"),
            None => site_name.to_owned(),
        };

        let body = Body {
            content: result.html,
            title,
            description: None,
            image: None,
            found: true,
            warnings: result.warnings,
        };
        (lang, body)
    }

    fn render_listing(&self, collection: &str, lang: Lang) -> Body {
        let (Some(manifest), Some(config)) =
            (self.manifest(collection), self.config.collection(collection))
        else {
            return Body::not_found(
                "<h1>Not found</h1>".to_owned(),
                self.config.site_name(lang).to_owned(),
            );
        };

        let label = config.label(lang);
        let mut html = format!(
            r#"<div class="listing-header"><h1>{}</h1></div>"#,
            escape_html(label)
        );

        match config.kind {
            CollectionKind::Blog => {
                html.push_str(r#"<div class="entry-cards">"#);
                for entry in &manifest.entries {
                    let Some(meta) = entry.meta(lang) else {
                        continue;
                    };
                    let (cover_class, cover_style) = match meta.cover.as_deref() {
                        Some(cover) => (
                            "",
                            format!(r#" style="background-image: url('{}')""#, escape_html(cover)),
                        ),
                        None => (" no-cover", String::new()),
                    };
                    write!(
                        html,
                        r##"<a href="#{}/{}" class="entry-card"><div class="entry-card-cover{cover_class}"{cover_style}></div><div class="entry-card-body"><div class="entry-card-meta"><time>{}</time></div><h2 class="entry-card-title">{}</h2><p class="entry-card-excerpt">{}</p>"##,
                        escape_html(collection),
                        escape_html(&entry.slug),
                        escape_html(&format_date(&meta.date, lang)),
                        escape_html(&meta.title),
                        escape_html(&meta.excerpt)
                    )
                    .unwrap();
                    let tags = tags_html(meta.tags());
                    if !tags.is_empty() {
                        write!(html, r#"<div class="entry-card-tags">{tags}</div>"#).unwrap();
                    }
                    html.push_str("</div></a>");
                }
                html.push_str("</div>");
            }
            CollectionKind::List => {
                html.push_str(r#"<div class="post-list">"#);
                for entry in &manifest.entries {
                    let Some(meta) = entry.meta(lang) else {
                        continue;
                    };
                    write!(
                        html,
                        r##"<a href="#{}/{}" class="post-item"><time class="post-item-date">{}</time><div class="post-item-body"><h3 class="post-item-title">{}</h3><p class="post-item-excerpt">{}</p></div></a>"##,
                        escape_html(collection),
                        escape_html(&entry.slug),
                        escape_html(&format_date(&meta.date, lang)),
                        escape_html(&meta.title),
                        escape_html(&meta.excerpt)
                    )
                    .unwrap();
                }
                html.push_str("</div>");
            }
        }

        Body {
            content: html,
            title: format!("{label} — {}", self.config.site_name(lang)),
            description: None,
            image: None,
            found: true,
            warnings: Vec::new(),
        }
    }

    fn render_entry(&self, collection: &str, slug: &str, lang: Lang) -> (Lang, Body) {
        let (Some(_), Some(config)) =
            (self.manifest(collection), self.config.collection(collection))
        else {
            let body = Body::not_found(
                "<h1>Not found</h1>".to_owned(),
                self.config.site_name(lang).to_owned(),
            );
            return (lang, body);
        };

        let lang = self
            .entry_availability(collection, slug)
            .map_or(lang, |availability| availability.resolve(lang));
        let back_link = format!(
            r##"<a href="#{}" class="back-link">{} {}</a>"##,
            escape_html(collection),
            Icon::ArrowLeft.svg(),
            escape_html(config.label(lang))
        );

        let path = format!("{collection}/{slug}");
        let CachedPage::Found(text) = self.fetch_markdown(&path, lang) else {
            let content =
                format!("{back_link}<h1>Post not found</h1><p>This entry does not exist.</p>");
            let body = Body::not_found(content, self.config.site_name(lang).to_owned());
            return (lang, body);
        };

        let document = parse_lenient(&text);
        let meta = &document.meta;
        let title = meta.get_str("title").filter(|t| !t.is_empty());

        let mut html = back_link;
        if let Some(cover) = meta.get_str("cover").filter(|c| !c.is_empty()) {
            write!(
                html,
                r#"<img class="entry-cover" src="{}" alt="{}">"#,
                escape_html(cover),
                escape_html(title.unwrap_or_default())
            )
            .unwrap();
        }
        html.push_str(r#"<div class="entry-meta">"#);
        if let Some(date) = meta.get_str("date").filter(|d| !d.is_empty()) {
            write!(html, "<time>{}</time>", escape_html(&format_date(date, lang))).unwrap();
        }
        let tags = tags_html(meta.get_list("tags").unwrap_or_default());
        if !tags.is_empty() {
            write!(html, r#"<div class="entry-tags">{tags}</div>"#).unwrap();
        }
        html.push_str("</div>");

        let result = render_content(document.body);
        html.push_str(&result.html);

        let body = Body {
            content: html,
            title: format!("{} — {}", title.unwrap_or(slug), self.config.site_name(lang)),
            description: meta.get_str("excerpt").map(str::to_owned),
            image: meta.get_str("cover").map(str::to_owned),
            found: true,
            warnings: result.warnings,
        };
        (lang, body)
    }

    /// Navigation links for the language: available static pages, then
    /// collections with at least one entry.
    #[must_use]
    pub fn nav_links(&self, lang: Lang, active: &str) -> Vec<NavLink> {
        let pages = self.config.pages.iter().filter_map(|page| {
            page.label(lang).map(|label| (page.slug.as_str(), label))
        });
        let collections = self
            .config
            .collections
            .iter()
            .filter(|c| self.manifest(&c.slug).is_some_and(|m| !m.is_empty()))
            .map(|c| (c.slug.as_str(), c.label(lang)));

        pages
            .chain(collections)
            .map(|(slug, label)| NavLink {
                slug: slug.to_owned(),
                label: label.to_owned(),
                active: slug == active,
            })
            .collect()
    }

    /// Whether the language toggle is shown for a route.
    ///
    /// Listings always offer both languages; entries and static pages only
    /// when content exists in both.
    #[must_use]
    pub fn toggle_visible(&self, route: &Route) -> bool {
        match route {
            Route::Listing { .. } => true,
            Route::Entry { collection, slug } => self
                .entry_availability(collection, slug)
                .is_some_and(Availability::both),
            Route::StaticPage { slug } => self.page_availability(slug).both(),
        }
    }

    fn assemble(&self, route: Route, fragment: &str, lang: Lang, body: Body) -> PageView {
        let meta = MetaTags::build(
            &self.config,
            self.origin.as_deref(),
            lang,
            &body.title,
            body.description.as_deref(),
            body.image.as_deref(),
            fragment,
        );
        let nav = chrome::nav(&self.nav_links(lang, route.base()));
        let lang_toggle = LangToggle {
            visible: self.toggle_visible(&route),
            active: lang,
        };

        PageView {
            fragment: fragment.to_owned(),
            lang,
            dir: self.config.direction(lang),
            title: body.title,
            meta,
            content: body.content,
            sidebar: chrome::sidebar(&self.config.author, lang),
            nav,
            lang_toggle,
            footer: chrome::footer(&self.config, lang, self.year),
            theme_style: chrome::theme_style(&self.config.theme),
            favicon: chrome::favicon_data_uri(&self.config),
            found: body.found,
            warnings: body.warnings,
            route,
        }
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("collections", &self.manifests.len())
            .field("cached_pages", &self.cache.len())
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

fn load_manifests(config: &SiteConfig, storage: &dyn Storage) -> HashMap<String, Manifest> {
    let mut manifests = HashMap::new();
    for collection in &config.collections {
        let path = format!("pages/{}/{MANIFEST_FILENAME}", collection.slug);
        let manifest = match storage.read(&path) {
            Ok(text) => Manifest::from_json(&text).unwrap_or_else(|e| {
                tracing::warn!(path = %path, error = %e, "Invalid manifest, using empty");
                Manifest::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to load manifest, using empty");
                Manifest::default()
            }
        };
        tracing::debug!(collection = %collection.slug, entries = manifest.len(), "Loaded manifest");
        manifests.insert(collection.slug.clone(), manifest);
    }
    manifests
}

fn tags_html(tags: &[String]) -> String {
    tags.iter().fold(String::new(), |mut html, tag| {
        write!(html, r#"<span class="tag">{}</span>"#, escape_html(tag)).unwrap();
        html
    })
}
