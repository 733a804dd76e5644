//! URL fragment routing.
//!
//! The fragment is the only navigation state:
//!
//! | Fragment | Route |
//! |---|---|
//! | `#` or empty | static page `home` |
//! | `#about` | static page `about` |
//! | `#blogs` (a collection) | listing of `blogs` |
//! | `#blogs/hello` | entry `hello` of `blogs` |

use qalam_config::SiteConfig;

/// Slug rendered for an empty fragment.
pub const HOME_SLUG: &str = "home";

/// Page kind selected by a fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Markdown page at `pages/<slug>.<lang>.md`.
    StaticPage { slug: String },
    /// Listing of a collection's manifest.
    Listing { collection: String },
    /// Entry at `pages/<collection>/<slug>.<lang>.md`.
    Entry { collection: String, slug: String },
}

impl Route {
    /// Route a fragment against the configured collections.
    #[must_use]
    pub fn resolve(fragment: &str, config: &SiteConfig) -> Self {
        let fragment = normalize_fragment(fragment);
        let (base, child) = split_fragment(fragment);

        match (config.is_collection(base), child) {
            (true, Some(child)) => Self::Entry {
                collection: base.to_owned(),
                slug: child.to_owned(),
            },
            (true, None) => Self::Listing {
                collection: base.to_owned(),
            },
            (false, _) => Self::StaticPage {
                slug: base.to_owned(),
            },
        }
    }

    /// First fragment segment, used to mark the active navigation link.
    #[must_use]
    pub fn base(&self) -> &str {
        match self {
            Self::StaticPage { slug } => slug,
            Self::Listing { collection } | Self::Entry { collection, .. } => collection,
        }
    }
}

/// Strip the leading `#` and substitute the home slug for an empty fragment.
#[must_use]
pub fn normalize_fragment(fragment: &str) -> &str {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if fragment.is_empty() {
        HOME_SLUG
    } else {
        fragment
    }
}

/// Split into the first segment and a non-empty second segment. Further
/// segments are ignored.
fn split_fragment(fragment: &str) -> (&str, Option<&str>) {
    let mut segments = fragment.split('/');
    let base = segments.next().unwrap_or_default();
    let child = segments.next().filter(|s| !s.is_empty());
    (base, child)
}
