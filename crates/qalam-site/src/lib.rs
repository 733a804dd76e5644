//! Routing and page rendering for Qalam sites.
//!
//! This crate provides:
//! - [`Site`]: configuration, manifests and cached content for one site
//! - [`Route`]: fragment routing to static pages, listings and entries
//! - [`AppState`]: session language, preferences and navigation ordering
//! - [`PageView`]: a rendered page with its chrome, printable as a full
//!   HTML document
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use qalam_site::{AppState, MemoryPreferences, Site, SiteOptions};
//! use qalam_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("site")));
//! let site = Arc::new(Site::load(storage, SiteOptions::default())?);
//! let mut state = AppState::new(site, Box::new(MemoryPreferences::new()), None);
//!
//! let page = state.navigate("#blogs/hello");
//! println!("{}", page.to_document());
//! # Ok(())
//! # }
//! ```

mod availability;
mod chrome;
mod dates;
mod meta;
mod page_cache;
mod preferences;
mod route;
mod session;
pub(crate) mod site;
mod view;

pub use availability::Availability;
pub use chrome::{LangToggle, NavLink};
pub use dates::format_date;
pub use meta::MetaTags;
pub use page_cache::{CacheKey, CachedPage, LruPageCache, NullPageCache, PageCache};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use route::{HOME_SLUG, Route, normalize_fragment};
pub use session::{AppState, PendingNavigation};
pub use site::{Site, SiteError, SiteOptions};
pub use view::PageView;
