//! Session state: current language, current page and navigation ordering.
//!
//! Navigation is split in three steps so rendering can happen off the
//! session (for example on another thread):
//!
//! 1. [`AppState::begin_navigation`] takes a new generation number.
//! 2. [`AppState::resolve`] (or [`Site::render`] directly) renders the page.
//! 3. [`AppState::commit`] applies the result, unless a newer navigation has
//!    started in the meantime.
//!
//! Language fallback chosen while rendering is adopted and persisted at
//! commit time, so a discarded navigation never changes the language.

use std::sync::Arc;

use qalam_config::Lang;

use crate::preferences::PreferenceStore;
use crate::route::normalize_fragment;
use crate::site::Site;
use crate::view::PageView;

/// A navigation that has started but not been committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingNavigation {
    generation: u64,
    fragment: String,
    lang: Lang,
}

impl PendingNavigation {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Normalized fragment being navigated to.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Session language when the navigation started.
    #[must_use]
    pub fn lang(&self) -> Lang {
        self.lang
    }
}

/// Mutable state of one visitor session.
pub struct AppState {
    site: Arc<Site>,
    preferences: Box<dyn PreferenceStore>,
    lang: Lang,
    generation: u64,
    view: Option<PageView>,
}

impl AppState {
    /// Start a session.
    ///
    /// The initial language is `lang` if given, else the stored preference,
    /// else the site's default language.
    #[must_use]
    pub fn new(site: Arc<Site>, preferences: Box<dyn PreferenceStore>, lang: Option<Lang>) -> Self {
        let lang = lang
            .or_else(|| preferences.load())
            .unwrap_or(site.config().default_lang);
        Self {
            site,
            preferences,
            lang,
            generation: 0,
            view: None,
        }
    }

    #[must_use]
    pub fn site(&self) -> &Arc<Site> {
        &self.site
    }

    /// Current session language.
    #[must_use]
    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Last committed page.
    #[must_use]
    pub fn view(&self) -> Option<&PageView> {
        self.view.as_ref()
    }

    /// Fragment of the last committed page.
    #[must_use]
    pub fn current_fragment(&self) -> Option<&str> {
        self.view.as_ref().map(|view| view.fragment.as_str())
    }

    /// Start a navigation, superseding any navigation still in flight.
    pub fn begin_navigation(&mut self, fragment: &str) -> PendingNavigation {
        self.generation += 1;
        PendingNavigation {
            generation: self.generation,
            fragment: normalize_fragment(fragment).to_owned(),
            lang: self.lang,
        }
    }

    /// Render a pending navigation.
    #[must_use]
    pub fn resolve(&self, pending: &PendingNavigation) -> PageView {
        self.site.render(&pending.fragment, pending.lang)
    }

    /// Apply a rendered page if its navigation is still the latest one.
    ///
    /// Returns `None` and leaves the session untouched for stale results.
    pub fn commit(&mut self, pending: &PendingNavigation, view: PageView) -> Option<&PageView> {
        if pending.generation != self.generation {
            tracing::debug!(
                fragment = %pending.fragment,
                generation = pending.generation,
                latest = self.generation,
                "Discarding stale navigation"
            );
            return None;
        }
        Some(self.apply(view))
    }

    /// Navigate to a fragment and commit the result.
    pub fn navigate(&mut self, fragment: &str) -> &PageView {
        let pending = self.begin_navigation(fragment);
        let view = self.resolve(&pending);
        self.apply(view)
    }

    /// Switch language, persist it and re-render the current page.
    pub fn set_lang(&mut self, lang: Lang) -> &PageView {
        self.lang = lang;
        self.preferences.save(lang);
        let fragment = self.current_fragment().unwrap_or_default().to_owned();
        self.navigate(&fragment)
    }

    fn apply(&mut self, view: PageView) -> &PageView {
        if view.lang != self.lang {
            tracing::info!(
                fragment = %view.fragment,
                from = %self.lang,
                to = %view.lang,
                "Content unavailable in current language, switching"
            );
            self.lang = view.lang;
            self.preferences.save(view.lang);
        }
        self.view.insert(view)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("lang", &self.lang)
            .field("generation", &self.generation)
            .field("fragment", &self.current_fragment())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferences;
    use crate::site::tests::{options, storage};

    /// Preferences shared between the session and the test.
    #[derive(Clone, Default)]
    struct SharedPreferences(Arc<MemoryPreferences>);

    impl PreferenceStore for SharedPreferences {
        fn load(&self) -> Option<Lang> {
            self.0.load()
        }

        fn save(&self, lang: Lang) {
            self.0.save(lang);
        }
    }

    fn site() -> Arc<Site> {
        Arc::new(Site::load(Arc::new(storage()), options()).unwrap())
    }

    #[test]
    fn test_initial_language() {
        let state = AppState::new(site(), Box::new(MemoryPreferences::new()), None);
        assert_eq!(state.lang(), Lang::Ar);

        let state = AppState::new(site(), Box::new(MemoryPreferences::with_lang(Lang::En)), None);
        assert_eq!(state.lang(), Lang::En);

        let state = AppState::new(
            site(),
            Box::new(MemoryPreferences::with_lang(Lang::En)),
            Some(Lang::Ar),
        );
        assert_eq!(state.lang(), Lang::Ar);
    }

    #[test]
    fn test_navigate_commits_view() {
        let mut state = AppState::new(site(), Box::new(MemoryPreferences::new()), None);
        let view = state.navigate("#blogs");
        assert_eq!(view.fragment, "blogs");
        assert_eq!(state.current_fragment(), Some("blogs"));
    }

    #[test]
    fn test_fallback_is_persisted() {
        let prefs = SharedPreferences::default();
        let mut state = AppState::new(site(), Box::new(prefs.clone()), Some(Lang::Ar));

        let view = state.navigate("#about");
        assert_eq!(view.lang, Lang::En);
        assert_eq!(state.lang(), Lang::En);
        assert_eq!(prefs.load(), Some(Lang::En));

        // The switch sticks for later pages.
        let view = state.navigate("#home");
        assert_eq!(view.lang, Lang::En);
    }

    #[test]
    fn test_unknown_page_switches_and_persists_language() {
        let prefs = SharedPreferences::default();
        let mut state = AppState::new(site(), Box::new(prefs.clone()), Some(Lang::Ar));

        let view = state.navigate("#unknown-slug");
        assert!(!view.found);
        assert_eq!(view.lang, Lang::En);
        assert_eq!(state.lang(), Lang::En);
        assert_eq!(prefs.load(), Some(Lang::En));
    }

    #[test]
    fn test_no_fallback_leaves_preference_alone() {
        let prefs = SharedPreferences::default();
        let mut state = AppState::new(site(), Box::new(prefs.clone()), Some(Lang::Ar));
        let _ = state.navigate("#home");
        assert_eq!(prefs.load(), None);
    }

    #[test]
    fn test_set_lang_persists_and_rerenders() {
        let prefs = SharedPreferences::default();
        let mut state = AppState::new(site(), Box::new(prefs.clone()), Some(Lang::Ar));
        let _ = state.navigate("#blogs/hello");

        let view = state.set_lang(Lang::En);
        assert_eq!(view.lang, Lang::En);
        assert_eq!(view.fragment, "blogs/hello");
        assert!(view.content.contains("<h1>Hello</h1>"));
        assert_eq!(prefs.load(), Some(Lang::En));
    }

    #[test]
    fn test_set_lang_without_page_renders_home() {
        let mut state = AppState::new(site(), Box::new(MemoryPreferences::new()), None);
        let view = state.set_lang(Lang::En);
        assert_eq!(view.fragment, "home");
        assert_eq!(view.title, "Welcome — Blog");
    }

    #[test]
    fn test_stale_navigation_is_discarded() {
        let mut state = AppState::new(site(), Box::new(MemoryPreferences::new()), Some(Lang::Ar));

        let slow = state.begin_navigation("#about");
        let fast = state.begin_navigation("#posts");
        assert!(fast.generation() > slow.generation());

        let fast_view = state.resolve(&fast);
        assert!(state.commit(&fast, fast_view).is_some());

        // The older navigation finishes last and must not overwrite the page
        // or apply its language fallback.
        let slow_view = state.resolve(&slow);
        assert_eq!(slow_view.lang, Lang::En);
        assert!(state.commit(&slow, slow_view).is_none());

        assert_eq!(state.current_fragment(), Some("posts"));
        assert_eq!(state.lang(), Lang::Ar);
    }

    #[test]
    fn test_pending_navigation_normalizes_fragment() {
        let mut state = AppState::new(site(), Box::new(MemoryPreferences::new()), None);
        let pending = state.begin_navigation("#");
        assert_eq!(pending.fragment(), "home");
        assert_eq!(pending.lang(), Lang::Ar);
    }
}
