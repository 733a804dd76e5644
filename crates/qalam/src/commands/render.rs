//! `qalam render` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use console::Term;
use qalam_config::{CliSettings, Lang, Settings};
use qalam_site::{
    AppState, FilePreferences, MemoryPreferences, PreferenceStore, Site, SiteOptions,
};
use qalam_storage::FsStorage;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// URL fragment to render, e.g. `about` or `#blogs/hello` (default: home).
    #[arg(default_value = "")]
    fragment: String,

    /// Site root directory (default: auto-discover config.yaml).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Language to render in (overrides stored preference and defaultLang).
    #[arg(short, long)]
    lang: Option<Lang>,

    /// Write the document to this file instead of stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Public site origin for absolute URLs (overrides seo.origin).
    #[arg(long, env = "QALAM_ORIGIN")]
    origin: Option<String>,

    /// File that remembers the language between runs.
    #[arg(long, value_name = "FILE")]
    prefs: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = Settings::resolve(&CliSettings {
            root: self.root,
            lang: self.lang,
            origin: self.origin,
            ..CliSettings::default()
        })?;
        tracing::debug!(root = %settings.root.display(), lang = ?settings.lang, "Resolved settings");

        let storage = Arc::new(FsStorage::new(settings.root.clone()));
        let site = Arc::new(Site::load(storage, SiteOptions::from(&settings))?);
        let preferences: Box<dyn PreferenceStore> = match self.prefs {
            Some(path) => Box::new(FilePreferences::new(path)),
            None => Box::new(MemoryPreferences::new()),
        };

        let mut state = AppState::new(site, preferences, settings.lang);
        let view = state.navigate(&self.fragment);

        if !view.found {
            output.warning(&format!("Not found: #{}", view.fragment));
        }
        for warning in &view.warnings {
            output.warning(warning);
        }

        let document = view.to_document();
        match self.out {
            Some(path) => {
                std::fs::write(&path, document)?;
                output.success(&format!("✓ Wrote {} ({})", path.display(), view.lang));
            }
            None => Term::stdout().write_str(&document)?,
        }
        Ok(())
    }
}
