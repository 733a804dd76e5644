//! `qalam build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use qalam_config::{CliSettings, ConfigError, Settings, SiteConfig, load_site_config};
use qalam_manifest::{CollectionOutcome, build_collection};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Site root directory (default: auto-discover config.yaml).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Collection directory to scan, relative to the root. Repeatable;
    /// overrides the collections listed in config.yaml.
    #[arg(short, long = "collection", value_name = "DIR")]
    collections: Vec<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// Per-file problems are reported and skipped; only an unwritable
    /// manifest stops the build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = Settings::resolve(&CliSettings {
            root: self.root,
            collection_dirs: self.collections,
            ..CliSettings::default()
        })?;
        let site = site_config(&settings, &output);
        let dirs = settings.builder_dirs(site.as_ref());
        tracing::debug!(root = %settings.root.display(), dirs = dirs.len(), "Resolved settings");

        output.info("Building manifests...");
        output.blank();
        build_dirs(&settings.root, &dirs, &output)?;
        output.success("Done!");
        Ok(())
    }
}

/// Load config.yaml if present. The builder works without it.
fn site_config(settings: &Settings, output: &Output) -> Option<SiteConfig> {
    match load_site_config(&settings.config_path()) {
        Ok(site) => Some(site),
        Err(ConfigError::NotFound(_)) => None,
        Err(e) => {
            output.warning(&format!("Ignoring site configuration: {e}"));
            None
        }
    }
}

fn build_dirs(root: &Path, dirs: &[PathBuf], output: &Output) -> Result<usize, CliError> {
    let mut generated = 0;
    for dir in dirs {
        let shown = dir.strip_prefix(root).unwrap_or(dir).display();
        if !dir.is_dir() {
            output.warning(&format!("Skipping {shown}/ (directory not found)"));
            output.blank();
            continue;
        }

        output.info(&format!("Scanning {shown}/"));
        let report = build_collection(dir)?;
        for skipped in &report.skipped {
            output.warning(&format!(
                "  ⚠ Skipping {}: {}",
                skipped.path.display(),
                skipped.reason
            ));
        }
        if let CollectionOutcome::Generated { path, entries } = &report.outcome {
            generated += 1;
            output.success(&format!(
                "  ✓ Generated {} ({entries} entries)",
                path.strip_prefix(root).unwrap_or(path).display()
            ));
        }
        output.blank();
    }
    Ok(generated)
}
