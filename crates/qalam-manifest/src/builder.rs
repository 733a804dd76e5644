//! Manifest builder.
//!
//! Scans a collection directory for `<slug>.<lang>.md` files, merges the
//! per-language front matter by slug and writes `_manifest.json`.
//!
//! Per-file problems never abort a build: files with an unknown language
//! suffix are ignored, and unreadable or malformed files and files without
//! `title` or `date` are skipped and recorded in the [`CollectionReport`].

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use qalam_config::Lang;
use qalam_frontmatter::{FrontMatter, parse_strict};

use crate::{Entry, EntryMeta, MANIFEST_FILENAME, Manifest, ManifestError};

/// Why a content file was left out of a manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Front matter lacks `title` or `date`.
    MissingFields,
    /// Front matter could not be parsed.
    InvalidFrontMatter(String),
    /// File could not be read.
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => f.write_str("missing title or date"),
            Self::InvalidFrontMatter(e) => write!(f, "invalid front matter: {e}"),
            Self::Unreadable(e) => write!(f, "unreadable: {e}"),
        }
    }
}

/// A content file left out of a manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// What happened to one collection directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// Manifest written.
    Generated {
        /// Path of the written manifest.
        path: PathBuf,
        /// Number of entries in the manifest.
        entries: usize,
    },
    /// Directory does not exist; nothing written.
    Missing,
}

/// Result of building one collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionReport {
    pub dir: PathBuf,
    pub outcome: CollectionOutcome,
    pub skipped: Vec<SkippedFile>,
}

/// Result of building several collections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub collections: Vec<CollectionReport>,
}

impl BuildReport {
    /// All skipped files across collections.
    pub fn skipped(&self) -> impl Iterator<Item = &SkippedFile> {
        self.collections.iter().flat_map(|c| c.skipped.iter())
    }
}

/// Build manifests for every directory in order.
///
/// # Errors
///
/// Stops at the first directory whose manifest cannot be written.
pub fn build_all(dirs: &[PathBuf]) -> Result<BuildReport, ManifestError> {
    let mut report = BuildReport::default();
    for dir in dirs {
        report.collections.push(build_collection(dir)?);
    }
    Ok(report)
}

/// Build and write the manifest for a single collection directory.
///
/// A missing directory is reported as [`CollectionOutcome::Missing`], not an
/// error.
///
/// # Errors
///
/// Returns `ManifestError::Write` if the manifest file cannot be written.
pub fn build_collection(dir: &Path) -> Result<CollectionReport, ManifestError> {
    if !dir.is_dir() {
        tracing::info!(dir = %dir.display(), "Collection directory not found");
        return Ok(CollectionReport {
            dir: dir.to_path_buf(),
            outcome: CollectionOutcome::Missing,
            skipped: Vec::new(),
        });
    }

    let (manifest, skipped) = scan_collection(dir)?;

    let path = dir.join(MANIFEST_FILENAME);
    fs::write(&path, manifest.to_json()?).map_err(|source| ManifestError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), entries = manifest.len(), "Wrote manifest");

    Ok(CollectionReport {
        dir: dir.to_path_buf(),
        outcome: CollectionOutcome::Generated {
            path,
            entries: manifest.len(),
        },
        skipped,
    })
}

/// Collect entries of a directory without writing anything.
///
/// # Errors
///
/// Returns `ManifestError::Pattern` if the directory path cannot be turned
/// into a glob pattern.
pub fn scan_collection(dir: &Path) -> Result<(Manifest, Vec<SkippedFile>), ManifestError> {
    let pattern = format!(
        "{}/*.*.md",
        glob::Pattern::escape(&dir.to_string_lossy())
    );

    let mut entries: Vec<Entry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skipped = Vec::new();

    for path in glob::glob(&pattern)? {
        let path = match path {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read directory entry");
                continue;
            }
        };
        let Some((slug, lang)) = slug_and_lang(&path) else {
            continue;
        };

        let meta = match read_meta(&path) {
            Ok(meta) => meta,
            Err(reason) => {
                tracing::debug!(path = %path.display(), %reason, "Skipping file");
                skipped.push(SkippedFile { path, reason });
                continue;
            }
        };

        let i = *index.entry(slug.clone()).or_insert_with(|| {
            entries.push(Entry {
                slug,
                langs: Default::default(),
            });
            entries.len() - 1
        });
        entries[i].langs.insert(lang, meta);
    }

    entries.sort_by(|a, b| b.sort_date().cmp(a.sort_date()));
    Ok((Manifest { entries }, skipped))
}

/// Split `<slug>.<lang>.md` into slug and language.
///
/// Returns `None` for names without a language suffix, with a suffix other
/// than `ar`/`en`, or with an empty slug.
#[must_use]
pub fn slug_and_lang(path: &Path) -> Option<(String, Lang)> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".md")?;
    let (slug, code) = stem.rsplit_once('.')?;
    if slug.is_empty() {
        return None;
    }
    Some((slug.to_owned(), Lang::from_code(code)?))
}

fn read_meta(path: &Path) -> Result<EntryMeta, SkipReason> {
    let content =
        fs::read_to_string(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    let front_matter = parse_strict(&content)
        .map_err(|e| SkipReason::InvalidFrontMatter(e.to_string()))?
        .meta;
    entry_meta(&front_matter).ok_or(SkipReason::MissingFields)
}

/// Map front matter onto entry metadata. `None` if `title` or `date` is
/// absent. Empty strings count as present.
fn entry_meta(front_matter: &FrontMatter) -> Option<EntryMeta> {
    let title = front_matter.get_str("title")?;
    let date = front_matter.get_str("date")?;
    Some(EntryMeta {
        title: title.to_owned(),
        date: date.to_owned(),
        excerpt: front_matter
            .get_str("excerpt")
            .unwrap_or_default()
            .to_owned(),
        tags: front_matter.get_list("tags").map(<[String]>::to_vec),
        cover: front_matter.get_str("cover").map(str::to_owned),
    })
}
