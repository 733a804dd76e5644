//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for reading site resources, along with
//! [`StorageError`] for unified error handling across backends.
//!
//! # Path Convention
//!
//! Paths are relative to the site root and use `/` separators:
//! - `"config.yaml"` - site configuration
//! - `"pages/about.en.md"` - static page
//! - `"pages/blogs/_manifest.json"` - collection manifest
//! - `"pages/blogs/hello.ar.md"` - collection entry

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path (e.g. escapes the site root).
    InvalidPath,
    /// Resource exists but is not valid UTF-8 text.
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Whether the resource simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Reject paths that could escape the storage root.
///
/// # Errors
///
/// Returns `StorageErrorKind::InvalidPath` for paths containing `..`,
/// absolute paths, and empty paths.
pub fn validate_path(path: &str, backend: &'static str) -> Result<(), StorageError> {
    if path.is_empty() || path.contains("..") || path.starts_with('/') || path.contains('\\') {
        return Err(StorageError::new(StorageErrorKind::InvalidPath)
            .with_path(path)
            .with_backend(backend));
    }
    Ok(())
}

/// Read access to site resources.
///
/// This is the only way the site reaches its content: configuration,
/// manifests and markdown files are all read through it, which lets the
/// router and renderers run against in-memory content in tests.
pub trait Storage: Send + Sync {
    /// Read a text resource.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the site root (e.g., "pages/about.en.md")
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the resource doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_backend_kind_and_path() {
        let err = StorageError::not_found("pages/x.en.md").with_backend("Fs");
        assert_eq!(err.to_string(), "[Fs] Not found (path: pages/x.en.md)");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_error_kind_mapping() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StorageError::io(io, Some(PathBuf::from("config.yaml")));
        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert!(err.to_string().contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("pages/about.en.md", "Test").is_ok());
        for bad in ["", "../secret", "pages/../../etc", "/etc/passwd", "pages\\x"] {
            let err = validate_path(bad, "Test").unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::InvalidPath, "{bad}");
        }
    }
}
