//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind, validate_path};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores resources in memory and counts reads, so tests can assert that
/// cached content is not fetched twice.
///
/// # Example
///
/// ```ignore
/// use qalam_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("pages/about.en.md", "# About");
///
/// assert_eq!(storage.read("pages/about.en.md").unwrap(), "# About");
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<HashMap<String, String>>,
    failing: RwLock<Vec<String>>,
    reads: RwLock<HashMap<String, usize>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Make reads of a path fail with a non-`NotFound` error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, path: impl Into<String>) -> Self {
        self.failing.write().unwrap().push(path.into());
        self
    }

    /// Add or replace a file after construction.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert(&self, path: impl Into<String>, content: impl Into<String>) {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
    }

    /// Remove a file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove(&self, path: &str) {
        self.files.write().unwrap().remove(path);
    }

    /// Number of `read` calls made for a path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn read_count(&self, path: &str) -> usize {
        self.reads.read().unwrap().get(path).copied().unwrap_or(0)
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        *self
            .reads
            .write()
            .unwrap()
            .entry(path.to_owned())
            .or_default() += 1;

        validate_path(path, BACKEND)?;

        if self.failing.read().unwrap().iter().any(|p| p == path) {
            return Err(StorageError::new(StorageErrorKind::Other)
                .with_path(path)
                .with_backend(BACKEND));
        }

        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }
}
