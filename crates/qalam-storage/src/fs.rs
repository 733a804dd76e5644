//! Filesystem storage implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{Storage, StorageError, validate_path};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at the site directory.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use qalam_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("site"));
/// let config = storage.read("config.yaml");
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Site root directory.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage.
    ///
    /// # Arguments
    ///
    /// * `root` - Site root directory
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Site root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_path(path, BACKEND)?;
        Ok(self.root.join(path))
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        let full_path = self.resolve(path)?;
        fs::read_to_string(&full_path).map_err(|e| {
            tracing::debug!(path = %full_path.display(), error = %e, "Read failed");
            StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageErrorKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_site() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("pages/blogs")).unwrap();
        fs::write(temp_dir.path().join("config.yaml"), "defaultLang: ar").unwrap();
        fs::write(
            temp_dir.path().join("pages/blogs/hello.en.md"),
            "# Hello",
        )
        .unwrap();
        temp_dir
    }

    #[test]
    fn test_read_existing_file() {
        let temp_dir = create_site();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        assert_eq!(storage.read("config.yaml").unwrap(), "defaultLang: ar");
    }

    #[test]
    fn test_read_nested_file() {
        let temp_dir = create_site();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        assert_eq!(storage.read("pages/blogs/hello.en.md").unwrap(), "# Hello");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = create_site();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read("pages/missing.en.md").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(err.path, Some(PathBuf::from("pages/missing.en.md")));
    }

    #[test]
    fn test_read_rejects_path_traversal() {
        let temp_dir = create_site();
        let storage = FsStorage::new(temp_dir.path().join("pages"));
        let err = storage.read("../config.yaml").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }
}
