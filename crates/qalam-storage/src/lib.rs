//! Content storage abstraction for Qalam.
//!
//! This crate provides a [`Storage`] trait for reading site resources
//! (configuration, manifests, markdown pages). This enables:
//!
//! - **Unit testing** of routing and rendering without touching the filesystem
//! - **Backend flexibility** (local directory today, HTTP or bundles later)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with a `read()` method
//! - [`FsStorage`] implementation rooted at a site directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind, validate_path};
