//! Storage abstraction for named images.

use std::path::Path;

use super::ImageName;
use crate::Result;

/// Backend holding images under their canonical filenames.
///
/// Implementations are shared across request handlers and must be `Send + Sync`.
/// There is no locking: two concurrent `store` calls for the same name race and
/// the last one to complete wins.
pub trait ImageStore: Send + Sync {
    /// Check whether an image is stored under `name`.
    fn exists(&self, name: &ImageName) -> bool;

    /// Move the staged file at `staged` into the store under `name`.
    ///
    /// Any existing image with the same name is replaced atomically; on failure
    /// the previous image (if any) is left untouched and nothing partial is
    /// visible. On success the staged file no longer exists.
    fn store(&self, name: &ImageName, staged: &Path) -> Result<()>;

    /// Remove the file at `path`.
    ///
    /// Returns `true` if the file was removed, `false` if it didn't exist.
    fn remove(&self, path: &Path) -> Result<bool>;
}
