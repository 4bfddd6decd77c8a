//! Filesystem-backed image store.
//!
//! Images live flat in a single directory that is also served statically:
//! ```text
//! {public_dir}/
//! ├── jerry.jpg
//! └── tom.jpg
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{ImageName, ImageStore};
use crate::Result;

/// Image store writing into a public directory.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    /// Directory holding the stored images.
    public_dir: PathBuf,
}

impl FsImageStore {
    /// Create a new FsImageStore rooted at `public_dir`.
    ///
    /// The directory will be created if it doesn't exist.
    pub fn new(public_dir: impl Into<PathBuf>) -> Result<Self> {
        let public_dir = public_dir.into();
        fs::create_dir_all(&public_dir)?;

        Ok(Self { public_dir })
    }

    /// Get the directory holding the stored images.
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Get the full path of the image stored under `name`.
    pub fn image_path(&self, name: &ImageName) -> PathBuf {
        self.public_dir.join(name.filename())
    }
}

impl ImageStore for FsImageStore {
    fn exists(&self, name: &ImageName) -> bool {
        self.image_path(name).is_file()
    }

    /// Relies on `rename(2)` replacing the destination atomically, which only
    /// holds when the staging directory is on the same filesystem.
    fn store(&self, name: &ImageName, staged: &Path) -> Result<()> {
        fs::rename(staged, self.image_path(name))?;
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
