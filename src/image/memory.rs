//! In-memory image store.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::RwLock;

use super::{ImageName, ImageStore};
use crate::Result;

/// Image store keeping image bytes in a map keyed by canonical filename.
///
/// Staged uploads still live on disk; `store` reads the staged file into
/// memory and then deletes it.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    images: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the bytes stored under `name`.
    pub fn get(&self, name: &ImageName) -> Option<Vec<u8>> {
        self.images
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&name.filename())
            .cloned()
    }

    /// Number of stored images.
    pub fn len(&self) -> usize {
        self.images.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store holds no images.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ImageStore for MemoryImageStore {
    fn exists(&self, name: &ImageName) -> bool {
        self.images
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&name.filename())
    }

    fn store(&self, name: &ImageName, staged: &Path) -> Result<()> {
        let content = fs::read(staged)?;
        fs::remove_file(staged)?;

        self.images
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.filename(), content);
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
