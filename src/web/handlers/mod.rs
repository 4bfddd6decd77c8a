//! API handlers for Image Manager.

pub mod image;

pub use image::*;

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::image::{FsImageStore, ImageStore, Staging};
use crate::Result;

/// Application state shared by all handlers.
pub struct AppState {
    /// Where images are stored and looked up.
    pub store: Arc<dyn ImageStore>,
    /// Where uploads are received before being stored.
    pub staging: Staging,
    /// Maximum upload size in megabytes, reported when a body is too large.
    pub max_upload_size_mb: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: Arc<dyn ImageStore>, staging: Staging, max_upload_size_mb: u64) -> Self {
        Self {
            store,
            staging,
            max_upload_size_mb,
        }
    }

    /// Create the filesystem-backed state described by `config`.
    ///
    /// Both the public and the staging directory are created if absent.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let store = FsImageStore::new(&config.public_dir)?;
        let staging = Staging::new(&config.staging_dir)?;

        Ok(Self::new(
            Arc::new(store),
            staging,
            config.max_upload_size_mb,
        ))
    }
}
