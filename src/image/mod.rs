//! Named image storage for Image Manager.
//!
//! This module provides:
//! - Name normalization and the canonical `<name>.jpg` filename
//! - The `ImageStore` abstraction with filesystem and in-memory backends
//! - A staging area for uploads in flight

mod fs;
mod memory;
mod name;
mod staging;
mod store;

pub use fs::FsImageStore;
pub use memory::MemoryImageStore;
pub use name::{ImageName, NameError, IMAGE_EXTENSION};
pub use staging::{StagedUpload, Staging, StagingWriter};
pub use store::ImageStore;
