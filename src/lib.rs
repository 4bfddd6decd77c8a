//! Image Manager
//!
//! A small HTTP service mapping names to static images: look up whether
//! `<name>.jpg` exists, or upload an image to be stored under that name.

pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{ImageManagerError, Result};
pub use image::{FsImageStore, ImageName, ImageStore, MemoryImageStore, Staging};
pub use web::WebServer;
