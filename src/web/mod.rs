//! HTTP interface for Image Manager.
//!
//! This module provides the JSON API for looking up and uploading images,
//! and static hosting of the stored images.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
