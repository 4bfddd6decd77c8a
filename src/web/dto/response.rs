//! Response DTOs for Web API.

use serde::Serialize;

/// Lookup response.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    /// Canonical filename of the stored image.
    pub filename: String,
}

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Always `true`; failures are reported through the error body instead.
    pub ok: bool,
    /// Canonical filename the upload was saved under.
    pub filename: String,
    /// Human-readable confirmation.
    pub message: String,
}

impl UploadResponse {
    /// Create a response for an image saved under `filename`.
    pub fn saved(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            ok: true,
            message: format!("Saved {filename} to /public"),
            filename,
        }
    }
}
