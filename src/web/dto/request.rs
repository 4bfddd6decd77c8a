//! Request DTOs for Web API.

use serde::Deserialize;

/// Query string carrying the image name, `?name=...`.
#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    /// Raw, un-normalized name.
    #[serde(default)]
    pub name: Option<String>,
}

impl NameQuery {
    /// The raw name, empty when absent.
    pub fn raw(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
