//! Image name normalization.

use std::fmt;
use std::path::{Component, Path};

use thiserror::Error;

/// Extension given to every stored image, whatever the uploaded bytes are.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Errors produced while normalizing a raw name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The name is absent or blank after trimming.
    #[error("name is missing")]
    Missing,
    /// The canonical filename would not be a single entry in the image directory.
    #[error("name '{0}' is not a plain file name")]
    NotPlain(String),
}

/// A normalized image name: trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageName(String);

impl ImageName {
    /// Normalize a raw, user-supplied name.
    ///
    /// No charset is enforced. The only rejection besides a blank name is a
    /// name whose filename would leave the image directory (path separators,
    /// root prefixes).
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(NameError::Missing);
        }

        let name = Self(normalized);
        let filename = name.filename();
        let mut components = Path::new(&filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == filename.as_str() => Ok(name),
            _ => Err(NameError::NotPlain(name.0)),
        }
    }

    /// The normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical filename, `<name>.jpg`.
    pub fn filename(&self) -> String {
        format!("{}.{IMAGE_EXTENSION}", self.0)
    }

    /// Consume the name, returning the normalized string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
