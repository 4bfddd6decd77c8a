//! Staging area for uploads in flight.
//!
//! Upload bodies are streamed into uniquely named files here before being
//! moved into an [`ImageStore`](super::ImageStore).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::Result;

/// Directory holding temporary upload files.
#[derive(Debug, Clone)]
pub struct Staging {
    dir: PathBuf,
}

impl Staging {
    /// Create a new Staging area in `dir`.
    ///
    /// The directory will be created if it doesn't exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    /// Get the staging directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Open a new, uniquely named staging file for writing.
    pub async fn create(&self) -> Result<StagingWriter> {
        let path = self.dir.join(Uuid::new_v4().simple().to_string());
        let file = tokio::fs::File::create(&path).await?;

        Ok(StagingWriter {
            path,
            file: Some(file),
            size: 0,
            finished: false,
        })
    }
}

/// A staging file being written.
///
/// Unless [`finish`](Self::finish) succeeds, the file is removed when the
/// writer is dropped: on write errors, on `abort`, and when the request is
/// cancelled mid-upload.
#[derive(Debug)]
pub struct StagingWriter {
    path: PathBuf,
    file: Option<tokio::fs::File>,
    size: u64,
    finished: bool,
}

impl StagingWriter {
    /// Path of the file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a chunk of the upload.
    pub async fn write(&mut self, chunk: &[u8]) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.write_all(chunk).await?;
            self.size += chunk.len() as u64;
        }
        Ok(())
    }

    /// Flush and close the file, handing over the completed upload.
    ///
    /// On error the partial file is removed.
    pub async fn finish(mut self) -> Result<StagedUpload> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }

        self.finished = true;
        Ok(StagedUpload {
            path: std::mem::take(&mut self.path),
            size: self.size,
        })
    }

    /// Drop a partially written file.
    pub fn abort(self) {
        drop(self);
    }
}

impl Drop for StagingWriter {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        // Close before removing.
        self.file.take();

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove partial staging file"
                );
            }
        }
    }
}

/// A fully received upload waiting in the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedUpload {
    /// Path of the staged file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}
