//! Test helpers for Web API tests.
//!
//! Provides a router backed by temporary public and staging directories.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use tempfile::TempDir;

use image_manager::config::Config;
use image_manager::web::create_router;
use image_manager::web::handlers::AppState;

/// A test server together with the directories it works in.
pub struct TestContext {
    pub server: TestServer,
    pub config: Config,
    // Keeps the directories alive for the duration of the test.
    _temp_dir: TempDir,
}

impl TestContext {
    /// Directory holding stored images.
    pub fn public_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.storage.public_dir)
    }

    /// Directory holding staged uploads.
    pub fn staging_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.storage.staging_dir)
    }

    /// Number of files left in the staging directory.
    pub fn staged_count(&self) -> usize {
        count_entries(&self.staging_dir())
    }
}

/// Create a test configuration rooted in `temp_dir`.
pub fn create_test_config(temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.storage.public_dir = temp_dir.path().join("public").display().to_string();
    config.storage.staging_dir = temp_dir.path().join("uploads").display().to_string();
    config
}

/// Create a filesystem-backed test server.
pub fn create_test_server() -> TestContext {
    create_test_server_with(|_| {})
}

/// Create a filesystem-backed test server, adjusting the config first.
pub fn create_test_server_with(adjust: impl FnOnce(&mut Config)) -> TestContext {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(&temp_dir);
    adjust(&mut config);

    let app_state = AppState::from_config(&config.storage).expect("Failed to create app state");
    let router = create_router(Arc::new(app_state), &config);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestContext {
        server,
        config,
        _temp_dir: temp_dir,
    }
}

/// Multipart form with `content` in the `file` field.
pub fn image_form(content: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(content.to_vec())
            .file_name("photo.png")
            .mime_type("image/png"),
    )
}

/// Count the entries of a directory.
pub fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .count()
}
