//! Configuration module for Image Manager.

use serde::Deserialize;
use std::path::Path;

use crate::{ImageManagerError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Image storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the stored images; also served statically.
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    /// Directory where uploads are staged before being moved into `public_dir`.
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_staging_dir() -> String {
    "uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    10
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            staging_dir: default_staging_dir(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl StorageConfig {
    /// Maximum upload size in bytes, saturating at `u64::MAX`.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

/// Web configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether to serve the public directory at `/`.
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
}

fn default_serve_static() -> bool {
    true
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec![],
            serve_static: default_serve_static(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/image-manager.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Image storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Web configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ImageManagerError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s)
            .map_err(|e| ImageManagerError::Validation(format!("config parse error: {e}")))
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The upload size limit is zero
    /// - The public and staging directories are the same
    pub fn validate(&self) -> Result<()> {
        if self.storage.max_upload_size_mb == 0 {
            return Err(ImageManagerError::Config(
                "storage.max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        if Path::new(&self.storage.public_dir) == Path::new(&self.storage.staging_dir) {
            return Err(ImageManagerError::Config(
                "storage.public_dir and storage.staging_dir must differ".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);

        assert_eq!(config.storage.public_dir, "public");
        assert_eq!(config.storage.staging_dir, "uploads");
        assert_eq!(config.storage.max_upload_size_mb, 10);
        assert_eq!(config.storage.max_upload_size_bytes(), 10 * 1024 * 1024);

        assert!(config.web.cors_origins.is_empty());
        assert!(config.web.serve_static);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/image-manager.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[storage]
public_dir = "data/public"
staging_dir = "data/staging"
max_upload_size_mb = 25

[web]
cors_origins = ["http://localhost:5173"]
serve_static = false

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);

        assert_eq!(config.storage.public_dir, "data/public");
        assert_eq!(config.storage.staging_dir, "data/staging");
        assert_eq!(config.storage.max_upload_size_mb, 25);

        assert_eq!(config.web.cors_origins, vec!["http://localhost:5173"]);
        assert!(!config.web.serve_static);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 4000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.public_dir, "public");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.staging_dir, "uploads");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        if let Err(ImageManagerError::Validation(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(ImageManagerError::Io(_))));
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_upload_limit() {
        let mut config = Config::default();
        config.storage.max_upload_size_mb = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ImageManagerError::Config(msg)) if msg.contains("max_upload_size_mb")
        ));
    }

    #[test]
    fn test_max_upload_size_bytes_saturates() {
        let mut config = Config::default();
        config.storage.max_upload_size_mb = u64::MAX / 2;

        assert_eq!(config.storage.max_upload_size_bytes(), u64::MAX);
    }

    #[test]
    fn test_validate_same_directories() {
        let mut config = Config::default();
        config.storage.staging_dir = config.storage.public_dir.clone();

        assert!(config.validate().is_err());
    }
}
