//! Web server for Image Manager.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::{ImageManagerError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the API and the static image directory.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Configuration the router is built from.
    config: Config,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// The public and staging directories are created here if absent.
    pub fn new(config: &Config) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| ImageManagerError::Config(format!("invalid server address: {e}")))?;

        let app_state = AppState::from_config(&config.storage)?;

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            config: config.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn into_router(self) -> Router {
        create_router(self.app_state, &self.config).layer(CompressionLayer::new())
    }

    async fn bind(&self) -> std::io::Result<(TcpListener, SocketAddr)> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Backend running on http://{}", local_addr);
        tracing::info!("Static images served from {}", self.config.storage.public_dir);

        Ok((listener, local_addr))
    }

    /// Run the web server until Ctrl-C is received.
    pub async fn run(self) -> std::io::Result<()> {
        let (listener, _) = self.bind().await?;
        let router = self.into_router();

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let (listener, local_addr) = self.bind().await?;
        let router = self.into_router();

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
