//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{get_image, upload_image, AppState};
use super::middleware::create_cors_layer;
use crate::config::Config;

/// Create the main router: API routes, health check and static image hosting.
pub fn create_router(app_state: Arc<AppState>, config: &Config) -> Router {
    let body_limit =
        usize::try_from(config.storage.max_upload_size_bytes()).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .route("/getImage", get(get_image))
        .route("/upload", post(upload_image));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .merge(create_health_router());

    if config.web.serve_static {
        router = router.fallback_service(create_static_service(&config.storage.public_dir));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.web.cors_origins))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}

/// Serve the files of the public directory at `/<filename>`.
pub fn create_static_service(public_dir: impl AsRef<Path>) -> ServeDir {
    ServeDir::new(public_dir)
}

/// Create a health check router.
pub fn create_health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_router(temp_dir: &TempDir, serve_static: bool) -> Router {
        let mut config = Config::default();
        config.storage.public_dir = temp_dir.path().join("public").display().to_string();
        config.storage.staging_dir = temp_dir.path().join("uploads").display().to_string();
        config.web.serve_static = serve_static;

        let state = AppState::from_config(&config.storage).unwrap();
        create_router(Arc::new(state), &config)
    }

    #[tokio::test]
    async fn test_health_check() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir, true);

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_static_file_served() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir, true);
        std::fs::write(temp_dir.path().join("public").join("tom.jpg"), b"tom").unwrap();

        let response = router
            .oneshot(Request::get("/tom.jpg").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"tom");
    }

    #[tokio::test]
    async fn test_static_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir, false);
        std::fs::write(temp_dir.path().join("public").join("tom.jpg"), b"tom").unwrap();

        let response = router
            .oneshot(Request::get("/tom.jpg").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers_applied() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir, true);

        let response = router
            .oneshot(
                Request::get("/api/getImage?name=tom")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
