//! The single-page intake UI, served from disk.

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

pub fn router(root: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(root.join("index.html")))
        .route_service("/styles.css", ServeFile::new(root.join("styles.css")))
        .route_service("/app.js", ServeFile::new(root.join("app.js")))
        .route_service("/config.js", ServeFile::new(root.join("config.js")))
        .nest_service("/static", ServeDir::new(root))
}
