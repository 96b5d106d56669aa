//! rocky-server
//!
//! HTTP transport for the safety engine: intake validation, the
//! diagnostics endpoints, model and lookup proxying, and the static UI.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, header};
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

pub fn router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let static_root = state.config.resolve_static_root();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(CORS_MAX_AGE);

    Router::new()
        .route("/healthz", get(routes::health::healthz))
        .route("/readyz", get(routes::health::readyz))
        .route("/api/config", get(routes::settings::get_config))
        .route("/api/rules", get(routes::rules::list_rules))
        .route("/api/diagnostics/mock", post(routes::diagnostics::mock))
        .route("/api/diagnostics/gemini", post(routes::diagnostics::gemini))
        .route("/api/diagnostics/openai", post(routes::diagnostics::openai))
        .route(
            "/api/interactions",
            post(routes::interactions::check_interactions),
        )
        .with_state(state)
        .merge(routes::static_files::router(&static_root))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
}
