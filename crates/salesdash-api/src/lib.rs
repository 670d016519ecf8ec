//! Salesdash REST API
//!
//! REST surface for the business/sales dashboard.
//!
//! # API Structure
//!
//! ```text
//! /auth          - Registration, login, token refresh
//! /dashboard     - Protected landing endpoint
//! /business      - Business data (read-only)
//! /sales         - Sales data (read-only)
//! /health, /ready
//! ```
//!
//! Access tokens travel as `Authorization: Bearer` headers; refresh tokens
//! travel only in an HTTP-only cookie.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::http::{header, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use salesdash_auth::AuthLayer;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use state::AppState;

/// API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Allowed origin for CORS (browser dashboard)
    pub cors_origin: String,
    /// Enable request tracing
    pub enable_tracing: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origin: "http://localhost:5173".to_string(),
            enable_tracing: true,
        }
    }
}

/// Create the main API router with all middleware
pub fn create_router(state: Arc<AppState>, config: ApiConfig) -> Router {
    let mut router = Router::new()
        .merge(routes::app_routes())
        .layer(AuthLayer::new(state.auth.tokens()))
        .with_state(state);

    if config.enable_tracing {
        router = router.layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        );
    }

    // The refresh cookie only flows cross-origin with credentials allowed,
    // which rules out a wildcard origin
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<axum::http::HeaderValue>()
                .unwrap_or_else(|_| axum::http::HeaderValue::from_static("http://localhost:5173")),
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    router.layer(cors)
}
