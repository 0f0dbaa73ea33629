//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure; this
//! module assembles them into the service router with the shared layers.

pub mod analysis;

use std::time::Duration;

use axum::{routing::get, Router};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::{AppConfig, ServerConfig};

// Re-export key types for convenience
pub use analysis::{analysis_routes, AnalysisApiError, AnalysisAppState};

/// Build the full service router.
///
/// # Routes
///
/// - `GET /` - Service banner
/// - `/api/dss/*` - Analysis endpoints
pub fn app_router(config: &AppConfig) -> Router {
    let state = AnalysisAppState::new(config.analysis.clone());

    Router::new()
        .route("/", get(analysis::handlers::service_banner))
        .nest("/api/dss", analysis_routes())
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured origins, or permissive when none are configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}
