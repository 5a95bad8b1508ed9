//! Route definitions for the secfeed API.

pub mod compliance;
pub mod health;
pub mod metrics;
pub mod scans;
pub mod vulnerabilities;
pub mod webhook;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Maximum accepted webhook body size.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/webhook", post(webhook::ingest))
        .route("/scans", get(scans::list))
        .route("/vulnerabilities", get(vulnerabilities::list))
        .route("/metrics", get(metrics::overview))
        .route("/trends", get(metrics::trends))
        .route("/compliance/{scan_id}", get(compliance::report));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1/security", api)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
