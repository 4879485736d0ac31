//! HTTP route handlers.
//!
//! The service exposes a single read-only status route at the root path.
//! Router assembly also wires the shared middleware: a CORS allow-list built
//! from the configured origins and request ID tracing.

pub mod status;

use axum::{middleware, routing::get, Router};
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Settings;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and shared middleware.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new().route("/", get(status::root));

    let origins = allowed_origins(&state.settings);
    if !origins.is_empty() {
        router = router.layer(CorsLayer::new().allow_origin(AllowOrigin::list(origins)));
    }

    router
        .with_state(state)
        // Request ID middleware - creates root span for log correlation
        .layer(middleware::from_fn(request_id_layer))
}

/// Parse the configured CORS origins into header values.
///
/// Origins that are not valid header values are skipped with a warning
/// rather than failing startup.
fn allowed_origins(settings: &Settings) -> Vec<HeaderValue> {
    settings
        .cors_origin_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}
