//! Root status endpoint.
//!
//! Reports that the orchestrator is awake, along with the configured title
//! and debug flag. Doubles as the liveness probe for container orchestration
//! and load balancers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Payload returned by the root handler.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
    pub debug: bool,
}

/// Root status handler.
///
/// Stateless and side-effect-free, safe for concurrent invocation.
pub async fn root(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "awake",
        message: format!("{} online 🌕", state.settings.project_name),
        debug: state.settings.debug,
    })
}
