use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub backend: String,
    pub vector_store: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let backend = state.vector_store.backend();
    let reachable = match state.vector_store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, backend, "vector store not reachable");
            false
        }
    };

    let response = ReadinessResponse {
        status: if reachable { "ready" } else { "not_ready" }.into(),
        backend: backend.into(),
        vector_store: if reachable { "connected" } else { "disconnected" }.into(),
    };

    let status = if reachable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
