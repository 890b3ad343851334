//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use super::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: StorageHealth,
}

/// Storage backend health with optional error message.
#[derive(Debug, Serialize)]
pub struct StorageHealth {
    pub backend: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - pings the database when one is configured.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let storage = match &state.database {
        Some(db) => match db.ping().await {
            Ok(()) => StorageHealth {
                backend: "postgres",
                status: "healthy",
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "database ping failed");
                StorageHealth {
                    backend: "postgres",
                    status: "unhealthy",
                    error: Some(e.to_string()),
                }
            }
        },
        None => StorageHealth {
            backend: "memory",
            status: "healthy",
            error: None,
        },
    };

    let healthy = storage.error.is_none();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        storage,
    };

    if healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
