use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    cache: &'static str,
    version: &'static str,
}

/// Healthy when the project store answers. A failing cache only degrades
/// the service, so it is reported but does not flip the status.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_status = match &state.db {
        Some(db) => match sqlx::query("SELECT 1").execute(db).await {
            Ok(_) => "up",
            Err(e) => {
                tracing::error!("Health check failed: Database unreachable: {}", e);
                "down"
            }
        },
        None => "memory",
    };

    let cache_status = match state.store.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!("Health check: cache unreachable: {}", e);
            "down"
        }
    };

    let status = if db_status == "down" {
        "unhealthy"
    } else {
        "healthy"
    };

    let response = HealthResponse {
        status,
        database: db_status,
        cache: cache_status,
        version: env!("CARGO_PKG_VERSION"),
    };

    let code = if status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
