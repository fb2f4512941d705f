use crate::{
    application::social::dto::{LikeStatus, ViewRecorded},
    infrastructure::security::client_ip::{client_ip_network, extract_client_ip},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::HeaderMap,
};
use uuid::Uuid;

pub const SESSION_HEADER: &str = "x-session-id";

const MAX_SESSION_ID_LEN: usize = 128;

/// Identity used to de-duplicate views: the browser's session id when it
/// sends a usable one, else the client IP.
fn session_key(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.len() <= MAX_SESSION_ID_LEN)
        .map(|s| format!("sid:{}", s))
        .unwrap_or_else(|| format!("ip:{}", extract_client_ip(headers)))
}

pub async fn like_status(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    headers: HeaderMap,
) -> Result<Json<LikeStatus>, AppError> {
    let Path(id) = id?;
    let ip = client_ip_network(&headers)?;
    Ok(Json(state.social().like_status(id, ip).await?))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    headers: HeaderMap,
) -> Result<Json<LikeStatus>, AppError> {
    let Path(id) = id?;
    let ip = client_ip_network(&headers)?;
    Ok(Json(state.social().toggle_like(id, ip).await?))
}

pub async fn record_view(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    headers: HeaderMap,
) -> Result<Json<ViewRecorded>, AppError> {
    let Path(id) = id?;
    let key = session_key(&headers);
    Ok(Json(state.social().record_view(id, &key).await?))
}
