use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::infrastructure::security::client_ip::client_ip_network;
use crate::presentation::http::{errors::AppError, state::AppState};

/// Caps project submissions per client IP per UTC day. Requests whose
/// forwarded address does not parse are rejected before they get a bucket.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let ip = match client_ip_network(request.headers()) {
        Ok(network) => network.ip().to_string(),
        Err(e) => return AppError::from(e).into_response(),
    };
    if !state.rate_limiter.check(&ip).await {
        return AppError::RateLimited.into_response();
    }
    next.run(request).await
}
