use crate::domain::project::errors::DomainError;
use axum::http::HeaderMap;
use sqlx::types::ipnetwork::IpNetwork;
use std::net::IpAddr;

/// Best-effort client address: first `x-forwarded-for` hop, then `x-real-ip`,
/// then loopback.
pub fn extract_client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("127.0.0.1")
        .to_string()
}

/// The client address as a single-host network, the form stored with likes.
pub fn client_ip_network(headers: &HeaderMap) -> Result<IpNetwork, DomainError> {
    let raw = extract_client_ip(headers);
    raw.parse::<IpAddr>()
        .map(IpNetwork::from)
        .map_err(|_| DomainError::ValidationError(format!("Invalid client address: {}", raw)))
}

pub fn is_loopback(ip: &str) -> bool {
    ip.parse::<IpAddr>().is_ok_and(|addr| addr.is_loopback())
}
