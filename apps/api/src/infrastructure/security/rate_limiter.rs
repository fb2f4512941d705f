use super::client_ip::is_loopback;
use crate::infrastructure::cache::traits::EphemeralStore;
use std::sync::Arc;
use tracing::{debug, warn};

const WINDOW_SECONDS: u64 = 86_400;

/// Per-IP, per-UTC-day submission counter.
///
/// Fails open: if the store is down, the request is allowed and the
/// failure is logged.
pub struct RateLimiter {
    store: Arc<dyn EphemeralStore>,
    limit_per_day: u32,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn EphemeralStore>, limit_per_day: u32) -> Self {
        Self {
            store,
            limit_per_day,
        }
    }

    /// Counts one attempt for `ip` and returns whether it is within the limit.
    /// A limit of 0 disables limiting; loopback callers are never limited.
    pub async fn check(&self, ip: &str) -> bool {
        if self.limit_per_day == 0 || is_loopback(ip) {
            return true;
        }
        let date = chrono::Utc::now().format("%Y-%m-%d");
        let key = format!("rate_limit:submit:{}:{}", ip, date);
        match self.store.incr(&key, Some(WINDOW_SECONDS)).await {
            Ok(count) => {
                debug!(ip, count, limit = self.limit_per_day, "Submission rate check");
                count <= i64::from(self.limit_per_day)
            }
            Err(e) => {
                warn!("Rate limiter store failed for {}: {}. Allowing request.", ip, e);
                true
            }
        }
    }
}
