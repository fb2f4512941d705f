use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Short-lived key/value state: cached listings, view de-duplication flags
/// and rate-limit counters. Losing it must never lose user data.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> anyhow::Result<()>;
    /// Sets the key only if it does not exist yet. Returns `true` when this call set it.
    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64)
    -> anyhow::Result<bool>;
    /// Increments a counter. When `ttl_seconds` is given, the expiry window
    /// starts with the first increment.
    async fn incr(&self, key: &str, ttl_seconds: Option<u64>) -> anyhow::Result<i64>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
    async fn ping(&self) -> anyhow::Result<()>;
}
