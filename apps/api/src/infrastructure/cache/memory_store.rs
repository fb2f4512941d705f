use super::traits::EphemeralStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// Minimum time between two full sweeps of expired entries.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Inner {
    entries: HashMap<String, Entry>,
    last_sweep: Instant,
}

impl Inner {
    /// Drops every expired entry, at most once per `SWEEP_INTERVAL`. Keys
    /// that are written once and never read again (view flags, old listing
    /// generations, daily counters) would otherwise live forever.
    fn sweep_expired(&mut self, now: Instant) {
        if now.duration_since(self.last_sweep) < SWEEP_INTERVAL {
            return;
        }
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        self.last_sweep = now;
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.entries.len(), "Swept expired entries");
        }
    }

    fn insert(&mut self, key: &str, value: String, expires_at: Option<Instant>, now: Instant) {
        self.sweep_expired(now);
        self.entries
            .insert(key.to_string(), Entry { value, expires_at });
    }
}

/// Process-local stand-in for Redis, used when `REDIS_URL` is unset.
///
/// Expired entries are dropped when read, and swept in bulk on writes.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }
}

#[async_trait]
impl EphemeralStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        match inner.entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                inner.entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        inner.insert(
            key,
            value.to_string(),
            Some(now + Duration::from_secs(ttl_seconds)),
            now,
        );
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        if inner.entries.get(key).is_some_and(|e| e.is_live(now)) {
            return Ok(false);
        }
        inner.insert(
            key,
            value.to_string(),
            Some(now + Duration::from_secs(ttl_seconds)),
            now,
        );
        Ok(true)
    }

    async fn incr(&self, key: &str, ttl_seconds: Option<u64>) -> Result<i64> {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        let current = match inner.entries.get(key) {
            Some(entry) if entry.is_live(now) => Some((
                entry
                    .value
                    .parse::<i64>()
                    .map_err(|e| anyhow::anyhow!("value at {} is not a counter: {}", key, e))?,
                entry.expires_at,
            )),
            _ => None,
        };

        let (count, expires_at) = match current {
            Some((value, expires_at)) => (value + 1, expires_at),
            None => (1, ttl_seconds.map(|ttl| now + Duration::from_secs(ttl))),
        };
        inner.insert(key, count.to_string(), expires_at, now);
        Ok(count)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.lock().await.entries.remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
