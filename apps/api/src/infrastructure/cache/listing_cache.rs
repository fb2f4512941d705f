use super::traits::EphemeralStore;
use serde::{Serialize, de::DeserializeOwned};
use std::{future::Future, sync::Arc};
use tracing::{debug, error, warn};

/// Counter bumped on every write that can change a listing page.
const GENERATION_KEY: &str = "projects:generation";

const LISTING_PREFIX: &str = "projects:list";

/// Lock TTL in seconds. Short-lived so a crashed holder cannot wedge the key.
const LOCK_TTL_SECONDS: u64 = 10;

const LOCK_RETRY_INTERVAL_MS: u64 = 50;

/// 20 * 50ms = 1 second max wait for a peer to fill the cache.
const LOCK_MAX_RETRIES: u32 = 20;

/// Extra lifetime of the stale copy beyond the main TTL.
const STALE_EXTENSION_SECONDS: u64 = 60;

/// Fetch-through cache for listing pages.
///
/// Keys embed a generation number, so invalidation is a single `INCR`: every
/// page cached under the previous generation becomes unreachable and expires
/// on its own.
///
/// Store failures are degraded, never fatal: the request falls through to the
/// repository and the failure is logged. Errors from the fetch itself are
/// always propagated.
pub struct ListingCache {
    store: Arc<dyn EphemeralStore>,
    ttl_seconds: u64,
}

impl ListingCache {
    pub fn new(store: Arc<dyn EphemeralStore>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    pub fn is_enabled(&self) -> bool {
        self.ttl_seconds > 0
    }

    async fn generation(&self) -> anyhow::Result<i64> {
        match self.store.get(GENERATION_KEY).await? {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(0),
        }
    }

    /// Drops every cached page. Logged and swallowed on failure; pages then
    /// age out after their TTL.
    pub async fn invalidate(&self) {
        if !self.is_enabled() {
            return;
        }
        match self.store.incr(GENERATION_KEY, None).await {
            Ok(generation) => debug!("Listing cache generation bumped to {}", generation),
            Err(e) => warn!(
                "Failed to invalidate listing cache: {}. Pages may be stale for up to {}s.",
                e, self.ttl_seconds
            ),
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match self.store.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T, ttl: u64) -> anyhow::Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set_ex(key, &json, ttl).await
    }

    /// Returns the cached page for `fragment`, or runs `fetch_fn` and caches it.
    ///
    /// On a miss only the lock winner fetches; concurrent callers wait briefly
    /// for it, then fall back to the stale copy, then to a direct fetch.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, fragment: &str, fetch_fn: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.is_enabled() {
            return fetch_fn().await;
        }

        let key = match self.generation().await {
            Ok(generation) => format!("{}:v{}:{}", LISTING_PREFIX, generation, fragment),
            Err(e) => {
                error!("Listing cache unavailable: {}. Bypassing cache entirely.", e);
                return fetch_fn().await;
            }
        };

        match self.read::<T>(&key).await {
            Ok(Some(cached)) => {
                debug!("Cache HIT for key={}", key);
                return Ok(cached);
            }
            Ok(None) => debug!("Cache MISS for key={}", key),
            Err(e) => {
                error!("Cache GET failed for key={}: {}. Bypassing cache.", key, e);
                return fetch_fn().await;
            }
        }

        let stale_key = format!("{}:stale", key);
        let lock_key = format!("{}:lock", key);

        let lock_acquired = self
            .store
            .set_if_absent(&lock_key, "1", LOCK_TTL_SECONDS)
            .await
            .unwrap_or_else(|e| {
                error!(
                    "Lock acquisition failed for key={}: {}. Treating as not acquired.",
                    lock_key, e
                );
                false
            });

        if lock_acquired {
            let result = fetch_fn().await;

            if let Ok(value) = &result {
                if let Err(e) = self.write(&key, value, self.ttl_seconds).await {
                    error!("Failed to write cache for key={}: {}. Response served uncached.", key, e);
                }
                if let Err(e) = self
                    .write(&stale_key, value, self.ttl_seconds + STALE_EXTENSION_SECONDS)
                    .await
                {
                    warn!("Failed to write stale copy for key={}: {}", key, e);
                }
            }

            if let Err(e) = self.store.delete(&lock_key).await {
                warn!(
                    "Failed to release lock for key={}: {}. It expires in {}s.",
                    key, e, LOCK_TTL_SECONDS
                );
            }

            return result;
        }

        for attempt in 0..LOCK_MAX_RETRIES {
            tokio::time::sleep(std::time::Duration::from_millis(LOCK_RETRY_INTERVAL_MS)).await;
            match self.read::<T>(&key).await {
                Ok(Some(cached)) => {
                    debug!("Cache filled by peer on attempt {} for key={}", attempt, key);
                    return Ok(cached);
                }
                Ok(None) => continue,
                Err(e) => {
                    error!("Cache failed while waiting for key={}: {}", key, e);
                    break;
                }
            }
        }

        match self.read::<T>(&stale_key).await {
            Ok(Some(stale)) => {
                warn!("Serving STALE listing for key={}", key);
                return Ok(stale);
            }
            Ok(None) => debug!("No stale copy for key={}", key),
            Err(e) => error!("Failed reading stale key={}: {}", stale_key, e),
        }

        warn!("Listing cache could not serve key={}, fetching directly", key);
        fetch_fn().await
    }
}
