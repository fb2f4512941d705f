pub mod listing_cache;
pub mod memory_store;
pub mod redis_store;
pub mod traits;
pub mod view_sessions;
