use super::traits::EphemeralStore;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Remembers which (project, session) pairs already produced a counted view.
pub struct ViewSessions {
    store: Arc<dyn EphemeralStore>,
    ttl_seconds: u64,
}

fn session_flag(project_id: Uuid, session_key: &str) -> String {
    format!("views:{}:{}", project_id, session_key)
}

impl ViewSessions {
    pub fn new(store: Arc<dyn EphemeralStore>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    /// `true` the first time a session views a project within the TTL.
    /// Store failures count the view.
    pub async fn first_view(&self, project_id: Uuid, session_key: &str) -> bool {
        let key = session_flag(project_id, session_key);
        match self.store.set_if_absent(&key, "1", self.ttl_seconds).await {
            Ok(first) => first,
            Err(e) => {
                warn!("View de-duplication unavailable for {}: {}. Counting view.", key, e);
                true
            }
        }
    }

    /// Clears the flag set by `first_view`, for a view that was never recorded.
    pub async fn forget(&self, project_id: Uuid, session_key: &str) {
        let key = session_flag(project_id, session_key);
        if let Err(e) = self.store.delete(&key).await {
            warn!(
                "Failed to clear view flag {}: {}. It expires in {}s.",
                key, e, self.ttl_seconds
            );
        }
    }
}
