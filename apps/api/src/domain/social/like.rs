use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::ipnetwork::IpNetwork;
use uuid::Uuid;

/// One viewer's like on a project. `(project_id, user_ip)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectLike {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_ip: IpNetwork,
    pub created_at: DateTime<Utc>,
}

impl ProjectLike {
    pub fn new(project_id: Uuid, user_ip: IpNetwork) -> Self {
        Self {
            id: Uuid::now_v7(),
            project_id,
            user_ip,
            created_at: Utc::now(),
        }
    }
}
