use crate::domain::project::errors::DomainError;
use async_trait::async_trait;
use sqlx::types::ipnetwork::IpNetwork;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Removes the like if `user_ip` already likes the project, otherwise adds it.
    /// Returns whether the project is liked afterwards and the new count.
    async fn toggle_like(
        &self,
        project_id: Uuid,
        user_ip: IpNetwork,
    ) -> Result<(bool, i64), DomainError>;
    async fn has_liked(&self, project_id: Uuid, user_ip: IpNetwork) -> Result<bool, DomainError>;
    async fn likes_count(&self, project_id: Uuid) -> Result<i64, DomainError>;
}
