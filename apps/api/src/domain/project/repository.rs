use super::entity::Project;
use super::errors::DomainError;
use super::listing::ListingQuery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: &Project) -> Result<Project, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, DomainError>;
    /// Returns one page of matching projects plus the total number of matches.
    async fn list(
        &self,
        query: &ListingQuery,
        now: DateTime<Utc>,
    ) -> Result<(Vec<Project>, i64), DomainError>;
    /// Adds one view and returns the new counter, or `NotFound`.
    async fn increment_views(&self, id: Uuid) -> Result<i64, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}
