use super::dto::ListProjectsRequest;
use crate::domain::{
    project::{entity::Project, errors::DomainError, repository::ProjectRepository},
    shared::pagination::PaginatedResponse,
};
use crate::infrastructure::cache::listing_cache::ListingCache;
use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

pub struct ListProjectsUseCase {
    repository: Arc<dyn ProjectRepository>,
    cache: Arc<ListingCache>,
}

impl ListProjectsUseCase {
    pub fn new(repository: Arc<dyn ProjectRepository>, cache: Arc<ListingCache>) -> Self {
        Self { repository, cache }
    }

    /// One page of the listing for the given search/sort/time parameters.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        request: ListProjectsRequest,
    ) -> Result<PaginatedResponse<Project>, DomainError> {
        let query = request.into_query()?;
        let repository = self.repository.clone();

        self.cache
            .get_or_fetch(&query.cache_fragment(), || async move {
                let (items, total) = repository.list(&query, Utc::now()).await?;
                Ok::<_, DomainError>(PaginatedResponse::new(
                    items,
                    total,
                    query.limit,
                    query.offset,
                ))
            })
            .await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Project, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Project {}", id)))
    }
}
