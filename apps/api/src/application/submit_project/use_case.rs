use super::dto::SubmitProjectRequest;
use crate::domain::project::{
    entity::Project, errors::DomainError, repository::ProjectRepository,
    value_objects::NewProject,
};
use crate::infrastructure::cache::listing_cache::ListingCache;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

/// Validates a submission, stores it and drops cached listing pages.
pub struct SubmitProjectUseCase {
    repository: Arc<dyn ProjectRepository>,
    cache: Arc<ListingCache>,
}

impl SubmitProjectUseCase {
    pub fn new(repository: Arc<dyn ProjectRepository>, cache: Arc<ListingCache>) -> Self {
        Self { repository, cache }
    }

    #[instrument(skip(self, request), fields(title = %request.title, category = %request.category))]
    pub async fn execute(&self, request: SubmitProjectRequest) -> Result<Project, DomainError> {
        let submission = NewProject::new(
            &request.title,
            &request.description,
            &request.category,
            &request.url,
            request.image_url.as_deref(),
        )?;

        let project = Project::from_submission(submission, Utc::now());
        let created = self.repository.create(&project).await?;
        self.cache.invalidate().await;

        info!(project_id = %created.id, "Project submitted");
        Ok(created)
    }
}
