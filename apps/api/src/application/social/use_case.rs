use super::dto::{LikeStatus, ViewRecorded};
use crate::domain::{
    project::{errors::DomainError, repository::ProjectRepository},
    social::repository::LikeRepository,
};
use crate::infrastructure::cache::{listing_cache::ListingCache, view_sessions::ViewSessions};
use sqlx::types::ipnetwork::IpNetwork;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

pub struct SocialUseCase {
    projects: Arc<dyn ProjectRepository>,
    likes: Arc<dyn LikeRepository>,
    cache: Arc<ListingCache>,
    view_sessions: Arc<ViewSessions>,
}

impl SocialUseCase {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        likes: Arc<dyn LikeRepository>,
        cache: Arc<ListingCache>,
        view_sessions: Arc<ViewSessions>,
    ) -> Self {
        Self {
            projects,
            likes,
            cache,
            view_sessions,
        }
    }

    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        project_id: Uuid,
        user_ip: IpNetwork,
    ) -> Result<LikeStatus, DomainError> {
        let (liked, likes_count) = self.likes.toggle_like(project_id, user_ip).await?;
        self.cache.invalidate().await;
        Ok(LikeStatus { liked, likes_count })
    }

    pub async fn like_status(
        &self,
        project_id: Uuid,
        user_ip: IpNetwork,
    ) -> Result<LikeStatus, DomainError> {
        let liked = self.likes.has_liked(project_id, user_ip).await?;
        let likes_count = self.likes.likes_count(project_id).await?;
        Ok(LikeStatus { liked, likes_count })
    }

    /// Counts a card view unless this session already viewed the project.
    #[instrument(skip(self, session_key))]
    pub async fn record_view(
        &self,
        project_id: Uuid,
        session_key: &str,
    ) -> Result<ViewRecorded, DomainError> {
        if self.view_sessions.first_view(project_id, session_key).await {
            return match self.projects.increment_views(project_id).await {
                Ok(views) => Ok(ViewRecorded {
                    counted: true,
                    views,
                }),
                Err(e) => {
                    // The view was not recorded, so a retry must count.
                    self.view_sessions.forget(project_id, session_key).await;
                    Err(e)
                }
            };
        }

        debug!("Repeat view in session, not counted");
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Project {}", project_id)))?;
        Ok(ViewRecorded {
            counted: false,
            views: project.views,
        })
    }
}
