use crate::{
    application::{
        list_projects::use_case::ListProjectsUseCase, social::use_case::SocialUseCase,
        submit_project::use_case::SubmitProjectUseCase,
    },
    config::Config,
    domain::{project::repository::ProjectRepository, social::repository::LikeRepository},
    infrastructure::{
        cache::{listing_cache::ListingCache, traits::EphemeralStore, view_sessions::ViewSessions},
        security::rate_limiter::RateLimiter,
    },
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// `None` when running on the in-memory backend
    pub db: Option<PgPool>,
    pub config: Config,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub like_repo: Arc<dyn LikeRepository>,
    pub store: Arc<dyn EphemeralStore>,
    pub listing_cache: Arc<ListingCache>,
    pub view_sessions: Arc<ViewSessions>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Option<PgPool>,
        project_repo: Arc<dyn ProjectRepository>,
        like_repo: Arc<dyn LikeRepository>,
        store: Arc<dyn EphemeralStore>,
    ) -> Self {
        let listing_cache = Arc::new(ListingCache::new(
            store.clone(),
            config.listing_cache_ttl_seconds,
        ));
        let view_sessions = Arc::new(ViewSessions::new(
            store.clone(),
            config.view_session_ttl_seconds,
        ));
        let rate_limiter = Arc::new(RateLimiter::new(
            store.clone(),
            config.rate_limit_submissions_per_ip,
        ));
        Self {
            db,
            config,
            project_repo,
            like_repo,
            store,
            listing_cache,
            view_sessions,
            rate_limiter,
        }
    }

    pub fn list_projects(&self) -> ListProjectsUseCase {
        ListProjectsUseCase::new(self.project_repo.clone(), self.listing_cache.clone())
    }

    pub fn submit_project(&self) -> SubmitProjectUseCase {
        SubmitProjectUseCase::new(self.project_repo.clone(), self.listing_cache.clone())
    }

    pub fn social(&self) -> SocialUseCase {
        SocialUseCase::new(
            self.project_repo.clone(),
            self.like_repo.clone(),
            self.listing_cache.clone(),
            self.view_sessions.clone(),
        )
    }
}
