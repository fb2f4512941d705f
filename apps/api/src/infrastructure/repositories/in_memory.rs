use crate::domain::{
    project::{
        entity::Project, errors::DomainError, listing::ListingQuery,
        repository::ProjectRepository, value_objects::Category,
    },
    social::{like::ProjectLike, repository::LikeRepository},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::types::ipnetwork::IpNetwork;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Default)]
struct State {
    projects: HashMap<Uuid, Project>,
    likes: Vec<ProjectLike>,
}

impl State {
    fn likes_for(&self, project_id: Uuid) -> i64 {
        self.likes.iter().filter(|l| l.project_id == project_id).count() as i64
    }

    /// Project with its like count filled in from the like rows.
    fn hydrated(&self, project: &Project) -> Project {
        Project {
            likes_count: self.likes_for(project.id),
            ..project.clone()
        }
    }

    fn require(&self, project_id: Uuid) -> Result<(), DomainError> {
        if self.projects.contains_key(&project_id) {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Project {}", project_id)))
        }
    }
}

/// Process-local backend for both repositories, used when no database is
/// configured. Everything is lost on restart.
#[derive(Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with showcase projects for local runs.
    pub fn with_demo_projects(now: DateTime<Utc>) -> Self {
        let mut state = State::default();
        for (days_ago, (title, description, category, image_url, views)) in
            DEMO_PROJECTS.iter().enumerate()
        {
            let project = Project {
                id: Uuid::now_v7(),
                title: title.to_string(),
                description: description.to_string(),
                category: category.as_str().to_string(),
                url: "https://github.com".to_string(),
                image_url: Some(image_url.to_string()),
                views: *views,
                likes_count: 0,
                created_at: now - Duration::days(days_ago as i64 * 3),
            };
            state.projects.insert(project.id, project);
        }
        info!("Seeded in-memory store with {} demo projects", state.projects.len());
        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl ProjectRepository for InMemoryRepository {
    async fn create(&self, project: &Project) -> Result<Project, DomainError> {
        let mut state = self.state.write().await;
        if state.projects.contains_key(&project.id) {
            return Err(DomainError::InfrastructureError(format!(
                "Duplicate project id {}",
                project.id
            )));
        }
        let stored = Project {
            likes_count: 0,
            ..project.clone()
        };
        state.projects.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, DomainError> {
        let state = self.state.read().await;
        Ok(state.projects.get(&id).map(|p| state.hydrated(p)))
    }

    async fn list(
        &self,
        query: &ListingQuery,
        now: DateTime<Utc>,
    ) -> Result<(Vec<Project>, i64), DomainError> {
        let state = self.state.read().await;
        let all = state.projects.values().map(|p| state.hydrated(p)).collect();
        Ok(query.apply(all, now))
    }

    async fn increment_views(&self, id: Uuid) -> Result<i64, DomainError> {
        let mut state = self.state.write().await;
        let project = state
            .projects
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Project {}", id)))?;
        project.views += 1;
        Ok(project.views)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.state.read().await.projects.len() as i64)
    }
}

#[async_trait]
impl LikeRepository for InMemoryRepository {
    async fn toggle_like(
        &self,
        project_id: Uuid,
        user_ip: IpNetwork,
    ) -> Result<(bool, i64), DomainError> {
        let mut state = self.state.write().await;
        state.require(project_id)?;

        let before = state.likes.len();
        state
            .likes
            .retain(|l| !(l.project_id == project_id && l.user_ip == user_ip));
        let liked = state.likes.len() == before;
        if liked {
            state.likes.push(ProjectLike::new(project_id, user_ip));
        }
        Ok((liked, state.likes_for(project_id)))
    }

    async fn has_liked(&self, project_id: Uuid, user_ip: IpNetwork) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        state.require(project_id)?;
        Ok(state
            .likes
            .iter()
            .any(|l| l.project_id == project_id && l.user_ip == user_ip))
    }

    async fn likes_count(&self, project_id: Uuid) -> Result<i64, DomainError> {
        let state = self.state.read().await;
        state.require(project_id)?;
        Ok(state.likes_for(project_id))
    }
}

const DEMO_PROJECTS: [(&str, &str, Category, &str, i64); 8] = [
    (
        "WavePulse",
        "A smooth animation library for creating wave-like effects in your UI elements",
        Category::UiLibrary,
        "https://images.unsplash.com/photo-1633356122544-f134324a6cee?q=80&w=1470&auto=format&fit=crop",
        245,
    ),
    (
        "GradientFlow",
        "Create stunning gradient backgrounds that smoothly animate and respond to user interaction",
        Category::CssFramework,
        "https://images.unsplash.com/photo-1552083375-1447ce886485?q=80&w=1470&auto=format&fit=crop",
        187,
    ),
    (
        "NeonShadow",
        "Add neon glow effects to your UI components with this tiny JavaScript library",
        Category::UiEffects,
        "https://images.unsplash.com/photo-1537498425277-c283d32ef9db?q=80&w=1478&auto=format&fit=crop",
        320,
    ),
    (
        "PixelDrift",
        "A pixel-art animation framework for creating retro game interfaces",
        Category::Animation,
        "https://images.unsplash.com/photo-1605379399642-870262d3d051?q=80&w=1506&auto=format&fit=crop",
        156,
    ),
    (
        "VibeKit",
        "A complete design system with mood-based component variants and theme generation",
        Category::DesignSystem,
        "https://images.unsplash.com/photo-1563089145-599997674d42?q=80&w=1470&auto=format&fit=crop",
        340,
    ),
    (
        "NeuVerse",
        "A neumorphic design system with soft shadows and minimal color palette",
        Category::UiKit,
        "https://images.unsplash.com/photo-1624696941338-dcf3b6acbec6?q=80&w=1470&auto=format&fit=crop",
        223,
    ),
    (
        "EchoRipple",
        "Create interactive ripple effects that respond to audio input or music playback",
        Category::AudioVisualization,
        "https://images.unsplash.com/photo-1558655146-9f40138edfeb?q=80&w=1528&auto=format&fit=crop",
        210,
    ),
    (
        "MindfulUI",
        "A calm, accessible design system focused on reducing cognitive load and visual noise",
        Category::Accessibility,
        "https://images.unsplash.com/photo-1523726491678-bf852e717f6a?q=80&w=1470&auto=format&fit=crop",
        176,
    ),
];
