use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::value_objects::NewProject;

/// A community-submitted showcase entry, rendered as a card in the listing.
///
/// # Invariants
/// - `views` only grows, and only through the session de-duplicated view endpoint
/// - `likes_count` is never stored; it is the number of `project_likes` rows
///   for this project at read time
/// - `image_url`, when present, is an absolute http(s) URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Project {
    /// Unique identifier (UUIDv7, so ids sort by creation time)
    pub id: Uuid,

    /// Display title
    pub title: String,

    /// Short pitch shown under the title
    pub description: String,

    /// Display name of the project category (see `Category`)
    pub category: String,

    /// Link to the live project or its repository
    pub url: String,

    /// Optional cover image
    pub image_url: Option<String>,

    /// Number of counted card views
    #[ts(type = "number")]
    pub views: i64,

    /// Number of distinct IPs that currently like this project
    #[ts(type = "number")]
    pub likes_count: i64,

    /// Submission timestamp
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Builds a fresh project from a validated submission.
    pub fn from_submission(submission: NewProject, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: submission.title,
            description: submission.description,
            category: submission.category.as_str().to_string(),
            url: submission.url,
            image_url: submission.image_url,
            views: 0,
            likes_count: 0,
            created_at,
        }
    }
}
