//! Search, sort and time-range semantics for the project listing.
//!
//! The in-memory backend applies these directly; the SQL backend mirrors
//! them in `ORDER BY` / `WHERE` clauses and must stay in sync.

use super::{entity::Project, errors::DomainError, value_objects::Category};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, str::FromStr};
use ts_rs::TS;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortOption {
    #[default]
    MostLiked,
    MostViewed,
    Newest,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::MostLiked => "most-liked",
            SortOption::MostViewed => "most-viewed",
            SortOption::Newest => "newest",
        }
    }

    /// Total order used by the listing. Ties fall back to recency, then id.
    pub fn compare(&self, a: &Project, b: &Project) -> Ordering {
        let primary = match self {
            SortOption::MostLiked => b.likes_count.cmp(&a.likes_count),
            SortOption::MostViewed => b.views.cmp(&a.views),
            SortOption::Newest => Ordering::Equal,
        };
        primary
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    }
}

impl FromStr for SortOption {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "most-liked" => Ok(SortOption::MostLiked),
            "most-viewed" => Ok(SortOption::MostViewed),
            "newest" => Ok(SortOption::Newest),
            other => Err(DomainError::ValidationError(format!(
                "Unknown sort option: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum TimeRange {
    #[default]
    AllTime,
    ThisMonth,
    ThisWeek,
    Today,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::AllTime => "all-time",
            TimeRange::ThisMonth => "this-month",
            TimeRange::ThisWeek => "this-week",
            TimeRange::Today => "today",
        }
    }

    /// Earliest `created_at` admitted by this range, or `None` for no bound.
    ///
    /// `today` starts at UTC midnight; week and month are rolling 7 / 30 days.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::AllTime => None,
            TimeRange::ThisMonth => Some(now - Duration::days(30)),
            TimeRange::ThisWeek => Some(now - Duration::days(7)),
            TimeRange::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc()),
        }
    }
}

impl FromStr for TimeRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all-time" => Ok(TimeRange::AllTime),
            "this-month" => Ok(TimeRange::ThisMonth),
            "this-week" => Ok(TimeRange::ThisWeek),
            "today" => Ok(TimeRange::Today),
            other => Err(DomainError::ValidationError(format!(
                "Unknown time range: {}",
                other
            ))),
        }
    }
}

/// Normalised listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Trimmed search text; `None` when the caller sent nothing or only whitespace
    pub search: Option<String>,
    pub category: Option<Category>,
    pub sort: SortOption,
    pub time_range: TimeRange,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            sort: SortOption::default(),
            time_range: TimeRange::default(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ListingQuery {
    pub fn new(
        search: Option<&str>,
        category: Option<Category>,
        sort: SortOption,
        time_range: TimeRange,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Self {
        Self {
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            category,
            sort,
            time_range,
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }

    /// Whether a project passes the search, category and time filters.
    pub fn matches(&self, project: &Project, now: DateTime<Utc>) -> bool {
        if let Some(category) = self.category {
            if project.category != category.as_str() {
                return false;
            }
        }

        if let Some(cutoff) = self.time_range.cutoff(now) {
            if project.created_at < cutoff {
                return false;
            }
        }

        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                project.title.to_lowercase().contains(&needle)
                    || project.description.to_lowercase().contains(&needle)
                    || project.category.to_lowercase().contains(&needle)
            }
        }
    }

    /// Filters, sorts and paginates. Returns the page and the unpaginated total.
    pub fn apply(&self, projects: Vec<Project>, now: DateTime<Utc>) -> (Vec<Project>, i64) {
        let mut matching: Vec<Project> = projects
            .into_iter()
            .filter(|p| self.matches(p, now))
            .collect();
        matching.sort_by(|a, b| self.sort.compare(a, b));

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect();
        (page, total)
    }

    /// Deterministic key fragment for caching this query.
    pub fn cache_fragment(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}",
            self.sort.as_str(),
            self.time_range.as_str(),
            self.category.map(|c| c.as_str()).unwrap_or("all"),
            self.limit,
            self.offset,
            self.search
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_default()
        )
    }
}
