use crate::domain::project::{
    entity::Project,
    errors::DomainError,
    listing::{ListingQuery, SortOption},
    repository::ProjectRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Columns of a `Project`, with the like count derived from `project_likes`.
const PROJECT_COLUMNS: &str = "p.id, p.title, p.description, p.category, p.url, p.image_url, p.views, \
     (SELECT COUNT(*) FROM project_likes pl WHERE pl.project_id = p.id)::bigint AS likes_count, \
     p.created_at";

pub struct SqlxProjectRepository {
    pub pool: PgPool,
}

impl SqlxProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxProjectRepository with connection pool");
        Self { pool }
    }
}

/// Escapes `LIKE` metacharacters so user text is matched literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn apply_listing_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    query: &ListingQuery,
    now: DateTime<Utc>,
) {
    qb.push(" WHERE TRUE");

    if let Some(category) = query.category {
        qb.push(" AND p.category = ")
            .push_bind(category.as_str().to_string());
    }

    if let Some(cutoff) = query.time_range.cutoff(now) {
        qb.push(" AND p.created_at >= ").push_bind(cutoff);
    }

    if let Some(search) = query.search.as_deref() {
        let pattern = like_pattern(search);
        qb.push(" AND (p.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR p.description ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR p.category ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
}

fn order_clause(sort: SortOption) -> &'static str {
    match sort {
        SortOption::MostLiked => " ORDER BY likes_count DESC, p.created_at DESC, p.id DESC",
        SortOption::MostViewed => " ORDER BY p.views DESC, p.created_at DESC, p.id DESC",
        SortOption::Newest => " ORDER BY p.created_at DESC, p.id DESC",
    }
}

fn infra(context: &str, e: sqlx::Error) -> DomainError {
    error!("{}: {}", context, e);
    DomainError::InfrastructureError(format!("{}: {}", context, e))
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepository {
    #[instrument(skip(self, project), fields(project_id = %project.id))]
    async fn create(&self, project: &Project) -> Result<Project, DomainError> {
        let created = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, title, description, category, url, image_url, views, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, title, description, category, url, image_url, views,
                       0::bigint AS likes_count, created_at",
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.category)
        .bind(&project.url)
        .bind(&project.image_url)
        .bind(project.views)
        .bind(project.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| infra("Failed to create project", e))?;

        info!("Created project {} ({})", created.id, created.title);
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, DomainError> {
        let sql = format!("SELECT {} FROM projects p WHERE p.id = $1", PROJECT_COLUMNS);
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infra("Failed to load project", e))
    }

    #[instrument(skip(self), fields(sort = query.sort.as_str(), time = query.time_range.as_str()))]
    async fn list(
        &self,
        query: &ListingQuery,
        now: DateTime<Utc>,
    ) -> Result<(Vec<Project>, i64), DomainError> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*)::bigint FROM projects p");
        apply_listing_filters(&mut count_qb, query, now);
        let total: i64 = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| infra("Listing count query failed", e))?;

        let mut data_qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM projects p",
            PROJECT_COLUMNS
        ));
        apply_listing_filters(&mut data_qb, query, now);
        data_qb.push(order_clause(query.sort));
        data_qb.push(" LIMIT ").push_bind(query.limit);
        data_qb.push(" OFFSET ").push_bind(query.offset);

        let projects = data_qb
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| infra("Listing query failed", e))?;

        debug!("Listing matched {} projects, returning {}", total, projects.len());
        Ok((projects, total))
    }

    async fn increment_views(&self, id: Uuid) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE projects SET views = views + 1 WHERE id = $1 RETURNING views",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infra("Failed to record view", e))?
        .ok_or_else(|| DomainError::NotFound(format!("Project {}", id)))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::bigint FROM projects")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| infra("Failed to count projects", e))
    }
}
