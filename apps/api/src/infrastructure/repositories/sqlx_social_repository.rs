use crate::domain::{project::errors::DomainError, social::repository::LikeRepository};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction, types::ipnetwork::IpNetwork};
use tracing::{debug, instrument};
use uuid::Uuid;

pub struct SqlxSocialRepository {
    pub pool: PgPool,
}

impl SqlxSocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_project_exists(
        tx: &mut Transaction<'_, Postgres>,
        project_id: Uuid,
    ) -> Result<(), DomainError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)",
        )
        .bind(project_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        if exists {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Project {}", project_id)))
        }
    }

    async fn count_in(
        tx: &mut Transaction<'_, Postgres>,
        project_id: Uuid,
    ) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::bigint FROM project_likes WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }
}

#[async_trait]
impl LikeRepository for SqlxSocialRepository {
    #[instrument(skip(self))]
    async fn toggle_like(
        &self,
        project_id: Uuid,
        user_ip: IpNetwork,
    ) -> Result<(bool, i64), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        Self::ensure_project_exists(&mut tx, project_id).await?;

        let removed = sqlx::query("DELETE FROM project_likes WHERE project_id = $1 AND user_ip = $2")
            .bind(project_id)
            .bind(user_ip)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
            .rows_affected();

        if removed == 0 {
            // A concurrent toggle from the same IP may have inserted first; the
            // unique constraint turns ours into a no-op.
            sqlx::query(
                "INSERT INTO project_likes (id, project_id, user_ip) VALUES ($1, $2, $3)
                 ON CONFLICT (project_id, user_ip) DO NOTHING",
            )
            .bind(Uuid::now_v7())
            .bind(project_id)
            .bind(user_ip)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        }

        let count = Self::count_in(&mut tx, project_id).await?;
        tx.commit()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        let liked = removed == 0;
        debug!(liked, count, "Like toggled");
        Ok((liked, count))
    }

    async fn has_liked(&self, project_id: Uuid, user_ip: IpNetwork) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Self::ensure_project_exists(&mut tx, project_id).await?;
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM project_likes WHERE project_id = $1 AND user_ip = $2)",
        )
        .bind(project_id)
        .bind(user_ip)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        tx.commit()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(exists)
    }

    async fn likes_count(&self, project_id: Uuid) -> Result<i64, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Self::ensure_project_exists(&mut tx, project_id).await?;
        let count = Self::count_in(&mut tx, project_id).await?;
        tx.commit()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(count)
    }
}
