use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::warn;

use canvass_application::PermissionCatalogRepository;
use canvass_core::{AppError, AppResult};
use canvass_domain::{PermissionDefinition, PermissionId, PermissionKind};

/// PostgreSQL-backed permission catalog.
#[derive(Clone)]
pub struct PostgresPermissionCatalogRepository {
    pool: PgPool,
}

impl PostgresPermissionCatalogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: i64,
    name: String,
}

#[async_trait]
impl PermissionCatalogRepository for PostgresPermissionCatalogRepository {
    async fn seed_permissions(&self, kinds: &[PermissionKind]) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Persistence(format!("failed to begin transaction: {error}"))
        })?;

        for kind in kinds {
            sqlx::query(
                r#"
                INSERT INTO permissions (name)
                VALUES ($1)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(kind.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Persistence(format!(
                    "failed to seed permission '{}': {error}",
                    kind.as_str()
                ))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Persistence(format!("failed to commit transaction: {error}"))
        })?;

        Ok(())
    }

    async fn list_permissions(&self) -> AppResult<Vec<PermissionDefinition>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name
            FROM permissions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Persistence(format!("failed to list permissions: {error}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match PermissionKind::from_str(row.name.as_str()) {
                Ok(kind) => Some(PermissionDefinition::new(PermissionId::new(row.id), kind)),
                Err(_) => {
                    warn!(permission = %row.name, "ignoring unknown stored permission");
                    None
                }
            })
            .collect())
    }
}
