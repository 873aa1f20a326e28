use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use canvass_application::{PromoteSuperadminInput, SuperadminRepository};
use canvass_core::{AppError, AppResult, UserId};
use canvass_domain::{PermissionId, Superadmin, SuperadminId};

/// PostgreSQL-backed repository for the superadmin tier.
#[derive(Clone)]
pub struct PostgresSuperadminRepository {
    pool: PgPool,
}

impl PostgresSuperadminRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SuperadminRow {
    id: i64,
    user_id: i64,
    granted_by: i64,
}

impl From<SuperadminRow> for Superadmin {
    fn from(row: SuperadminRow) -> Self {
        Self {
            id: SuperadminId::new(row.id),
            user_id: UserId::new(row.user_id),
            granted_by: UserId::new(row.granted_by),
        }
    }
}

#[async_trait]
impl SuperadminRepository for PostgresSuperadminRepository {
    async fn find_superadmin_by_user(&self, user_id: UserId) -> AppResult<Option<Superadmin>> {
        let row = sqlx::query_as::<_, SuperadminRow>(
            r#"
            SELECT id, user_id, granted_by
            FROM superadmins
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to find superadmin for user '{user_id}': {error}"
            ))
        })?;

        Ok(row.map(Superadmin::from))
    }

    async fn find_superadmin(
        &self,
        superadmin_id: SuperadminId,
    ) -> AppResult<Option<Superadmin>> {
        let row = sqlx::query_as::<_, SuperadminRow>(
            r#"
            SELECT id, user_id, granted_by
            FROM superadmins
            WHERE id = $1
            "#,
        )
        .bind(superadmin_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to find superadmin '{superadmin_id}': {error}"
            ))
        })?;

        Ok(row.map(Superadmin::from))
    }

    async fn promote(&self, input: PromoteSuperadminInput) -> AppResult<Superadmin> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Persistence(format!("failed to begin transaction: {error}"))
        })?;

        let row = sqlx::query_as::<_, SuperadminRow>(
            r#"
            INSERT INTO superadmins (user_id, granted_by)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE
            SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, granted_by
            "#,
        )
        .bind(input.user_id.as_i64())
        .bind(input.granted_by.as_i64())
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to promote user '{}': {error}",
                input.user_id
            ))
        })?;

        for permission_id in &input.permission_ids {
            sqlx::query(
                r#"
                INSERT INTO superadmin_permissions (superadmin_id, permission_id)
                VALUES ($1, $2)
                ON CONFLICT (superadmin_id, permission_id) DO NOTHING
                "#,
            )
            .bind(row.id)
            .bind(permission_id.as_i64())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Persistence(format!(
                    "failed to attach permission '{permission_id}' to superadmin '{}': {error}",
                    row.id
                ))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Persistence(format!("failed to commit transaction: {error}"))
        })?;

        Ok(Superadmin::from(row))
    }

    async fn grant_global_permission(
        &self,
        superadmin_id: SuperadminId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO superadmin_permissions (superadmin_id, permission_id)
            VALUES ($1, $2)
            ON CONFLICT (superadmin_id, permission_id) DO NOTHING
            "#,
        )
        .bind(superadmin_id.as_i64())
        .bind(permission_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to attach permission '{permission_id}' to superadmin '{superadmin_id}': {error}"
            ))
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn has_global_permission(
        &self,
        superadmin_id: SuperadminId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM superadmin_permissions
                WHERE superadmin_id = $1
                    AND permission_id = $2
            )
            "#,
        )
        .bind(superadmin_id.as_i64())
        .bind(permission_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to check permission '{permission_id}' of superadmin '{superadmin_id}': {error}"
            ))
        })
    }

    async fn list_global_permissions(
        &self,
        superadmin_id: SuperadminId,
    ) -> AppResult<Vec<PermissionId>> {
        let permission_ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT permission_id
            FROM superadmin_permissions
            WHERE superadmin_id = $1
            ORDER BY permission_id
            "#,
        )
        .bind(superadmin_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to list permissions of superadmin '{superadmin_id}': {error}"
            ))
        })?;

        Ok(permission_ids.into_iter().map(PermissionId::new).collect())
    }
}
