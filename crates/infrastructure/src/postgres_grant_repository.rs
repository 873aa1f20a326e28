use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use canvass_application::{
    CreatedScopedGrant, GrantReceipt, GrantRepository, NewGrantBatch, ScopedGrantRecord,
};
use canvass_core::{AppError, AppResult, QuestionnaireId, UserId};
use canvass_domain::{
    PermissionKind, Role, RoleId, RoleName, ScopedGrant, ScopedGrantId,
};

mod create;
mod lookup;
mod visibility;


pub(crate) use visibility::record_viewers;

/// PostgreSQL-backed repository for synthesized roles and scoped grants.
#[derive(Clone)]
pub struct PostgresGrantRepository {
    pool: PgPool,
}

impl PostgresGrantRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: i64,
    name: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: RoleId::new(row.id),
            name: RoleName::from_stored(row.name),
        }
    }
}

#[derive(Debug, FromRow)]
struct ScopedGrantRow {
    id: i64,
    role_id: i64,
    questionnaire_id: i64,
    permission_name: String,
    expire_at: Option<DateTime<Utc>>,
}

impl TryFrom<ScopedGrantRow> for ScopedGrant {
    type Error = AppError;

    fn try_from(row: ScopedGrantRow) -> Result<Self, Self::Error> {
        let permission = PermissionKind::from_str(row.permission_name.as_str()).map_err(|_| {
            AppError::Internal(format!(
                "scoped grant '{}' references unknown permission '{}'",
                row.id, row.permission_name
            ))
        })?;

        Ok(Self {
            id: ScopedGrantId::new(row.id),
            role_id: RoleId::new(row.role_id),
            questionnaire_id: QuestionnaireId::new(row.questionnaire_id),
            permission,
            expire_at: row.expire_at,
        })
    }
}

#[async_trait]
impl GrantRepository for PostgresGrantRepository {
    async fn create_grant_batch(&self, batch: NewGrantBatch) -> AppResult<GrantReceipt> {
        self.create_grant_batch_impl(batch).await
    }

    async fn list_roles_for_user(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        self.list_roles_for_user_impl(user_id).await
    }

    async fn list_scoped_grants_for_roles(
        &self,
        role_ids: &[RoleId],
        questionnaire_id: QuestionnaireId,
    ) -> AppResult<Vec<ScopedGrant>> {
        self.list_scoped_grants_for_roles_impl(role_ids, questionnaire_id)
            .await
    }

    async fn find_scoped_grant(
        &self,
        grant_id: ScopedGrantId,
    ) -> AppResult<Option<ScopedGrantRecord>> {
        self.find_scoped_grant_impl(grant_id).await
    }

    async fn list_viewers(&self, grant_id: ScopedGrantId) -> AppResult<Vec<UserId>> {
        self.list_viewers_impl(grant_id).await
    }
}
