use async_trait::async_trait;
use sqlx::PgPool;

use canvass_application::{QuestionnaireDirectory, UserDirectory};
use canvass_core::{AppError, AppResult, QuestionnaireId, UserId};

/// PostgreSQL-backed lookups into the user and questionnaire tables owned by
/// the rest of the platform.
#[derive(Clone)]
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresDirectory {
    async fn user_exists(&self, user_id: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM users
                WHERE id = $1
            )
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Persistence(format!("failed to resolve user '{user_id}': {error}")))
    }
}

#[async_trait]
impl QuestionnaireDirectory for PostgresDirectory {
    async fn find_owner(&self, questionnaire_id: QuestionnaireId) -> AppResult<Option<UserId>> {
        let owner_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT owner_id
            FROM questionnaires
            WHERE id = $1
            "#,
        )
        .bind(questionnaire_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to resolve questionnaire '{questionnaire_id}': {error}"
            ))
        })?;

        Ok(owner_id.map(UserId::new))
    }
}
