use super::*;

/// Records the visible-answer viewers of a scoped grant.
///
/// Only callable with an open transaction so the rows commit or roll back
/// together with the grant that owns them.
pub(crate) async fn record_viewers(
    transaction: &mut Transaction<'_, Postgres>,
    grant_id: ScopedGrantId,
    viewer_ids: &[UserId],
) -> AppResult<()> {
    for viewer_id in viewer_ids {
        sqlx::query(
            r#"
            INSERT INTO access_visible_answers (grant_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (grant_id, user_id) DO NOTHING
            "#,
        )
        .bind(grant_id.as_i64())
        .bind(viewer_id.as_i64())
        .execute(&mut **transaction)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to record viewer '{viewer_id}' on scoped grant '{grant_id}': {error}"
            ))
        })?;
    }

    Ok(())
}

impl PostgresGrantRepository {
    pub(super) async fn list_viewers_impl(
        &self,
        grant_id: ScopedGrantId,
    ) -> AppResult<Vec<UserId>> {
        let viewer_ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT user_id
            FROM access_visible_answers
            WHERE grant_id = $1
            ORDER BY user_id
            "#,
        )
        .bind(grant_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to list viewers of scoped grant '{grant_id}': {error}"
            ))
        })?;

        Ok(viewer_ids.into_iter().map(UserId::new).collect())
    }
}
