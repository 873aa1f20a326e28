use super::*;

impl PostgresGrantRepository {
    pub(super) async fn list_roles_for_user_impl(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT roles.id, roles.name
            FROM access_roles AS roles
            INNER JOIN access_role_assignments AS assignments
                ON assignments.role_id = roles.id
            WHERE assignments.user_id = $1
            ORDER BY roles.id
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!("failed to list roles for user '{user_id}': {error}"))
        })?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    pub(super) async fn list_scoped_grants_for_roles_impl(
        &self,
        role_ids: &[RoleId],
        questionnaire_id: QuestionnaireId,
    ) -> AppResult<Vec<ScopedGrant>> {
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let role_ids = role_ids.iter().map(RoleId::as_i64).collect::<Vec<_>>();
        let rows = sqlx::query_as::<_, ScopedGrantRow>(
            r#"
            SELECT
                grants.id,
                grants.role_id,
                grants.questionnaire_id,
                permissions.name AS permission_name,
                grants.expire_at
            FROM access_scoped_grants AS grants
            INNER JOIN permissions
                ON permissions.id = grants.permission_id
            WHERE grants.role_id = ANY($1)
                AND grants.questionnaire_id = $2
            ORDER BY grants.id
            "#,
        )
        .bind(role_ids)
        .bind(questionnaire_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to list scoped grants on questionnaire '{questionnaire_id}': {error}"
            ))
        })?;

        rows.into_iter().map(ScopedGrant::try_from).collect()
    }

    pub(super) async fn find_scoped_grant_impl(
        &self,
        grant_id: ScopedGrantId,
    ) -> AppResult<Option<ScopedGrantRecord>> {
        let row = sqlx::query_as::<_, ScopedGrantRow>(
            r#"
            SELECT
                grants.id,
                grants.role_id,
                grants.questionnaire_id,
                permissions.name AS permission_name,
                grants.expire_at
            FROM access_scoped_grants AS grants
            INNER JOIN permissions
                ON permissions.id = grants.permission_id
            WHERE grants.id = $1
            "#,
        )
        .bind(grant_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!("failed to find scoped grant '{grant_id}': {error}"))
        })?;

        let Some(row) = row else {
            return Ok(None);
        };
        let grant = ScopedGrant::try_from(row)?;

        let assignee_ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT user_id
            FROM access_role_assignments
            WHERE role_id = $1
            ORDER BY user_id
            "#,
        )
        .bind(grant.role_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to list assignees of role '{}': {error}",
                grant.role_id
            ))
        })?;

        Ok(Some(ScopedGrantRecord {
            grant,
            assignee_ids: assignee_ids.into_iter().map(UserId::new).collect(),
        }))
    }
}
