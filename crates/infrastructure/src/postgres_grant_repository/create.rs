use super::*;

impl PostgresGrantRepository {
    pub(super) async fn create_grant_batch_impl(
        &self,
        batch: NewGrantBatch,
    ) -> AppResult<GrantReceipt> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Persistence(format!("failed to begin transaction: {error}"))
        })?;

        let role_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO access_roles (name, granted_by)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(batch.role_name.as_str())
        .bind(batch.granter_id.as_i64())
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to create role '{}': {error}",
                batch.role_name
            ))
        })?;

        let mut created = Vec::with_capacity(batch.grants.len());
        for new_grant in batch.grants {
            let grant_id = insert_scoped_grant(
                &mut transaction,
                RoleId::new(role_id),
                batch.questionnaire_id,
                new_grant.permission.id().as_i64(),
                new_grant.expire_at,
            )
            .await?;

            let viewer_ids =
                if new_grant.permission.kind() == PermissionKind::SeeSelectedAnswers {
                    record_viewers(&mut transaction, grant_id, &new_grant.viewer_ids).await?;
                    new_grant.viewer_ids
                } else {
                    Vec::new()
                };

            created.push(CreatedScopedGrant {
                grant: ScopedGrant {
                    id: grant_id,
                    role_id: RoleId::new(role_id),
                    questionnaire_id: batch.questionnaire_id,
                    permission: new_grant.permission.kind(),
                    expire_at: new_grant.expire_at,
                },
                viewer_ids,
            });
        }

        sqlx::query(
            r#"
            INSERT INTO access_role_assignments (role_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(role_id)
        .bind(batch.receiver_id.as_i64())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to assign role '{}' to user '{}': {error}",
                batch.role_name, batch.receiver_id
            ))
        })?;

        transaction.commit().await.map_err(|error| {
            AppError::Persistence(format!("failed to commit transaction: {error}"))
        })?;

        Ok(GrantReceipt {
            role: Role {
                id: RoleId::new(role_id),
                name: batch.role_name,
            },
            receiver_id: batch.receiver_id,
            questionnaire_id: batch.questionnaire_id,
            grants: created,
        })
    }
}

async fn insert_scoped_grant(
    transaction: &mut Transaction<'_, Postgres>,
    role_id: RoleId,
    questionnaire_id: QuestionnaireId,
    permission_id: i64,
    expire_at: Option<DateTime<Utc>>,
) -> AppResult<ScopedGrantId> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO access_scoped_grants (role_id, questionnaire_id, permission_id, expire_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(role_id.as_i64())
    .bind(questionnaire_id.as_i64())
    .bind(permission_id)
    .bind(expire_at)
    .fetch_one(&mut **transaction)
    .await
    .map(ScopedGrantId::new)
    .map_err(|error| {
        AppError::Persistence(format!(
            "failed to create scoped grant on questionnaire '{questionnaire_id}': {error}"
        ))
    })
}
