use super::*;

impl AuthorizationService {
    /// Returns whether the user holds an active scoped grant for the named
    /// permission on the questionnaire.
    ///
    /// Unknown names fail with `PermissionNotFound`.
    pub async fn can_do(
        &self,
        user_id: UserId,
        questionnaire_id: QuestionnaireId,
        permission_name: &str,
    ) -> AppResult<bool> {
        let permission = self.resolve_kind(permission_name)?;
        self.has_scoped_permission(user_id, questionnaire_id, permission)
            .await
    }

    /// Returns whether one of the user's roles carries an active grant for
    /// the permission on the questionnaire.
    pub async fn has_scoped_permission(
        &self,
        user_id: UserId,
        questionnaire_id: QuestionnaireId,
        permission: PermissionKind,
    ) -> AppResult<bool> {
        let roles = self.grant_repository.list_roles_for_user(user_id).await?;
        if roles.is_empty() {
            debug!(%user_id, %questionnaire_id, permission = %permission, "no roles assigned");
            return Ok(false);
        }

        let role_ids = roles.iter().map(|role| role.id).collect::<Vec<_>>();
        let grants = self
            .grant_repository
            .list_scoped_grants_for_roles(&role_ids, questionnaire_id)
            .await?;

        let now = self.clock.now();
        let allowed = grants
            .iter()
            .any(|grant| grant.authorizes(questionnaire_id, permission, now));

        debug!(
            %user_id,
            %questionnaire_id,
            permission = %permission,
            allowed,
            "scoped permission checked"
        );

        Ok(allowed)
    }
}
