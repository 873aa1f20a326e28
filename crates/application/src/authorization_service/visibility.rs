use super::*;

impl AuthorizationService {
    /// Lists the viewers recorded on a scoped grant.
    ///
    /// The caller must hold the grant's role, own its questionnaire, or be a
    /// superadmin allowed to see every answer.
    pub async fn list_viewers(
        &self,
        actor_id: UserId,
        grant_id: ScopedGrantId,
    ) -> AppResult<Vec<UserId>> {
        let record = self
            .grant_repository
            .find_scoped_grant(grant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("scoped grant '{grant_id}' not found")))?;

        let allowed = record.assignee_ids.contains(&actor_id)
            || self
                .is_questionnaire_owner(actor_id, record.grant.questionnaire_id)
                .await?
            || self
                .has_global_permission(actor_id, PermissionKind::SuperadminSeeAllAnswers)
                .await?;

        if !allowed {
            return Err(AppError::Forbidden(format!(
                "user '{actor_id}' may not read viewers of scoped grant '{grant_id}'"
            )));
        }

        self.grant_repository.list_viewers(grant_id).await
    }

    /// Returns every user whose answers the user may see on the
    /// questionnaire through active `see_selected_answers` grants.
    pub async fn visible_answer_users(
        &self,
        user_id: UserId,
        questionnaire_id: QuestionnaireId,
    ) -> AppResult<BTreeSet<UserId>> {
        let roles = self.grant_repository.list_roles_for_user(user_id).await?;
        if roles.is_empty() {
            return Ok(BTreeSet::new());
        }

        let role_ids = roles.iter().map(|role| role.id).collect::<Vec<_>>();
        let now = self.clock.now();
        let grants = self
            .grant_repository
            .list_scoped_grants_for_roles(&role_ids, questionnaire_id)
            .await?;

        let mut visible = BTreeSet::new();
        for grant in grants.iter().filter(|grant| {
            grant.authorizes(questionnaire_id, PermissionKind::SeeSelectedAnswers, now)
        }) {
            visible.extend(self.grant_repository.list_viewers(grant.id).await?);
        }

        Ok(visible)
    }
}
