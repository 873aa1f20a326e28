use super::*;

impl AuthorizationService {
    /// Decides an action through the policy table.
    ///
    /// Questionnaire-scoped actions require `questionnaire_id`; the owner
    /// passes every one of them. Otherwise the scoped check and the
    /// superadmin override are OR-ed, skipping whichever the policy omits.
    pub async fn authorize(
        &self,
        user_id: UserId,
        action: QuestionnaireAction,
        questionnaire_id: Option<QuestionnaireId>,
    ) -> AppResult<bool> {
        let policy = action.policy();

        if action.is_questionnaire_scoped() {
            let Some(questionnaire_id) = questionnaire_id else {
                return Err(AppError::Validation(format!(
                    "action '{}' requires a questionnaire",
                    action.as_str()
                )));
            };

            if self
                .is_questionnaire_owner(user_id, questionnaire_id)
                .await?
            {
                return Ok(true);
            }

            if let Some(permission) = policy.scoped
                && self
                    .has_scoped_permission(user_id, questionnaire_id, permission)
                    .await?
            {
                return Ok(true);
            }
        }

        match policy.superadmin_override {
            Some(permission) => self.has_global_permission(user_id, permission).await,
            None => Ok(false),
        }
    }

    /// Ensures the user may perform the action.
    pub async fn require(
        &self,
        user_id: UserId,
        action: QuestionnaireAction,
        questionnaire_id: Option<QuestionnaireId>,
    ) -> AppResult<()> {
        if self.authorize(user_id, action, questionnaire_id).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(match questionnaire_id {
            Some(questionnaire_id) => format!(
                "user '{user_id}' may not '{}' questionnaire '{questionnaire_id}'",
                action.as_str()
            ),
            None => format!("user '{user_id}' may not '{}'", action.as_str()),
        }))
    }
}
