use async_trait::async_trait;
use canvass_core::{AppResult, QuestionnaireId, UserId};

/// Read-only view of platform users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns whether the user exists.
    async fn user_exists(&self, user_id: UserId) -> AppResult<bool>;
}

/// Read-only view of questionnaires and their owners.
#[async_trait]
pub trait QuestionnaireDirectory: Send + Sync {
    /// Returns the owner, or `None` when the questionnaire does not exist.
    async fn find_owner(&self, questionnaire_id: QuestionnaireId) -> AppResult<Option<UserId>>;
}
