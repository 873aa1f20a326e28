use async_trait::async_trait;
use chrono::{DateTime, Utc};

use canvass_core::{AppResult, QuestionnaireId, UserId};
use canvass_domain::{PermissionDefinition, Role, RoleId, RoleName, ScopedGrant, ScopedGrantId};

/// One scoped grant to create inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScopedGrant {
    /// Resolved catalog permission.
    pub permission: PermissionDefinition,
    /// Optional expiry instant.
    pub expire_at: Option<DateTime<Utc>>,
    /// Users whose answers become visible; only recorded for
    /// `see_selected_answers`.
    pub viewer_ids: Vec<UserId>,
}

/// Validated grant batch written as one atomic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGrantBatch {
    /// Synthesized name of the role created for this batch.
    pub role_name: RoleName,
    /// Questionnaire every grant applies to.
    pub questionnaire_id: QuestionnaireId,
    /// User bound to the new role.
    pub receiver_id: UserId,
    /// User performing the grant.
    pub granter_id: UserId,
    /// Grants attached to the new role.
    pub grants: Vec<NewScopedGrant>,
}

/// Scoped grant created by a batch, with its recorded viewers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedScopedGrant {
    /// Persisted grant.
    pub grant: ScopedGrant,
    /// Recorded viewers, empty unless the grant is `see_selected_answers`.
    pub viewer_ids: Vec<UserId>,
}

/// Outcome of a committed grant batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantReceipt {
    /// Role synthesized for the batch.
    pub role: Role,
    /// User bound to the role.
    pub receiver_id: UserId,
    /// Questionnaire every grant applies to.
    pub questionnaire_id: QuestionnaireId,
    /// Created grants in request order.
    pub grants: Vec<CreatedScopedGrant>,
}

/// Scoped grant together with the users assigned to its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedGrantRecord {
    /// Persisted grant.
    pub grant: ScopedGrant,
    /// Users assigned to the grant's role.
    pub assignee_ids: Vec<UserId>,
}

/// Repository port for synthesized roles, scoped grants and visibility lists.
#[async_trait]
pub trait GrantRepository: Send + Sync {
    /// Persists the role, its scoped grants, visibility rows and the
    /// receiver assignment in one transaction.
    ///
    /// Any failure leaves no row of the batch behind.
    async fn create_grant_batch(&self, batch: NewGrantBatch) -> AppResult<GrantReceipt>;

    /// Lists roles assigned to a user.
    async fn list_roles_for_user(&self, user_id: UserId) -> AppResult<Vec<Role>>;

    /// Lists scoped grants carried by the roles on one questionnaire.
    async fn list_scoped_grants_for_roles(
        &self,
        role_ids: &[RoleId],
        questionnaire_id: QuestionnaireId,
    ) -> AppResult<Vec<ScopedGrant>>;

    /// Finds one scoped grant and the users holding it.
    async fn find_scoped_grant(
        &self,
        grant_id: ScopedGrantId,
    ) -> AppResult<Option<ScopedGrantRecord>>;

    /// Lists viewers recorded for a scoped grant, ordered by user id.
    async fn list_viewers(&self, grant_id: ScopedGrantId) -> AppResult<Vec<UserId>>;
}
