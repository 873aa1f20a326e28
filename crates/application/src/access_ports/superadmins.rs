use async_trait::async_trait;

use canvass_core::{AppResult, UserId};
use canvass_domain::{PermissionId, Superadmin, SuperadminId};

/// Input payload for one promotion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoteSuperadminInput {
    /// User being promoted.
    pub user_id: UserId,
    /// User performing the promotion.
    pub granted_by: UserId,
    /// Global permissions to attach.
    pub permission_ids: Vec<PermissionId>,
}

/// Repository port for the global superadmin tier.
#[async_trait]
pub trait SuperadminRepository: Send + Sync {
    /// Finds the promotion record of a user.
    async fn find_superadmin_by_user(&self, user_id: UserId) -> AppResult<Option<Superadmin>>;

    /// Finds a promotion record by identifier.
    async fn find_superadmin(&self, superadmin_id: SuperadminId)
    -> AppResult<Option<Superadmin>>;

    /// Promotes a user and attaches permissions in one transaction.
    ///
    /// An existing record is reused and already attached permissions are
    /// left untouched.
    async fn promote(&self, input: PromoteSuperadminInput) -> AppResult<Superadmin>;

    /// Attaches one global permission; returns `false` when it was already
    /// attached.
    async fn grant_global_permission(
        &self,
        superadmin_id: SuperadminId,
        permission_id: PermissionId,
    ) -> AppResult<bool>;

    /// Returns whether the permission is attached.
    async fn has_global_permission(
        &self,
        superadmin_id: SuperadminId,
        permission_id: PermissionId,
    ) -> AppResult<bool>;

    /// Lists attached permissions ordered by identifier.
    async fn list_global_permissions(
        &self,
        superadmin_id: SuperadminId,
    ) -> AppResult<Vec<PermissionId>>;
}
