use super::*;

impl AuthorizationService {
    /// Returns whether the user is a superadmin holding the named global
    /// permission.
    ///
    /// A user without a superadmin record is simply not authorized.
    pub async fn can_do_as_superadmin(
        &self,
        user_id: UserId,
        permission_name: &str,
    ) -> AppResult<bool> {
        let permission = self.resolve_kind(permission_name)?;
        self.has_global_permission(user_id, permission).await
    }

    pub(super) async fn has_global_permission(
        &self,
        user_id: UserId,
        permission: PermissionKind,
    ) -> AppResult<bool> {
        let Some(superadmin) = self
            .superadmin_repository
            .find_superadmin_by_user(user_id)
            .await?
        else {
            return Ok(false);
        };

        let permission_id = self.catalog.definition_for(permission)?.id();
        let allowed = self
            .superadmin_repository
            .has_global_permission(superadmin.id, permission_id)
            .await?;

        debug!(%user_id, permission = %permission, allowed, "superadmin permission checked");

        Ok(allowed)
    }
}
