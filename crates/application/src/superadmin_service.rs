use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use canvass_core::{AccessError, AppResult, UserId};
use canvass_domain::{
    AuditAction, PermissionDefinition, PermissionKind, PermissionScope, QuestionnaireAction,
    Superadmin, SuperadminId,
};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, PromoteSuperadminInput,
    SuperadminRepository, UserDirectory,
};


/// Superadmin record with its resolved global permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperadminProfile {
    /// Promotion record.
    pub superadmin: Superadmin,
    /// Attached global permissions ordered by catalog identifier.
    pub permissions: Vec<PermissionKind>,
}

/// Application service managing the global superadmin tier.
#[derive(Clone)]
pub struct SuperadminService {
    authorization_service: AuthorizationService,
    user_directory: Arc<dyn UserDirectory>,
    repository: Arc<dyn SuperadminRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl SuperadminService {
    /// Creates a new superadmin service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        user_directory: Arc<dyn UserDirectory>,
        repository: Arc<dyn SuperadminRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            user_directory,
            repository,
            audit_repository,
        }
    }

    /// Promotes a user to superadmin and attaches global permissions.
    ///
    /// Promoting an existing superadmin reuses its record and only adds the
    /// permissions it is missing.
    pub async fn promote(
        &self,
        actor_id: UserId,
        user_id: UserId,
        permission_names: &[String],
    ) -> AppResult<SuperadminProfile> {
        if !self
            .authorization_service
            .authorize(actor_id, QuestionnaireAction::PromoteSuperadmin, None)
            .await?
        {
            return Err(AccessError::NotAuthorizedToPromote(actor_id).into());
        }

        let profile = self
            .promote_unchecked(actor_id, user_id, permission_names)
            .await?;

        info!(%actor_id, %user_id, superadmin_id = %profile.superadmin.id, "superadmin promoted");

        Ok(profile)
    }

    /// Promotes the configured bootstrap user with every global permission.
    ///
    /// Runs without a caller check; repeating it is a no-op.
    pub async fn bootstrap(&self, user_id: UserId) -> AppResult<SuperadminProfile> {
        if let Some(superadmin) = self.repository.find_superadmin_by_user(user_id).await? {
            let profile = self.profile_of(superadmin).await?;
            if PermissionKind::global().all(|kind| profile.permissions.contains(&kind)) {
                return Ok(profile);
            }
        }

        let names = PermissionKind::global()
            .map(|kind| kind.as_str().to_owned())
            .collect::<Vec<_>>();

        let profile = self.promote_unchecked(user_id, user_id, &names).await?;

        info!(%user_id, superadmin_id = %profile.superadmin.id, "bootstrap superadmin ensured");

        Ok(profile)
    }

    /// Attaches one more global permission to an existing superadmin.
    ///
    /// Attaching a permission that is already present changes nothing.
    pub async fn grant_global_permission(
        &self,
        actor_id: UserId,
        superadmin_id: SuperadminId,
        permission_name: &str,
    ) -> AppResult<SuperadminProfile> {
        if !self
            .authorization_service
            .authorize(actor_id, QuestionnaireAction::PromoteSuperadmin, None)
            .await?
        {
            return Err(AccessError::NotAuthorizedToPromote(actor_id).into());
        }

        let superadmin = self
            .repository
            .find_superadmin(superadmin_id)
            .await?
            .ok_or(AccessError::SuperadminNotFound(superadmin_id.as_i64()))?;
        let permission = self.resolve_global(permission_name)?;

        let inserted = self
            .repository
            .grant_global_permission(superadmin.id, permission.id())
            .await?;

        if inserted {
            self.record_event(AuditEvent {
                actor_id,
                action: AuditAction::SuperadminPermissionGranted,
                resource_type: "superadmin".to_owned(),
                resource_id: superadmin.id.to_string(),
                detail: Some(format!(
                    "attached '{}' to superadmin user '{}'",
                    permission.name(),
                    superadmin.user_id
                )),
            })
            .await;
        }

        self.profile_of(superadmin).await
    }

    /// Returns a superadmin with its attached permissions.
    pub async fn profile(&self, superadmin_id: SuperadminId) -> AppResult<SuperadminProfile> {
        let superadmin = self
            .repository
            .find_superadmin(superadmin_id)
            .await?
            .ok_or(AccessError::SuperadminNotFound(superadmin_id.as_i64()))?;

        self.profile_of(superadmin).await
    }

    /// Returns a profile to the superadmin itself or to a caller allowed to
    /// promote.
    ///
    /// The caller is checked before the record is looked up, so a refused
    /// caller cannot tell existing ids from missing ones.
    pub async fn profile_for(
        &self,
        actor_id: UserId,
        superadmin_id: SuperadminId,
    ) -> AppResult<SuperadminProfile> {
        let own_record = self
            .repository
            .find_superadmin_by_user(actor_id)
            .await?
            .is_some_and(|superadmin| superadmin.id == superadmin_id);

        if !own_record {
            self.authorization_service
                .require(actor_id, QuestionnaireAction::PromoteSuperadmin, None)
                .await?;
        }

        self.profile(superadmin_id).await
    }

    /// Lists the global permissions attached to a superadmin.
    pub async fn list_global_permissions(
        &self,
        superadmin_id: SuperadminId,
    ) -> AppResult<Vec<PermissionKind>> {
        self.profile(superadmin_id)
            .await
            .map(|profile| profile.permissions)
    }

    async fn promote_unchecked(
        &self,
        actor_id: UserId,
        user_id: UserId,
        permission_names: &[String],
    ) -> AppResult<SuperadminProfile> {
        if !self.user_directory.user_exists(user_id).await? {
            return Err(AccessError::UserNotFound(user_id).into());
        }

        if permission_names.is_empty() {
            return Err(AccessError::PermissionsFieldRequired.into());
        }

        let permissions = permission_names
            .iter()
            .map(|name| self.resolve_global(name))
            .collect::<AppResult<Vec<_>>>()?;
        let permission_ids = permissions
            .iter()
            .map(PermissionDefinition::id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let superadmin = self
            .repository
            .promote(PromoteSuperadminInput {
                user_id,
                granted_by: actor_id,
                permission_ids,
            })
            .await?;

        self.record_event(AuditEvent {
            actor_id,
            action: AuditAction::SuperadminPromoted,
            resource_type: "superadmin".to_owned(),
            resource_id: superadmin.id.to_string(),
            detail: Some(format!(
                "promoted user '{user_id}' with [{}]",
                permissions
                    .iter()
                    .map(PermissionDefinition::name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        })
        .await;

        self.profile_of(superadmin).await
    }

    /// Appends an audit event for a change that is already committed.
    async fn record_event(&self, event: AuditEvent) {
        let action = event.action;
        if let Err(error) = self.audit_repository.append_event(event).await {
            warn!(%error, action = action.as_str(), "failed to record superadmin audit event");
        }
    }

    fn resolve_global(&self, permission_name: &str) -> AppResult<PermissionDefinition> {
        let permission = self.authorization_service.catalog().find(permission_name)?;
        if permission.kind().scope() != PermissionScope::Global {
            return Err(AccessError::PermissionNotFound(permission_name.to_owned()).into());
        }

        Ok(permission)
    }

    async fn profile_of(&self, superadmin: Superadmin) -> AppResult<SuperadminProfile> {
        let catalog = self.authorization_service.catalog();
        let permissions = self
            .repository
            .list_global_permissions(superadmin.id)
            .await?
            .into_iter()
            .filter_map(|permission_id| catalog.kind_of(permission_id))
            .collect();

        Ok(SuperadminProfile {
            superadmin,
            permissions,
        })
    }
}
