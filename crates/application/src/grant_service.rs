use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use canvass_core::{AccessError, AppResult, QuestionnaireId, UserId};
use canvass_domain::{AuditAction, PermissionKind, PermissionScope, RoleName};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, GrantReceipt, GrantRepository,
    NewGrantBatch, NewScopedGrant, QuestionnaireDirectory, UserDirectory,
};

#[cfg(test)]
mod tests;

/// One permission requested in a grant batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantPermissionRequest {
    /// Catalog permission name.
    pub permission: String,
    /// Optional expiry instant.
    pub expire_at: Option<DateTime<Utc>>,
    /// Users whose answers become visible; required for
    /// `see_selected_answers` and ignored otherwise.
    pub viewer_ids: Vec<UserId>,
}

/// Application service creating scoped grants through synthesized roles.
#[derive(Clone)]
pub struct GrantService {
    authorization_service: AuthorizationService,
    user_directory: Arc<dyn UserDirectory>,
    questionnaire_directory: Arc<dyn QuestionnaireDirectory>,
    grant_repository: Arc<dyn GrantRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl GrantService {
    /// Creates a new grant service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        user_directory: Arc<dyn UserDirectory>,
        questionnaire_directory: Arc<dyn QuestionnaireDirectory>,
        grant_repository: Arc<dyn GrantRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            user_directory,
            questionnaire_directory,
            grant_repository,
            audit_repository,
        }
    }

    /// Grants permissions on a questionnaire to the receiver.
    ///
    /// Every precondition is checked before anything is written; the role,
    /// its grants, visibility rows and the assignment are then persisted as
    /// one unit. Earlier grants are never revoked.
    pub async fn grant_permissions(
        &self,
        granter_id: UserId,
        receiver_id: UserId,
        questionnaire_id: QuestionnaireId,
        requests: Vec<GrantPermissionRequest>,
    ) -> AppResult<GrantReceipt> {
        if !self.user_directory.user_exists(granter_id).await? {
            return Err(AccessError::GranterNotFound(granter_id).into());
        }

        let owner_id = self
            .questionnaire_directory
            .find_owner(questionnaire_id)
            .await?
            .ok_or(AccessError::ResourceNotFound(questionnaire_id))?;

        if owner_id != granter_id
            && !self
                .authorization_service
                .has_scoped_permission(
                    granter_id,
                    questionnaire_id,
                    PermissionKind::QuestionnaireGrantPermission,
                )
                .await?
        {
            warn!(%granter_id, %questionnaire_id, "grant rejected: granter may not delegate");
            return Err(AccessError::NotAuthorizedToGrant {
                granter_id,
                questionnaire_id,
            }
            .into());
        }

        if !self.user_directory.user_exists(receiver_id).await? {
            return Err(AccessError::ReceiverNotFound(receiver_id).into());
        }

        let grants = self.resolve_requests(requests).await?;
        let kinds = grants
            .iter()
            .map(|grant| grant.permission.kind())
            .collect::<Vec<_>>();
        let role_name = RoleName::synthesize(&kinds, questionnaire_id, receiver_id, granter_id);

        let receipt = self
            .grant_repository
            .create_grant_batch(NewGrantBatch {
                role_name,
                questionnaire_id,
                receiver_id,
                granter_id,
                grants,
            })
            .await?;

        info!(
            %granter_id,
            %receiver_id,
            %questionnaire_id,
            role = %receipt.role.name,
            grants = receipt.grants.len(),
            "permissions granted"
        );

        // Committed above; audit failures are logged, never returned.
        if let Err(error) = self
            .audit_repository
            .append_event(AuditEvent {
                actor_id: granter_id,
                action: AuditAction::AccessPermissionsGranted,
                resource_type: "access_role".to_owned(),
                resource_id: receipt.role.id.to_string(),
                detail: Some(format!(
                    "granted [{}] on questionnaire '{questionnaire_id}' to user '{receiver_id}' via role '{}'",
                    kinds
                        .iter()
                        .map(PermissionKind::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                    receipt.role.name
                )),
            })
            .await
        {
            warn!(%error, role = %receipt.role.name, "failed to record grant audit event");
        }

        Ok(receipt)
    }

    async fn resolve_requests(
        &self,
        requests: Vec<GrantPermissionRequest>,
    ) -> AppResult<Vec<NewScopedGrant>> {
        if requests.is_empty() {
            return Err(AccessError::PermissionsFieldRequired.into());
        }

        let catalog = self.authorization_service.catalog();
        let mut resolved = Vec::with_capacity(requests.len());
        for request in &requests {
            let permission = catalog.find(request.permission.as_str())?;
            if permission.kind().scope() != PermissionScope::Questionnaire {
                return Err(AccessError::PermissionNotFound(request.permission.clone()).into());
            }
            resolved.push(permission);
        }

        let mut grants = Vec::with_capacity(requests.len());
        for (permission, request) in resolved.into_iter().zip(requests) {
            let viewer_ids = if permission.kind() == PermissionKind::SeeSelectedAnswers {
                let viewers = request.viewer_ids.into_iter().collect::<BTreeSet<_>>();
                if viewers.is_empty() {
                    return Err(AccessError::EmptySelectedUsers.into());
                }
                viewers.into_iter().collect()
            } else {
                Vec::new()
            };

            grants.push(NewScopedGrant {
                permission,
                expire_at: request.expire_at,
                viewer_ids,
            });
        }

        // Viewer lookups run only once every list is known to be non-empty.
        let viewers = grants
            .iter()
            .flat_map(|grant| grant.viewer_ids.iter().copied())
            .collect::<BTreeSet<_>>();
        for viewer_id in viewers {
            if !self.user_directory.user_exists(viewer_id).await? {
                return Err(AccessError::UserNotFound(viewer_id).into());
            }
        }

        Ok(grants)
    }
}
