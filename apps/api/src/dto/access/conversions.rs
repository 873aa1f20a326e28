use canvass_application::{CreatedScopedGrant, GrantPermissionRequest, GrantReceipt};
use canvass_core::UserId;
use canvass_domain::{PermissionDefinition, PermissionScope};

use super::{
    GrantPermissionItemRequest, GrantReceiptResponse, PermissionResponse, ScopedGrantResponse,
};

impl From<PermissionDefinition> for PermissionResponse {
    fn from(definition: PermissionDefinition) -> Self {
        let scope = match definition.kind().scope() {
            PermissionScope::Questionnaire => "questionnaire",
            PermissionScope::Global => "global",
        };

        Self {
            id: definition.id().as_i64(),
            name: definition.name().to_owned(),
            scope: scope.to_owned(),
        }
    }
}

impl From<GrantPermissionItemRequest> for GrantPermissionRequest {
    fn from(item: GrantPermissionItemRequest) -> Self {
        Self {
            permission: item.permission,
            expire_at: item.expire_at,
            viewer_ids: item.viewer_ids.into_iter().map(UserId::new).collect(),
        }
    }
}

impl From<CreatedScopedGrant> for ScopedGrantResponse {
    fn from(created: CreatedScopedGrant) -> Self {
        Self {
            id: created.grant.id.as_i64(),
            permission: created.grant.permission.as_str().to_owned(),
            expire_at: created.grant.expire_at.map(|value| value.to_rfc3339()),
            viewer_ids: created
                .viewer_ids
                .into_iter()
                .map(|viewer_id| viewer_id.as_i64())
                .collect(),
        }
    }
}

impl From<GrantReceipt> for GrantReceiptResponse {
    fn from(receipt: GrantReceipt) -> Self {
        Self {
            role_id: receipt.role.id.as_i64(),
            role_name: receipt.role.name.as_str().to_owned(),
            receiver_id: receipt.receiver_id.as_i64(),
            questionnaire_id: receipt.questionnaire_id.as_i64(),
            grants: receipt.grants.into_iter().map(Into::into).collect(),
        }
    }
}
