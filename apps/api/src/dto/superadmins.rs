use canvass_application::SuperadminProfile;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload promoting a user to superadmin.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/promote-superadmin-request.ts"
)]
pub struct PromoteSuperadminRequest {
    #[ts(type = "number")]
    pub user_id: i64,
    pub permissions: Vec<String>,
}

/// Incoming payload attaching one global permission.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/grant-global-permission-request.ts"
)]
pub struct GrantGlobalPermissionRequest {
    pub permission: String,
}

/// API representation of a superadmin and its global permissions.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/superadmin-response.ts"
)]
pub struct SuperadminResponse {
    #[ts(type = "number")]
    pub id: i64,
    #[ts(type = "number")]
    pub user_id: i64,
    #[ts(type = "number")]
    pub granted_by: i64,
    pub permissions: Vec<String>,
}

/// Outcome of a global permission check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/superadmin-check-response.ts"
)]
pub struct SuperadminCheckResponse {
    pub permission: String,
    pub allowed: bool,
}

impl From<SuperadminProfile> for SuperadminResponse {
    fn from(profile: SuperadminProfile) -> Self {
        Self {
            id: profile.superadmin.id.as_i64(),
            user_id: profile.superadmin.user_id.as_i64(),
            granted_by: profile.superadmin.granted_by.as_i64(),
            permissions: profile
                .permissions
                .into_iter()
                .map(|kind| kind.as_str().to_owned())
                .collect(),
        }
    }
}
