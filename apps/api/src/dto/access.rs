use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// API representation of one catalog permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub scope: String,
}

/// One permission requested in a grant batch.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/grant-permission-item-request.ts"
)]
pub struct GrantPermissionItemRequest {
    pub permission: String,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub expire_at: Option<DateTime<Utc>>,
    #[serde(default)]
    #[ts(type = "Array<number>")]
    pub viewer_ids: Vec<i64>,
}

/// Incoming payload granting permissions on a questionnaire.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/grant-permissions-request.ts"
)]
pub struct GrantPermissionsRequest {
    #[ts(type = "number")]
    pub receiver_id: i64,
    pub permissions: Vec<GrantPermissionItemRequest>,
}

/// API representation of a created scoped grant.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/scoped-grant-response.ts"
)]
pub struct ScopedGrantResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub permission: String,
    pub expire_at: Option<String>,
    #[ts(type = "Array<number>")]
    pub viewer_ids: Vec<i64>,
}

/// API representation of a committed grant batch.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/grant-receipt-response.ts"
)]
pub struct GrantReceiptResponse {
    #[ts(type = "number")]
    pub role_id: i64,
    pub role_name: String,
    #[ts(type = "number")]
    pub receiver_id: i64,
    #[ts(type = "number")]
    pub questionnaire_id: i64,
    pub grants: Vec<ScopedGrantResponse>,
}

/// Outcome of a scoped permission check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-check-response.ts"
)]
pub struct PermissionCheckResponse {
    #[ts(type = "number")]
    pub questionnaire_id: i64,
    pub permission: String,
    pub allowed: bool,
}

/// Outcome of a policy-table action check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/action-check-response.ts"
)]
pub struct ActionCheckResponse {
    #[ts(type = "number")]
    pub questionnaire_id: i64,
    pub action: String,
    pub allowed: bool,
}

/// Users whose answers the caller may see on a questionnaire.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/visible-answer-users-response.ts"
)]
pub struct VisibleAnswerUsersResponse {
    #[ts(type = "number")]
    pub questionnaire_id: i64,
    #[ts(type = "Array<number>")]
    pub user_ids: Vec<i64>,
}

/// Viewer list recorded for one selective-visibility grant.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/viewer-list-response.ts"
)]
pub struct ViewerListResponse {
    #[ts(type = "number")]
    pub grant_id: i64,
    #[ts(type = "Array<number>")]
    pub viewer_ids: Vec<i64>,
}
