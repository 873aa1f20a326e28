use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use canvass_core::{UserId, UserIdentity};
use canvass_domain::SuperadminId;

use crate::dto::{
    GrantGlobalPermissionRequest, PromoteSuperadminRequest, SuperadminCheckResponse,
    SuperadminResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn check_superadmin_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(permission): Path<String>,
) -> ApiResult<Json<SuperadminCheckResponse>> {
    let allowed = state
        .authorization_service
        .can_do_as_superadmin(user.user_id(), permission.as_str())
        .await?;

    Ok(Json(SuperadminCheckResponse {
        permission,
        allowed,
    }))
}

pub async fn promote_superadmin_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<PromoteSuperadminRequest>,
) -> ApiResult<(StatusCode, Json<SuperadminResponse>)> {
    let profile = state
        .superadmin_service
        .promote(
            user.user_id(),
            UserId::new(payload.user_id),
            &payload.permissions,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(SuperadminResponse::from(profile))))
}

pub async fn get_superadmin_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(superadmin_id): Path<i64>,
) -> ApiResult<Json<SuperadminResponse>> {
    let profile = state
        .superadmin_service
        .profile_for(user.user_id(), SuperadminId::new(superadmin_id))
        .await?;

    Ok(Json(SuperadminResponse::from(profile)))
}

pub async fn grant_global_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(superadmin_id): Path<i64>,
    Json(payload): Json<GrantGlobalPermissionRequest>,
) -> ApiResult<Json<SuperadminResponse>> {
    let profile = state
        .superadmin_service
        .grant_global_permission(
            user.user_id(),
            SuperadminId::new(superadmin_id),
            payload.permission.as_str(),
        )
        .await?;

    Ok(Json(SuperadminResponse::from(profile)))
}
