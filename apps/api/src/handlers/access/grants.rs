use super::*;

pub async fn list_permissions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .authorization_service
        .catalog()
        .list_all()
        .iter()
        .copied()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn grant_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(questionnaire_id): Path<i64>,
    Json(payload): Json<GrantPermissionsRequest>,
) -> ApiResult<(StatusCode, Json<GrantReceiptResponse>)> {
    let requests = payload
        .permissions
        .into_iter()
        .map(GrantPermissionRequest::from)
        .collect();

    let receipt = state
        .grant_service
        .grant_permissions(
            user.user_id(),
            UserId::new(payload.receiver_id),
            QuestionnaireId::new(questionnaire_id),
            requests,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(GrantReceiptResponse::from(receipt))))
}
