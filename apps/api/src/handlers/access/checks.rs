use super::*;

pub async fn check_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((questionnaire_id, permission)): Path<(i64, String)>,
) -> ApiResult<Json<PermissionCheckResponse>> {
    let allowed = state
        .authorization_service
        .can_do(
            user.user_id(),
            QuestionnaireId::new(questionnaire_id),
            permission.as_str(),
        )
        .await?;

    Ok(Json(PermissionCheckResponse {
        questionnaire_id,
        permission,
        allowed,
    }))
}

pub async fn check_action_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((questionnaire_id, action)): Path<(i64, String)>,
) -> ApiResult<Json<ActionCheckResponse>> {
    let parsed_action = QuestionnaireAction::from_str(action.as_str())?;
    let allowed = state
        .authorization_service
        .authorize(
            user.user_id(),
            parsed_action,
            Some(QuestionnaireId::new(questionnaire_id)),
        )
        .await?;

    Ok(Json(ActionCheckResponse {
        questionnaire_id,
        action: parsed_action.as_str().to_owned(),
        allowed,
    }))
}
