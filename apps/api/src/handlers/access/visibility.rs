use super::*;

pub async fn visible_answer_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(questionnaire_id): Path<i64>,
) -> ApiResult<Json<VisibleAnswerUsersResponse>> {
    let user_ids = state
        .authorization_service
        .visible_answer_users(user.user_id(), QuestionnaireId::new(questionnaire_id))
        .await?
        .into_iter()
        .map(|user_id| user_id.as_i64())
        .collect();

    Ok(Json(VisibleAnswerUsersResponse {
        questionnaire_id,
        user_ids,
    }))
}

pub async fn list_viewers_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(grant_id): Path<i64>,
) -> ApiResult<Json<ViewerListResponse>> {
    let viewer_ids = state
        .authorization_service
        .list_viewers(user.user_id(), ScopedGrantId::new(grant_id))
        .await?
        .into_iter()
        .map(|viewer_id| viewer_id.as_i64())
        .collect();

    Ok(Json(ViewerListResponse {
        grant_id,
        viewer_ids,
    }))
}
