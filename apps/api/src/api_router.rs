use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use canvass_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;


use cors::build_cors_layer;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/permissions",
            get(handlers::access::list_permissions_handler),
        )
        .route(
            "/api/questionnaires/{questionnaire_id}/grants",
            post(handlers::access::grant_permissions_handler),
        )
        .route(
            "/api/questionnaires/{questionnaire_id}/permissions/{permission}",
            get(handlers::access::check_permission_handler),
        )
        .route(
            "/api/questionnaires/{questionnaire_id}/actions/{action}",
            get(handlers::access::check_action_handler),
        )
        .route(
            "/api/questionnaires/{questionnaire_id}/visible-answer-users",
            get(handlers::access::visible_answer_users_handler),
        )
        .route(
            "/api/grants/{grant_id}/viewers",
            get(handlers::access::list_viewers_handler),
        )
        .route(
            "/api/superadmin/permissions/{permission}",
            get(handlers::superadmins::check_superadmin_permission_handler),
        )
        .route(
            "/api/superadmins",
            post(handlers::superadmins::promote_superadmin_handler),
        )
        .route(
            "/api/superadmins/{superadmin_id}",
            get(handlers::superadmins::get_superadmin_handler),
        )
        .route(
            "/api/superadmins/{superadmin_id}/permissions",
            post(handlers::superadmins::grant_global_permission_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_identity,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
