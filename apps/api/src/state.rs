use std::sync::Arc;

use canvass_application::{AuthorizationService, GrantService, SuperadminService};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub grant_service: GrantService,
    pub superadmin_service: SuperadminService,
    pub gateway_shared_secret: Arc<str>,
    pub postgres_pool: Option<PgPool>,
}
