use std::sync::Arc;

use canvass_application::{
    AuthorizationService, GrantService, PermissionCatalogService, SuperadminService, SystemClock,
};
use canvass_core::AppError;
use sqlx::PgPool;
use tracing::info;

use crate::api_config::ApiConfig;
use crate::state::AppState;

mod repositories;

pub use repositories::AccessAdapters;

/// Seeds the permission catalog and wires every access service.
///
/// When a bootstrap superadmin is configured it is promoted with every
/// global permission; repeating this on each startup changes nothing.
pub async fn build_app_state(
    adapters: AccessAdapters,
    postgres_pool: Option<PgPool>,
    config: &ApiConfig,
) -> Result<AppState, AppError> {
    let catalog = PermissionCatalogService::new(adapters.permission_catalog_repository.clone())
        .seed_and_load()
        .await?;

    let authorization_service = AuthorizationService::new(
        Arc::new(catalog),
        adapters.grant_repository.clone(),
        adapters.superadmin_repository.clone(),
        adapters.questionnaire_directory.clone(),
        Arc::new(SystemClock),
    );
    let grant_service = GrantService::new(
        authorization_service.clone(),
        adapters.user_directory.clone(),
        adapters.questionnaire_directory.clone(),
        adapters.grant_repository.clone(),
        adapters.audit_repository.clone(),
    );
    let superadmin_service = SuperadminService::new(
        authorization_service.clone(),
        adapters.user_directory.clone(),
        adapters.superadmin_repository.clone(),
        adapters.audit_repository.clone(),
    );

    if let Some(user_id) = config.bootstrap_superadmin_user_id {
        let profile = superadmin_service.bootstrap(user_id).await?;
        info!(
            user_id = %user_id,
            superadmin_id = %profile.superadmin.id,
            "bootstrap superadmin ready"
        );
    }

    Ok(AppState {
        authorization_service,
        grant_service,
        superadmin_service,
        gateway_shared_secret: Arc::from(config.gateway_shared_secret.as_str()),
        postgres_pool,
    })
}
