use std::sync::Arc;

use canvass_application::{
    AuditRepository, GrantRepository, PermissionCatalogRepository, QuestionnaireDirectory,
    SuperadminRepository, UserDirectory,
};
use canvass_infrastructure::{
    PostgresAuditRepository, PostgresDirectory, PostgresGrantRepository,
    PostgresPermissionCatalogRepository, PostgresSuperadminRepository,
};
use sqlx::PgPool;

/// Port implementations the access services are built from.
#[derive(Clone)]
pub struct AccessAdapters {
    pub user_directory: Arc<dyn UserDirectory>,
    pub questionnaire_directory: Arc<dyn QuestionnaireDirectory>,
    pub permission_catalog_repository: Arc<dyn PermissionCatalogRepository>,
    pub grant_repository: Arc<dyn GrantRepository>,
    pub superadmin_repository: Arc<dyn SuperadminRepository>,
    pub audit_repository: Arc<dyn AuditRepository>,
}

impl AccessAdapters {
    pub fn postgres(pool: PgPool) -> Self {
        let directory = Arc::new(PostgresDirectory::new(pool.clone()));

        Self {
            user_directory: directory.clone(),
            questionnaire_directory: directory,
            permission_catalog_repository: Arc::new(PostgresPermissionCatalogRepository::new(
                pool.clone(),
            )),
            grant_repository: Arc::new(PostgresGrantRepository::new(pool.clone())),
            superadmin_repository: Arc::new(PostgresSuperadminRepository::new(pool.clone())),
            audit_repository: Arc::new(PostgresAuditRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn in_memory(store: Arc<canvass_infrastructure::InMemoryAccessStore>) -> Self {
        Self {
            user_directory: store.clone(),
            questionnaire_directory: store.clone(),
            permission_catalog_repository: store.clone(),
            grant_repository: store.clone(),
            superadmin_repository: store.clone(),
            audit_repository: store,
        }
    }
}
