use std::sync::Arc;

use canvass_core::{AppError, AppResult};
use canvass_domain::{PermissionCatalog, PermissionKind};
use tracing::info;

use crate::PermissionCatalogRepository;

/// Application service that seeds and snapshots the permission catalog.
#[derive(Clone)]
pub struct PermissionCatalogService {
    repository: Arc<dyn PermissionCatalogRepository>,
}

impl PermissionCatalogService {
    /// Creates a new service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn PermissionCatalogRepository>) -> Self {
        Self { repository }
    }

    /// Seeds every known permission and loads the immutable snapshot.
    ///
    /// Seeding is idempotent; running it on every startup never duplicates
    /// rows.
    pub async fn seed_and_load(&self) -> AppResult<PermissionCatalog> {
        self.repository
            .seed_permissions(PermissionKind::all())
            .await?;

        let catalog = PermissionCatalog::new(self.repository.list_permissions().await?);

        for kind in PermissionKind::all() {
            if catalog.definition_for(*kind).is_err() {
                return Err(AppError::Internal(format!(
                    "permission '{}' is missing from the seeded catalog",
                    kind.as_str()
                )));
            }
        }

        info!(
            permissions = catalog.list_all().len(),
            "permission catalog loaded"
        );

        Ok(catalog)
    }
}
