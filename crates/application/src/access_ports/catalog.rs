use async_trait::async_trait;
use canvass_core::AppResult;
use canvass_domain::{PermissionDefinition, PermissionKind};

/// Repository port for the seeded permission catalog.
#[async_trait]
pub trait PermissionCatalogRepository: Send + Sync {
    /// Inserts missing catalog rows, keyed by unique name.
    async fn seed_permissions(&self, kinds: &[PermissionKind]) -> AppResult<()>;

    /// Lists every catalog row.
    async fn list_permissions(&self) -> AppResult<Vec<PermissionDefinition>>;
}
