//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

#[cfg(any(test, feature = "test-support"))]
mod in_memory_access_store;
mod postgres_audit_repository;
mod postgres_directory;
mod postgres_grant_repository;
mod postgres_permission_catalog_repository;
mod postgres_superadmin_repository;

#[cfg(test)]
mod postgres_test_support;

#[cfg(any(test, feature = "test-support"))]
pub use in_memory_access_store::InMemoryAccessStore;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_directory::PostgresDirectory;
pub use postgres_grant_repository::PostgresGrantRepository;
pub use postgres_permission_catalog_repository::PostgresPermissionCatalogRepository;
pub use postgres_superadmin_repository::PostgresSuperadminRepository;
