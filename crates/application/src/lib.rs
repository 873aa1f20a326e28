//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod authorization_service;
mod grant_service;
mod permission_catalog_service;
mod superadmin_service;

#[cfg(test)]
mod test_support;

pub use access_ports::{
    AuditEvent, AuditRepository, Clock, CreatedScopedGrant, GrantReceipt, GrantRepository,
    NewGrantBatch, NewScopedGrant, PermissionCatalogRepository, PromoteSuperadminInput,
    QuestionnaireDirectory, ScopedGrantRecord, SuperadminRepository, SystemClock, UserDirectory,
};
pub use authorization_service::AuthorizationService;
pub use grant_service::{GrantPermissionRequest, GrantService};
pub use permission_catalog_service::PermissionCatalogService;
pub use superadmin_service::{SuperadminProfile, SuperadminService};
