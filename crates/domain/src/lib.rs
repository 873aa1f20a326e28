//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access_policy;
mod audit;
mod grant;
mod permission;
mod role;
mod superadmin;

pub use access_policy::{AccessPolicy, QuestionnaireAction};
pub use audit::AuditAction;
pub use grant::{ScopedGrant, ScopedGrantId};
pub use permission::{
    PermissionCatalog, PermissionDefinition, PermissionId, PermissionKind, PermissionScope,
};
pub use role::{Role, RoleId, RoleName};
pub use superadmin::{Superadmin, SuperadminId};
