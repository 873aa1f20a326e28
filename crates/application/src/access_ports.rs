mod audit;
mod catalog;
mod clock;
mod directory;
mod grants;
mod superadmins;

pub use audit::{AuditEvent, AuditRepository};
pub use catalog::PermissionCatalogRepository;
pub use clock::{Clock, SystemClock};
pub use directory::{QuestionnaireDirectory, UserDirectory};
pub use grants::{
    CreatedScopedGrant, GrantReceipt, GrantRepository, NewGrantBatch, NewScopedGrant,
    ScopedGrantRecord,
};
pub use superadmins::{PromoteSuperadminInput, SuperadminRepository};
