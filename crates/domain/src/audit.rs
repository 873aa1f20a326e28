use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by access control use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a grant batch is committed.
    AccessPermissionsGranted,
    /// Emitted when a user is promoted to superadmin.
    SuperadminPromoted,
    /// Emitted when a global permission is attached to a superadmin.
    SuperadminPermissionGranted,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessPermissionsGranted => "access.permissions.granted",
            Self::SuperadminPromoted => "superadmin.promoted",
            Self::SuperadminPermissionGranted => "superadmin.permission_granted",
        }
    }
}
