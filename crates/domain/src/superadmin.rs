use std::fmt::{Display, Formatter};

use canvass_core::UserId;
use serde::{Deserialize, Serialize};

/// Stored identifier of a superadmin promotion record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuperadminId(i64);

impl SuperadminId {
    /// Creates a superadmin identifier from its stored value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the stored integer value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for SuperadminId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Promotion record; at most one exists per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Superadmin {
    /// Stored identifier.
    pub id: SuperadminId,
    /// Promoted user.
    pub user_id: UserId,
    /// User that performed the first promotion.
    pub granted_by: UserId,
}
