use std::fmt::{Display, Formatter};

use canvass_core::QuestionnaireId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{PermissionKind, RoleId};

/// Stored identifier of a scoped grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopedGrantId(i64);

impl ScopedGrantId {
    /// Creates a grant identifier from its stored value.
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

impl Display for ScopedGrantId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Authorization fact: a role carries a permission on a questionnaire,
/// optionally until `expire_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedGrant {
    /// Stored identifier.
    pub id: ScopedGrantId,
    /// Role carrying the permission.
    pub role_id: RoleId,
    /// Questionnaire the permission applies to.
    pub questionnaire_id: QuestionnaireId,
    /// Granted permission.
    pub permission: PermissionKind,
    /// Expiry instant, absent for permanent grants.
    pub expire_at: Option<DateTime<Utc>>,
}

impl ScopedGrant {
    /// Returns whether the grant is active at `now`.
    ///
    /// A grant with an expiry is active strictly before it, so a grant
    /// created already expired is never active.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at.is_none_or(|expire_at| now < expire_at)
    }

    /// Returns whether the grant authorizes `permission` on `questionnaire_id` at `now`.
    #[must_use]
    pub fn authorizes(
        &self,
        questionnaire_id: QuestionnaireId,
        permission: PermissionKind,
        now: DateTime<Utc>,
    ) -> bool {
        self.questionnaire_id == questionnaire_id
            && self.permission == permission
            && self.is_active_at(now)
    }
}

#[cfg(test)]
mod tests {
    use canvass_core::QuestionnaireId;
    use chrono::{Duration, Utc};

    use crate::{PermissionKind, RoleId};

    use super::{ScopedGrant, ScopedGrantId};

    fn grant(expire_in: Option<Duration>) -> ScopedGrant {
        ScopedGrant {
            id: ScopedGrantId::new(1),
            role_id: RoleId::new(1),
            questionnaire_id: QuestionnaireId::new(5),
            permission: PermissionKind::QuestionnaireEdit,
            expire_at: expire_in.map(|duration| Utc::now() + duration),
        }
    }

    #[test]
    fn grant_without_expiry_is_always_active() {
        let grant = grant(None);
        assert!(grant.is_active_at(Utc::now() + Duration::days(36_500)));
    }

    #[test]
    fn grant_is_inactive_at_its_expiry_instant() {
        let grant = grant(Some(Duration::minutes(5)));
        let expire_at = grant.expire_at.unwrap_or_else(Utc::now);
        assert!(grant.is_active_at(expire_at - Duration::seconds(1)));
        assert!(!grant.is_active_at(expire_at));
    }

    #[test]
    fn expired_on_arrival_grant_is_never_active() {
        let grant = grant(Some(Duration::seconds(-1)));
        assert!(!grant.is_active_at(Utc::now()));
    }

    #[test]
    fn authorizes_requires_matching_questionnaire_and_permission() {
        let grant = grant(None);
        let now = Utc::now();
        assert!(grant.authorizes(
            QuestionnaireId::new(5),
            PermissionKind::QuestionnaireEdit,
            now
        ));
        assert!(!grant.authorizes(
            QuestionnaireId::new(6),
            PermissionKind::QuestionnaireEdit,
            now
        ));
        assert!(!grant.authorizes(
            QuestionnaireId::new(5),
            PermissionKind::QuestionnaireView,
            now
        ));
    }
}
