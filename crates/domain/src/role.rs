use std::fmt::{Display, Formatter};

use canvass_core::{QuestionnaireId, UserId};
use serde::{Deserialize, Serialize};

use crate::PermissionKind;

/// Stored identifier of a synthesized role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(i64);

impl RoleId {
    /// Creates a role identifier from its stored value.
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

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Traceable role name derived from one grant batch.
///
/// The name is the per-permission abbreviations joined by `_`, followed by
/// the questionnaire, receiver and granter identifiers, e.g.
/// `qe_ssa_5_2_1`. Names are not required to be globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleName(String);

impl RoleName {
    /// Synthesizes the role name for a grant batch.
    #[must_use]
    pub fn synthesize(
        permissions: &[PermissionKind],
        questionnaire_id: QuestionnaireId,
        receiver_id: UserId,
        granter_id: UserId,
    ) -> Self {
        let abbreviations = permissions
            .iter()
            .map(PermissionKind::abbreviation)
            .collect::<Vec<_>>()
            .join("_");

        Self(format!(
            "{abbreviations}_{questionnaire_id}_{receiver_id}_{granter_id}"
        ))
    }

    /// Wraps a name loaded from storage.
    #[must_use]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Disposable role created for exactly one grant transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Stored identifier.
    pub id: RoleId,
    /// Synthesized name.
    pub name: RoleName,
}

#[cfg(test)]
mod tests {
    use canvass_core::{QuestionnaireId, UserId};
    use proptest::prelude::*;

    use crate::PermissionKind;

    use super::RoleName;

    #[test]
    fn single_permission_name_matches_documented_shape() {
        let name = RoleName::synthesize(
            &[PermissionKind::QuestionnaireEdit],
            QuestionnaireId::new(5),
            UserId::new(2),
            UserId::new(1),
        );
        assert_eq!(name.as_str(), "qe_5_2_1");
    }

    #[test]
    fn batch_name_joins_abbreviations_in_request_order() {
        let name = RoleName::synthesize(
            &[
                PermissionKind::SeeSelectedAnswers,
                PermissionKind::QuestionnaireView,
                PermissionKind::QuestionnaireGrantPermission,
            ],
            QuestionnaireId::new(9),
            UserId::new(4),
            UserId::new(3),
        );
        assert_eq!(name.as_str(), "ssa_qv_qgp_9_4_3");
    }

    proptest! {
        #[test]
        fn name_always_ends_with_resource_receiver_and_granter(
            indexes in proptest::collection::vec(0usize..6, 1..6),
            questionnaire in 1i64..100_000,
            receiver in 1i64..100_000,
            granter in 1i64..100_000,
        ) {
            let permissions = indexes
                .iter()
                .map(|index| PermissionKind::all()[*index])
                .collect::<Vec<_>>();
            let name = RoleName::synthesize(
                &permissions,
                QuestionnaireId::new(questionnaire),
                UserId::new(receiver),
                UserId::new(granter),
            );
            let suffix = format!("_{questionnaire}_{receiver}_{granter}");
            prop_assert!(name.as_str().ends_with(suffix.as_str()));
            prop_assert_eq!(
                name.as_str().split('_').count(),
                permissions.len() + 3
            );
        }
    }
}
