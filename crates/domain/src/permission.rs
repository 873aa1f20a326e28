use std::fmt::{Display, Formatter};
use std::str::FromStr;

use canvass_core::{AccessError, AppError};
use serde::{Deserialize, Serialize};

/// Grantable permission kinds known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    /// Allows viewing a questionnaire.
    QuestionnaireView,
    /// Allows editing a questionnaire.
    QuestionnaireEdit,
    /// Allows answering a questionnaire.
    QuestionnaireAnswer,
    /// Allows reading aggregated questionnaire reports.
    QuestionnaireReport,
    /// Allows granting permissions on a questionnaire to other users.
    QuestionnaireGrantPermission,
    /// Allows seeing answers of an explicit list of users.
    SeeSelectedAnswers,
    /// Allows seeing every answer on every questionnaire.
    SuperadminSeeAllAnswers,
    /// Allows editing every questionnaire.
    SuperadminEditQuestionnaires,
    /// Allows promoting users to superadmin.
    SuperadminGrantSuperadmin,
}

/// Where a permission kind may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionScope {
    /// Granted per questionnaire through a synthesized role.
    Questionnaire,
    /// Granted to superadmins, independent of any questionnaire.
    Global,
}

impl PermissionKind {
    /// Returns the stable catalog name for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuestionnaireView => "questionnaire_view",
            Self::QuestionnaireEdit => "questionnaire_edit",
            Self::QuestionnaireAnswer => "questionnaire_answer",
            Self::QuestionnaireReport => "questionnaire_report",
            Self::QuestionnaireGrantPermission => "questionnaire_grant_permission",
            Self::SeeSelectedAnswers => "see_selected_answers",
            Self::SuperadminSeeAllAnswers => "superadmin_see_all_answers",
            Self::SuperadminEditQuestionnaires => "superadmin_edit_questionnaires",
            Self::SuperadminGrantSuperadmin => "superadmin_grant_superadmin",
        }
    }

    /// Returns every catalog permission in seed order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionKind] = &[
            PermissionKind::QuestionnaireView,
            PermissionKind::QuestionnaireEdit,
            PermissionKind::QuestionnaireAnswer,
            PermissionKind::QuestionnaireReport,
            PermissionKind::QuestionnaireGrantPermission,
            PermissionKind::SeeSelectedAnswers,
            PermissionKind::SuperadminSeeAllAnswers,
            PermissionKind::SuperadminEditQuestionnaires,
            PermissionKind::SuperadminGrantSuperadmin,
        ];

        ALL
    }

    /// Returns the superadmin-only permissions.
    pub fn global() -> impl Iterator<Item = Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|kind| kind.scope() == PermissionScope::Global)
    }

    /// Returns where this permission may be granted.
    #[must_use]
    pub fn scope(&self) -> PermissionScope {
        match self {
            Self::SuperadminSeeAllAnswers
            | Self::SuperadminEditQuestionnaires
            | Self::SuperadminGrantSuperadmin => PermissionScope::Global,
            _ => PermissionScope::Questionnaire,
        }
    }

    /// Returns the first letter of every underscore-separated word.
    #[must_use]
    pub fn abbreviation(&self) -> String {
        self.as_str()
            .split('_')
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

impl Display for PermissionKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for PermissionKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| AccessError::PermissionNotFound(value.to_owned()).into())
    }
}

/// Stored identifier of a catalog permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(i64);

impl PermissionId {
    /// Creates a permission identifier from its stored value.
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

impl Display for PermissionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Seeded catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionDefinition {
    id: PermissionId,
    kind: PermissionKind,
}

impl PermissionDefinition {
    /// Creates a catalog row.
    #[must_use]
    pub fn new(id: PermissionId, kind: PermissionKind) -> Self {
        Self { id, kind }
    }

    /// Returns the stored identifier.
    #[must_use]
    pub fn id(&self) -> PermissionId {
        self.id
    }

    /// Returns the permission kind.
    #[must_use]
    pub fn kind(&self) -> PermissionKind {
        self.kind
    }

    /// Returns the unique catalog name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// Immutable snapshot of the seeded permission catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionCatalog {
    definitions: Vec<PermissionDefinition>,
}

impl PermissionCatalog {
    /// Builds a snapshot from seeded rows.
    #[must_use]
    pub fn new(mut definitions: Vec<PermissionDefinition>) -> Self {
        definitions.sort_by_key(PermissionDefinition::id);
        Self { definitions }
    }

    /// Resolves a permission name to its definition.
    pub fn find(&self, name: &str) -> Result<PermissionDefinition, AccessError> {
        self.definitions
            .iter()
            .find(|definition| definition.name() == name)
            .copied()
            .ok_or_else(|| AccessError::PermissionNotFound(name.to_owned()))
    }

    /// Resolves a permission name to its stored identifier.
    pub fn find_permission_id(&self, name: &str) -> Result<PermissionId, AccessError> {
        self.find(name).map(|definition| definition.id())
    }

    /// Resolves a permission kind to its definition.
    pub fn definition_for(&self, kind: PermissionKind) -> Result<PermissionDefinition, AccessError> {
        self.find(kind.as_str())
    }

    /// Returns the kind stored under an identifier.
    #[must_use]
    pub fn kind_of(&self, id: PermissionId) -> Option<PermissionKind> {
        self.definitions
            .iter()
            .find(|definition| definition.id() == id)
            .map(PermissionDefinition::kind)
    }

    /// Lists every catalog row ordered by identifier.
    #[must_use]
    pub fn list_all(&self) -> &[PermissionDefinition] {
        self.definitions.as_slice()
    }
}
