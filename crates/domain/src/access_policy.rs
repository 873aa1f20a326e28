use std::str::FromStr;

use canvass_core::AppError;
use serde::{Deserialize, Serialize};

use crate::PermissionKind;

/// Actions gated by access control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireAction {
    /// Open a questionnaire.
    View,
    /// Change a questionnaire.
    Edit,
    /// Submit answers to a questionnaire.
    Answer,
    /// Read aggregated reports.
    ViewReport,
    /// Read every respondent's answers.
    ViewAllAnswers,
    /// Grant permissions on a questionnaire to other users.
    ManagePermissions,
    /// Promote another user to superadmin.
    PromoteSuperadmin,
}

/// Which checks satisfy an action.
///
/// The decision is `scoped OR superadmin_override`; a missing entry never
/// satisfies the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Permission checked on the questionnaire through the user's roles.
    pub scoped: Option<PermissionKind>,
    /// Global permission that overrides the scoped check.
    pub superadmin_override: Option<PermissionKind>,
}

impl QuestionnaireAction {
    /// Returns the stable transport value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Answer => "answer",
            Self::ViewReport => "view_report",
            Self::ViewAllAnswers => "view_all_answers",
            Self::ManagePermissions => "manage_permissions",
            Self::PromoteSuperadmin => "promote_superadmin",
        }
    }

    /// Returns the policy table entry for this action.
    #[must_use]
    pub fn policy(&self) -> AccessPolicy {
        let (scoped, superadmin_override) = match self {
            Self::View => (
                Some(PermissionKind::QuestionnaireView),
                Some(PermissionKind::SuperadminSeeAllAnswers),
            ),
            Self::Edit => (
                Some(PermissionKind::QuestionnaireEdit),
                Some(PermissionKind::SuperadminEditQuestionnaires),
            ),
            Self::Answer => (Some(PermissionKind::QuestionnaireAnswer), None),
            Self::ViewReport => (
                Some(PermissionKind::QuestionnaireReport),
                Some(PermissionKind::SuperadminSeeAllAnswers),
            ),
            Self::ViewAllAnswers => (None, Some(PermissionKind::SuperadminSeeAllAnswers)),
            Self::ManagePermissions => (Some(PermissionKind::QuestionnaireGrantPermission), None),
            Self::PromoteSuperadmin => (None, Some(PermissionKind::SuperadminGrantSuperadmin)),
        };

        AccessPolicy {
            scoped,
            superadmin_override,
        }
    }

    /// Returns whether the action targets one questionnaire.
    #[must_use]
    pub fn is_questionnaire_scoped(&self) -> bool {
        !matches!(self, Self::PromoteSuperadmin)
    }
}

impl FromStr for QuestionnaireAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "answer" => Ok(Self::Answer),
            "view_report" => Ok(Self::ViewReport),
            "view_all_answers" => Ok(Self::ViewAllAnswers),
            "manage_permissions" => Ok(Self::ManagePermissions),
            "promote_superadmin" => Ok(Self::PromoteSuperadmin),
            _ => Err(AppError::Validation(format!(
                "unknown action value '{value}'"
            ))),
        }
    }
}
