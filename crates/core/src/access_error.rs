use thiserror::Error;

use crate::{QuestionnaireId, UserId};

/// Error taxonomy category of an access failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessErrorKind {
    /// A referenced user, questionnaire, permission or superadmin is missing.
    NotFound,
    /// The caller lacks the rights required for the operation.
    Unauthorized,
    /// A required list was empty.
    ValidationFailure,
}

/// Deterministic access control failures, never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The granting user does not exist.
    #[error("granter '{0}' was not found")]
    GranterNotFound(UserId),

    /// The questionnaire does not exist.
    #[error("questionnaire '{0}' was not found")]
    ResourceNotFound(QuestionnaireId),

    /// The granter neither owns the questionnaire nor may delegate on it.
    #[error("user '{granter_id}' may not grant permissions on questionnaire '{questionnaire_id}'")]
    NotAuthorizedToGrant {
        /// Granting user.
        granter_id: UserId,
        /// Targeted questionnaire.
        questionnaire_id: QuestionnaireId,
    },

    /// The receiving user does not exist.
    #[error("receiver '{0}' was not found")]
    ReceiverNotFound(UserId),

    /// A user targeted by a superadmin operation does not exist.
    #[error("user '{0}' was not found")]
    UserNotFound(UserId),

    /// The superadmin record does not exist.
    #[error("superadmin '{0}' was not found")]
    SuperadminNotFound(i64),

    /// The permission name does not resolve in the catalog.
    #[error("permission '{0}' was not found")]
    PermissionNotFound(String),

    /// A see-selected-answers request carried no viewers.
    #[error("selected users must not be empty for permission 'see_selected_answers'")]
    EmptySelectedUsers,

    /// A request carried no permissions.
    #[error("permissions field is required")]
    PermissionsFieldRequired,

    /// The caller may not promote superadmins.
    #[error("user '{0}' may not promote superadmins")]
    NotAuthorizedToPromote(UserId),
}

impl AccessError {
    /// Returns the taxonomy category used for transport mapping.
    #[must_use]
    pub fn kind(&self) -> AccessErrorKind {
        match self {
            Self::GranterNotFound(_)
            | Self::ResourceNotFound(_)
            | Self::ReceiverNotFound(_)
            | Self::UserNotFound(_)
            | Self::SuperadminNotFound(_)
            | Self::PermissionNotFound(_) => AccessErrorKind::NotFound,
            Self::NotAuthorizedToGrant { .. } | Self::NotAuthorizedToPromote(_) => {
                AccessErrorKind::Unauthorized
            }
            Self::EmptySelectedUsers | Self::PermissionsFieldRequired => {
                AccessErrorKind::ValidationFailure
            }
        }
    }
}
