//! Shared primitives for all Rust crates in Canvass.

#![forbid(unsafe_code)]

/// Caller-facing access control failures.
pub mod access_error;
/// Authentication primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use access_error::{AccessError, AccessErrorKind};
pub use auth::UserIdentity;

/// Result type used across Canvass crates.
pub type AppResult<T> = Result<T, AppError>;

/// Identifier of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user identifier from its stored value.
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

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid user id '{value}': {error}")))
    }
}

/// Identifier of a questionnaire, the resource every scoped grant applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionnaireId(i64);

impl QuestionnaireId {
    /// Creates a questionnaire identifier from its stored value.
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

impl Display for QuestionnaireId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Access control precondition failed.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Store or transaction failure, surfaced after rollback.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the access failure carried by this error, if any.
    #[must_use]
    pub fn access(&self) -> Option<&AccessError> {
        match self {
            Self::Access(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{AccessError, AppError, QuestionnaireId, UserId};

    #[test]
    fn user_id_parses_trimmed_integer() {
        let parsed = UserId::from_str(" 42 ");
        assert!(matches!(parsed, Ok(value) if value == UserId::new(42)));
    }

    #[test]
    fn user_id_rejects_non_numeric_value() {
        let parsed = UserId::from_str("alice");
        assert!(matches!(parsed, Err(AppError::Validation(_))));
    }

    #[test]
    fn identifiers_serialize_as_plain_integers() {
        let payload = serde_json::to_string(&(UserId::new(2), QuestionnaireId::new(5)));
        assert_eq!(payload.unwrap_or_default(), "[2,5]");
    }

    #[test]
    fn access_errors_convert_into_app_errors() {
        let error = AppError::from(AccessError::EmptySelectedUsers);
        assert!(matches!(
            error.access(),
            Some(AccessError::EmptySelectedUsers)
        ));
    }
}
