use std::collections::BTreeSet;
use std::sync::Arc;

use canvass_core::{AppError, AppResult, QuestionnaireId, UserId};
use canvass_domain::{PermissionCatalog, PermissionKind, QuestionnaireAction, ScopedGrantId};
use tracing::debug;

use crate::{Clock, GrantRepository, QuestionnaireDirectory, SuperadminRepository};

mod actions;
mod scoped;
mod superadmin;
mod visibility;


/// Application service answering access checks.
///
/// Scoped checks resolve the user's synthesized roles and their grants on
/// one questionnaire; superadmin checks consult the global tier. The two are
/// composed only through the [`QuestionnaireAction`] policy table.
#[derive(Clone)]
pub struct AuthorizationService {
    catalog: Arc<PermissionCatalog>,
    grant_repository: Arc<dyn GrantRepository>,
    superadmin_repository: Arc<dyn SuperadminRepository>,
    questionnaire_directory: Arc<dyn QuestionnaireDirectory>,
    clock: Arc<dyn Clock>,
}

impl AuthorizationService {
    /// Creates a new authorization service.
    #[must_use]
    pub fn new(
        catalog: Arc<PermissionCatalog>,
        grant_repository: Arc<dyn GrantRepository>,
        superadmin_repository: Arc<dyn SuperadminRepository>,
        questionnaire_directory: Arc<dyn QuestionnaireDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            grant_repository,
            superadmin_repository,
            questionnaire_directory,
            clock,
        }
    }

    /// Returns the catalog snapshot this service resolves names against.
    #[must_use]
    pub fn catalog(&self) -> &PermissionCatalog {
        self.catalog.as_ref()
    }

    /// Returns whether the user owns the questionnaire.
    pub async fn is_questionnaire_owner(
        &self,
        user_id: UserId,
        questionnaire_id: QuestionnaireId,
    ) -> AppResult<bool> {
        Ok(self
            .questionnaire_directory
            .find_owner(questionnaire_id)
            .await?
            .is_some_and(|owner_id| owner_id == user_id))
    }

    fn resolve_kind(&self, permission_name: &str) -> AppResult<PermissionKind> {
        Ok(self.catalog.find(permission_name)?.kind())
    }
}
