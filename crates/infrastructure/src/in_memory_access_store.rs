use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use canvass_application::{
    AuditEvent, AuditRepository, CreatedScopedGrant, GrantReceipt, GrantRepository,
    NewGrantBatch, PermissionCatalogRepository, PromoteSuperadminInput, QuestionnaireDirectory,
    ScopedGrantRecord, SuperadminRepository, UserDirectory,
};
use canvass_core::{AppError, AppResult, QuestionnaireId, UserId};
use canvass_domain::{
    PermissionDefinition, PermissionId, PermissionKind, Role, RoleId, ScopedGrant, ScopedGrantId,
    Superadmin, SuperadminId,
};


#[derive(Debug, Default)]
struct AccessState {
    users: BTreeSet<UserId>,
    questionnaires: HashMap<QuestionnaireId, UserId>,
    permissions: BTreeMap<PermissionId, PermissionKind>,
    roles: BTreeMap<RoleId, Role>,
    assignments: BTreeSet<(UserId, RoleId)>,
    grants: BTreeMap<ScopedGrantId, ScopedGrant>,
    visible_answers: BTreeSet<(ScopedGrantId, UserId)>,
    superadmins: BTreeMap<SuperadminId, Superadmin>,
    superadmin_permissions: BTreeSet<(SuperadminId, PermissionId)>,
    audit_events: Vec<AuditEvent>,
    sequence: i64,
}

impl AccessState {
    fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }

    fn require_user(&self, user_id: UserId, context: &str) -> AppResult<()> {
        if self.users.contains(&user_id) {
            return Ok(());
        }

        Err(AppError::Persistence(format!(
            "failed to {context}: user '{user_id}' does not exist"
        )))
    }
}

/// In-memory adapter for every access port.
///
/// One lock guards the whole state, so a grant batch is validated and
/// applied under a single write guard and never becomes partially visible.
/// Referential checks mirror the relational foreign keys.
#[derive(Debug, Default)]
pub struct InMemoryAccessStore {
    state: RwLock<AccessState>,
}

impl InMemoryAccessStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a platform user.
    pub async fn insert_user(&self, user_id: UserId) {
        self.state.write().await.users.insert(user_id);
    }

    /// Registers a questionnaire owned by an existing user.
    pub async fn insert_questionnaire(
        &self,
        questionnaire_id: QuestionnaireId,
        owner_id: UserId,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.require_user(owner_id, "create questionnaire")?;
        state.questionnaires.insert(questionnaire_id, owner_id);

        Ok(())
    }

    /// Returns a copy of every audit event appended so far.
    pub async fn audit_events(&self) -> Vec<AuditEvent> {
        self.state.read().await.audit_events.clone()
    }
}

#[async_trait]
impl UserDirectory for InMemoryAccessStore {
    async fn user_exists(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.state.read().await.users.contains(&user_id))
    }
}

#[async_trait]
impl QuestionnaireDirectory for InMemoryAccessStore {
    async fn find_owner(&self, questionnaire_id: QuestionnaireId) -> AppResult<Option<UserId>> {
        Ok(self
            .state
            .read()
            .await
            .questionnaires
            .get(&questionnaire_id)
            .copied())
    }
}

#[async_trait]
impl PermissionCatalogRepository for InMemoryAccessStore {
    async fn seed_permissions(&self, kinds: &[PermissionKind]) -> AppResult<()> {
        let mut state = self.state.write().await;
        for kind in kinds {
            if !state.permissions.values().any(|stored| stored == kind) {
                let id = PermissionId::new(state.next_id());
                state.permissions.insert(id, *kind);
            }
        }

        Ok(())
    }

    async fn list_permissions(&self) -> AppResult<Vec<PermissionDefinition>> {
        Ok(self
            .state
            .read()
            .await
            .permissions
            .iter()
            .map(|(id, kind)| PermissionDefinition::new(*id, *kind))
            .collect())
    }
}

#[async_trait]
impl GrantRepository for InMemoryAccessStore {
    async fn create_grant_batch(&self, batch: NewGrantBatch) -> AppResult<GrantReceipt> {
        let mut state = self.state.write().await;

        state.require_user(batch.granter_id, "create role")?;
        state.require_user(batch.receiver_id, "assign role")?;
        if !state.questionnaires.contains_key(&batch.questionnaire_id) {
            return Err(AppError::Persistence(format!(
                "failed to create scoped grant: questionnaire '{}' does not exist",
                batch.questionnaire_id
            )));
        }
        for new_grant in &batch.grants {
            if state.permissions.get(&new_grant.permission.id()) != Some(&new_grant.permission.kind())
            {
                return Err(AppError::Persistence(format!(
                    "failed to create scoped grant: permission '{}' is not seeded",
                    new_grant.permission.name()
                )));
            }
            if new_grant.permission.kind() == PermissionKind::SeeSelectedAnswers {
                for viewer_id in &new_grant.viewer_ids {
                    state.require_user(*viewer_id, "record viewer")?;
                }
            }
        }

        let role = Role {
            id: RoleId::new(state.next_id()),
            name: batch.role_name,
        };
        state.roles.insert(role.id, role.clone());

        let mut created = Vec::with_capacity(batch.grants.len());
        for new_grant in batch.grants {
            let grant = ScopedGrant {
                id: ScopedGrantId::new(state.next_id()),
                role_id: role.id,
                questionnaire_id: batch.questionnaire_id,
                permission: new_grant.permission.kind(),
                expire_at: new_grant.expire_at,
            };
            state.grants.insert(grant.id, grant.clone());

            let viewer_ids = if grant.permission == PermissionKind::SeeSelectedAnswers {
                for viewer_id in &new_grant.viewer_ids {
                    state.visible_answers.insert((grant.id, *viewer_id));
                }
                new_grant.viewer_ids
            } else {
                Vec::new()
            };

            created.push(CreatedScopedGrant { grant, viewer_ids });
        }

        state.assignments.insert((batch.receiver_id, role.id));

        Ok(GrantReceipt {
            role,
            receiver_id: batch.receiver_id,
            questionnaire_id: batch.questionnaire_id,
            grants: created,
        })
    }

    async fn list_roles_for_user(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        let state = self.state.read().await;
        Ok(state
            .assignments
            .iter()
            .filter(|(assigned_user_id, _)| *assigned_user_id == user_id)
            .filter_map(|(_, role_id)| state.roles.get(role_id).cloned())
            .collect())
    }

    async fn list_scoped_grants_for_roles(
        &self,
        role_ids: &[RoleId],
        questionnaire_id: QuestionnaireId,
    ) -> AppResult<Vec<ScopedGrant>> {
        Ok(self
            .state
            .read()
            .await
            .grants
            .values()
            .filter(|grant| {
                grant.questionnaire_id == questionnaire_id && role_ids.contains(&grant.role_id)
            })
            .cloned()
            .collect())
    }

    async fn find_scoped_grant(
        &self,
        grant_id: ScopedGrantId,
    ) -> AppResult<Option<ScopedGrantRecord>> {
        let state = self.state.read().await;
        Ok(state.grants.get(&grant_id).map(|grant| ScopedGrantRecord {
            grant: grant.clone(),
            assignee_ids: state
                .assignments
                .iter()
                .filter(|(_, role_id)| *role_id == grant.role_id)
                .map(|(user_id, _)| *user_id)
                .collect(),
        }))
    }

    async fn list_viewers(&self, grant_id: ScopedGrantId) -> AppResult<Vec<UserId>> {
        Ok(self
            .state
            .read()
            .await
            .visible_answers
            .iter()
            .filter(|(stored_grant_id, _)| *stored_grant_id == grant_id)
            .map(|(_, user_id)| *user_id)
            .collect())
    }
}

#[async_trait]
impl SuperadminRepository for InMemoryAccessStore {
    async fn find_superadmin_by_user(&self, user_id: UserId) -> AppResult<Option<Superadmin>> {
        Ok(self
            .state
            .read()
            .await
            .superadmins
            .values()
            .find(|superadmin| superadmin.user_id == user_id)
            .copied())
    }

    async fn find_superadmin(
        &self,
        superadmin_id: SuperadminId,
    ) -> AppResult<Option<Superadmin>> {
        Ok(self
            .state
            .read()
            .await
            .superadmins
            .get(&superadmin_id)
            .copied())
    }

    async fn promote(&self, input: PromoteSuperadminInput) -> AppResult<Superadmin> {
        let mut state = self.state.write().await;
        state.require_user(input.user_id, "promote user")?;
        state.require_user(input.granted_by, "record promoting user")?;
        if let Some(permission_id) = input
            .permission_ids
            .iter()
            .find(|permission_id| !state.permissions.contains_key(*permission_id))
        {
            return Err(AppError::Persistence(format!(
                "failed to attach permission '{permission_id}': it is not seeded"
            )));
        }

        let existing = state
            .superadmins
            .values()
            .find(|superadmin| superadmin.user_id == input.user_id)
            .copied();
        let superadmin = match existing {
            Some(superadmin) => superadmin,
            None => {
                let superadmin = Superadmin {
                    id: SuperadminId::new(state.next_id()),
                    user_id: input.user_id,
                    granted_by: input.granted_by,
                };
                state.superadmins.insert(superadmin.id, superadmin);
                superadmin
            }
        };

        for permission_id in input.permission_ids {
            state
                .superadmin_permissions
                .insert((superadmin.id, permission_id));
        }

        Ok(superadmin)
    }

    async fn grant_global_permission(
        &self,
        superadmin_id: SuperadminId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.superadmins.contains_key(&superadmin_id)
            || !state.permissions.contains_key(&permission_id)
        {
            return Err(AppError::Persistence(format!(
                "failed to attach permission '{permission_id}' to superadmin '{superadmin_id}'"
            )));
        }

        Ok(state
            .superadmin_permissions
            .insert((superadmin_id, permission_id)))
    }

    async fn has_global_permission(
        &self,
        superadmin_id: SuperadminId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        Ok(self
            .state
            .read()
            .await
            .superadmin_permissions
            .contains(&(superadmin_id, permission_id)))
    }

    async fn list_global_permissions(
        &self,
        superadmin_id: SuperadminId,
    ) -> AppResult<Vec<PermissionId>> {
        Ok(self
            .state
            .read()
            .await
            .superadmin_permissions
            .iter()
            .filter(|(stored_superadmin_id, _)| *stored_superadmin_id == superadmin_id)
            .map(|(_, permission_id)| *permission_id)
            .collect())
    }
}

#[async_trait]
impl AuditRepository for InMemoryAccessStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.state.write().await.audit_events.push(event);
        Ok(())
    }
}
