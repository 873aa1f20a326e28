use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use canvass_core::{AppError, AppResult, QuestionnaireId, UserId};
use canvass_domain::{
    PermissionCatalog, PermissionDefinition, PermissionId, PermissionKind, Role, RoleId,
    ScopedGrant, ScopedGrantId, Superadmin, SuperadminId,
};

use crate::{
    AuditEvent, AuditRepository, Clock, CreatedScopedGrant, GrantReceipt, GrantRepository,
    NewGrantBatch, PermissionCatalogRepository, PromoteSuperadminInput, QuestionnaireDirectory,
    ScopedGrantRecord, SuperadminRepository, UserDirectory,
};

/// Builds the catalog snapshot the fake store seeds.
pub fn seeded_catalog() -> PermissionCatalog {
    PermissionCatalog::new(
        PermissionKind::all()
            .iter()
            .enumerate()
            .map(|(index, kind)| PermissionDefinition::new(PermissionId::new(index as i64 + 1), *kind))
            .collect(),
    )
}

#[derive(Default)]
struct FakeState {
    users: BTreeSet<UserId>,
    questionnaires: BTreeMap<QuestionnaireId, UserId>,
    permissions: Vec<PermissionDefinition>,
    roles: Vec<Role>,
    assignments: Vec<(RoleId, UserId)>,
    grants: Vec<ScopedGrant>,
    viewers: Vec<(ScopedGrantId, UserId)>,
    superadmins: Vec<Superadmin>,
    superadmin_permissions: BTreeSet<(SuperadminId, PermissionId)>,
    next_id: i64,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process fake implementing every access port.
#[derive(Default)]
pub struct FakeAccessStore {
    state: Mutex<FakeState>,
    pub events: Mutex<Vec<AuditEvent>>,
}

impl FakeAccessStore {
    pub async fn add_user(&self, user_id: i64) {
        self.state.lock().await.users.insert(UserId::new(user_id));
    }

    pub async fn add_questionnaire(&self, questionnaire_id: i64, owner_id: i64) {
        let mut state = self.state.lock().await;
        state.users.insert(UserId::new(owner_id));
        state
            .questionnaires
            .insert(QuestionnaireId::new(questionnaire_id), UserId::new(owner_id));
    }

    pub async fn permission_count(&self) -> usize {
        self.state.lock().await.permissions.len()
    }

    pub async fn row_counts(&self) -> (usize, usize, usize, usize) {
        let state = self.state.lock().await;
        (
            state.roles.len(),
            state.assignments.len(),
            state.grants.len(),
            state.viewers.len(),
        )
    }

    pub async fn superadmin_permission_count(&self) -> usize {
        self.state.lock().await.superadmin_permissions.len()
    }
}

#[async_trait]
impl UserDirectory for FakeAccessStore {
    async fn user_exists(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.state.lock().await.users.contains(&user_id))
    }
}

#[async_trait]
impl QuestionnaireDirectory for FakeAccessStore {
    async fn find_owner(&self, questionnaire_id: QuestionnaireId) -> AppResult<Option<UserId>> {
        Ok(self
            .state
            .lock()
            .await
            .questionnaires
            .get(&questionnaire_id)
            .copied())
    }
}

#[async_trait]
impl PermissionCatalogRepository for FakeAccessStore {
    async fn seed_permissions(&self, kinds: &[PermissionKind]) -> AppResult<()> {
        let mut state = self.state.lock().await;
        for kind in kinds {
            if state.permissions.iter().all(|stored| stored.kind() != *kind) {
                let id = PermissionId::new(state.permissions.len() as i64 + 1);
                state.permissions.push(PermissionDefinition::new(id, *kind));
            }
        }
        Ok(())
    }

    async fn list_permissions(&self) -> AppResult<Vec<PermissionDefinition>> {
        Ok(self.state.lock().await.permissions.clone())
    }
}

#[async_trait]
impl GrantRepository for FakeAccessStore {
    async fn create_grant_batch(&self, batch: NewGrantBatch) -> AppResult<GrantReceipt> {
        let mut state = self.state.lock().await;

        let referenced_users = std::iter::once(batch.receiver_id)
            .chain(batch.grants.iter().flat_map(|grant| grant.viewer_ids.clone()));
        for user_id in referenced_users {
            if !state.users.contains(&user_id) {
                return Err(AppError::Persistence(format!(
                    "failed to create grant batch: user '{user_id}' does not exist"
                )));
            }
        }

        let role = Role {
            id: RoleId::new(state.next_id()),
            name: batch.role_name,
        };
        state.roles.push(role.clone());

        let mut created = Vec::with_capacity(batch.grants.len());
        for new_grant in batch.grants {
            let grant = ScopedGrant {
                id: ScopedGrantId::new(state.next_id()),
                role_id: role.id,
                questionnaire_id: batch.questionnaire_id,
                permission: new_grant.permission.kind(),
                expire_at: new_grant.expire_at,
            };
            state.grants.push(grant.clone());

            let viewer_ids = if grant.permission == PermissionKind::SeeSelectedAnswers {
                new_grant.viewer_ids
            } else {
                Vec::new()
            };
            for viewer_id in &viewer_ids {
                state.viewers.push((grant.id, *viewer_id));
            }
            created.push(CreatedScopedGrant { grant, viewer_ids });
        }

        state.assignments.push((role.id, batch.receiver_id));

        Ok(GrantReceipt {
            role,
            receiver_id: batch.receiver_id,
            questionnaire_id: batch.questionnaire_id,
            grants: created,
        })
    }

    async fn list_roles_for_user(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        let state = self.state.lock().await;
        Ok(state
            .roles
            .iter()
            .filter(|role| state.assignments.contains(&(role.id, user_id)))
            .cloned()
            .collect())
    }

    async fn list_scoped_grants_for_roles(
        &self,
        role_ids: &[RoleId],
        questionnaire_id: QuestionnaireId,
    ) -> AppResult<Vec<ScopedGrant>> {
        Ok(self
            .state
            .lock()
            .await
            .grants
            .iter()
            .filter(|grant| {
                role_ids.contains(&grant.role_id) && grant.questionnaire_id == questionnaire_id
            })
            .cloned()
            .collect())
    }

    async fn find_scoped_grant(
        &self,
        grant_id: ScopedGrantId,
    ) -> AppResult<Option<ScopedGrantRecord>> {
        let state = self.state.lock().await;
        Ok(state
            .grants
            .iter()
            .find(|grant| grant.id == grant_id)
            .map(|grant| ScopedGrantRecord {
                grant: grant.clone(),
                assignee_ids: state
                    .assignments
                    .iter()
                    .filter(|(role_id, _)| *role_id == grant.role_id)
                    .map(|(_, user_id)| *user_id)
                    .collect(),
            }))
    }

    async fn list_viewers(&self, grant_id: ScopedGrantId) -> AppResult<Vec<UserId>> {
        let state = self.state.lock().await;
        let viewers = state
            .viewers
            .iter()
            .filter(|(stored_grant_id, _)| *stored_grant_id == grant_id)
            .map(|(_, user_id)| *user_id)
            .collect::<BTreeSet<_>>();
        Ok(viewers.into_iter().collect())
    }
}

#[async_trait]
impl SuperadminRepository for FakeAccessStore {
    async fn find_superadmin_by_user(&self, user_id: UserId) -> AppResult<Option<Superadmin>> {
        Ok(self
            .state
            .lock()
            .await
            .superadmins
            .iter()
            .find(|superadmin| superadmin.user_id == user_id)
            .copied())
    }

    async fn find_superadmin(
        &self,
        superadmin_id: SuperadminId,
    ) -> AppResult<Option<Superadmin>> {
        Ok(self
            .state
            .lock()
            .await
            .superadmins
            .iter()
            .find(|superadmin| superadmin.id == superadmin_id)
            .copied())
    }

    async fn promote(&self, input: PromoteSuperadminInput) -> AppResult<Superadmin> {
        let mut state = self.state.lock().await;
        let existing = state
            .superadmins
            .iter()
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
                state.superadmins.push(superadmin);
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
        Ok(self
            .state
            .lock()
            .await
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
            .lock()
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
            .lock()
            .await
            .superadmin_permissions
            .iter()
            .filter(|(stored_superadmin_id, _)| *stored_superadmin_id == superadmin_id)
            .map(|(_, permission_id)| *permission_id)
            .collect())
    }
}

#[async_trait]
impl AuditRepository for FakeAccessStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

/// Clock frozen at a chosen instant.
pub struct FixedClock {
    now: StdMutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: StdMutex::new(now),
        }
    }

    pub fn advance(&self, duration: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += duration;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

/// Audit sink whose writes always fail.
#[derive(Default)]
pub struct FailingAuditRepository;

#[async_trait]
impl AuditRepository for FailingAuditRepository {
    async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
        Err(AppError::Persistence(
            "failed to append audit event: connection reset".to_owned(),
        ))
    }
}
