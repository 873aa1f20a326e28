use std::sync::Arc;

use canvass_core::{AccessError, AppError, QuestionnaireId, UserId};
use canvass_domain::{AuditAction, PermissionKind};
use chrono::{Duration, Utc};

use crate::test_support::{FailingAuditRepository, FakeAccessStore, FixedClock, seeded_catalog};
use crate::{AuthorizationService, Clock, GrantRepository};

use super::{GrantPermissionRequest, GrantService};

struct Harness {
    store: Arc<FakeAccessStore>,
    clock: Arc<FixedClock>,
    authorization: AuthorizationService,
    service: GrantService,
}

async fn harness() -> Harness {
    let store = Arc::new(FakeAccessStore::default());
    for user_id in 1..=5 {
        store.add_user(user_id).await;
    }
    store.add_questionnaire(5, 1).await;
    store.add_questionnaire(6, 1).await;

    let clock = Arc::new(FixedClock::new(Utc::now()));
    let authorization = AuthorizationService::new(
        Arc::new(seeded_catalog()),
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
    );
    let service = GrantService::new(
        authorization.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );

    Harness {
        store,
        clock,
        authorization,
        service,
    }
}

fn request(permission: &str) -> GrantPermissionRequest {
    GrantPermissionRequest {
        permission: permission.to_owned(),
        expire_at: None,
        viewer_ids: Vec::new(),
    }
}

fn selected(viewers: &[i64]) -> GrantPermissionRequest {
    GrantPermissionRequest {
        viewer_ids: viewers.iter().copied().map(UserId::new).collect(),
        ..request("see_selected_answers")
    }
}

async fn grant(
    harness: &Harness,
    granter: i64,
    receiver: i64,
    questionnaire: i64,
    requests: Vec<GrantPermissionRequest>,
) -> Result<crate::GrantReceipt, AppError> {
    harness
        .service
        .grant_permissions(
            UserId::new(granter),
            UserId::new(receiver),
            QuestionnaireId::new(questionnaire),
            requests,
        )
        .await
}

#[tokio::test]
async fn owner_grant_authorizes_receiver_on_that_questionnaire_only() {
    let harness = harness().await;

    let receipt = grant(&harness, 1, 2, 5, vec![request("questionnaire_edit")]).await;
    assert!(receipt.is_ok());
    let receipt = receipt.unwrap_or_else(|_| unreachable!());
    assert_eq!(receipt.role.name.as_str(), "qe_5_2_1");

    let on_granted = harness
        .authorization
        .can_do(UserId::new(2), QuestionnaireId::new(5), "questionnaire_edit")
        .await;
    let on_other = harness
        .authorization
        .can_do(UserId::new(2), QuestionnaireId::new(6), "questionnaire_edit")
        .await;
    assert!(matches!(on_granted, Ok(true)));
    assert!(matches!(on_other, Ok(false)));

    let events = harness.store.events.lock().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::AccessPermissionsGranted);
    assert_eq!(events[0].resource_id, receipt.role.id.to_string());
}

#[tokio::test]
async fn every_granted_permission_holds_until_its_own_expiry() {
    let harness = harness().await;
    let expire_at = harness.clock.now() + Duration::hours(1);

    let receipt = grant(
        &harness,
        1,
        2,
        5,
        vec![
            GrantPermissionRequest {
                expire_at: Some(expire_at),
                ..request("questionnaire_view")
            },
            request("questionnaire_answer"),
        ],
    )
    .await;
    assert!(receipt.is_ok());

    for permission in ["questionnaire_view", "questionnaire_answer"] {
        let allowed = harness
            .authorization
            .can_do(UserId::new(2), QuestionnaireId::new(5), permission)
            .await;
        assert!(matches!(allowed, Ok(true)));
    }

    harness.clock.advance(Duration::hours(1));

    let view = harness
        .authorization
        .can_do(UserId::new(2), QuestionnaireId::new(5), "questionnaire_view")
        .await;
    let answer = harness
        .authorization
        .can_do(UserId::new(2), QuestionnaireId::new(5), "questionnaire_answer")
        .await;
    assert!(matches!(view, Ok(false)));
    assert!(matches!(answer, Ok(true)));
}

#[tokio::test]
async fn already_expired_grant_is_stored_but_never_authorizes() {
    let harness = harness().await;

    let receipt = grant(
        &harness,
        1,
        2,
        5,
        vec![GrantPermissionRequest {
            expire_at: Some(harness.clock.now() - Duration::seconds(1)),
            ..request("questionnaire_edit")
        }],
    )
    .await;
    assert!(receipt.is_ok());

    let allowed = harness
        .authorization
        .can_do(UserId::new(2), QuestionnaireId::new(5), "questionnaire_edit")
        .await;
    assert!(matches!(allowed, Ok(false)));
}

#[tokio::test]
async fn selected_answers_grant_records_each_viewer_once() {
    let harness = harness().await;

    let receipt = grant(&harness, 1, 2, 5, vec![selected(&[4, 3, 4])]).await;
    assert!(receipt.is_ok());
    let receipt = receipt.unwrap_or_else(|_| unreachable!());
    assert_eq!(receipt.role.name.as_str(), "ssa_5_2_1");

    let grant_id = receipt.grants[0].grant.id;
    let viewers = harness.store.list_viewers(grant_id).await;
    assert_eq!(
        viewers.unwrap_or_default(),
        vec![UserId::new(3), UserId::new(4)]
    );
}

#[tokio::test]
async fn selected_answers_without_viewers_persists_nothing() {
    let harness = harness().await;

    let result = grant(
        &harness,
        1,
        2,
        5,
        vec![request("questionnaire_view"), selected(&[])],
    )
    .await;

    assert!(matches!(
        result,
        Err(AppError::Access(AccessError::EmptySelectedUsers))
    ));
    assert_eq!(harness.store.row_counts().await, (0, 0, 0, 0));
}

#[tokio::test]
async fn viewers_are_ignored_on_other_permissions() {
    let harness = harness().await;

    let receipt = grant(
        &harness,
        1,
        2,
        5,
        vec![GrantPermissionRequest {
            viewer_ids: vec![UserId::new(3)],
            ..request("questionnaire_report")
        }],
    )
    .await;

    assert!(receipt.is_ok());
    assert_eq!(harness.store.row_counts().await, (1, 1, 1, 0));
}

#[tokio::test]
async fn stranger_cannot_grant() {
    let harness = harness().await;

    let result = grant(&harness, 3, 2, 5, vec![request("questionnaire_view")]).await;

    assert!(matches!(
        result,
        Err(AppError::Access(AccessError::NotAuthorizedToGrant { granter_id, questionnaire_id }))
            if granter_id == UserId::new(3) && questionnaire_id == QuestionnaireId::new(5)
    ));
    assert_eq!(harness.store.row_counts().await, (0, 0, 0, 0));
}

#[tokio::test]
async fn holder_of_grant_permission_can_delegate() {
    let harness = harness().await;
    let delegated = grant(
        &harness,
        1,
        2,
        5,
        vec![request("questionnaire_grant_permission")],
    )
    .await;
    assert!(delegated.is_ok());

    let receipt = grant(&harness, 2, 3, 5, vec![request("questionnaire_view")]).await;
    assert!(receipt.is_ok());
    assert!(matches!(
        receipt.map(|receipt| receipt.role.name.as_str().to_owned()),
        Ok(name) if name == "qv_5_3_2"
    ));

    let elsewhere = grant(&harness, 2, 3, 6, vec![request("questionnaire_view")]).await;
    assert!(matches!(
        elsewhere,
        Err(AppError::Access(AccessError::NotAuthorizedToGrant { .. }))
    ));
}

#[tokio::test]
async fn expired_delegation_no_longer_allows_granting() {
    let harness = harness().await;
    let delegated = grant(
        &harness,
        1,
        2,
        5,
        vec![GrantPermissionRequest {
            expire_at: Some(harness.clock.now() + Duration::minutes(1)),
            ..request("questionnaire_grant_permission")
        }],
    )
    .await;
    assert!(delegated.is_ok());
    harness.clock.advance(Duration::minutes(2));

    let result = grant(&harness, 2, 3, 5, vec![request("questionnaire_view")]).await;

    assert!(matches!(
        result,
        Err(AppError::Access(AccessError::NotAuthorizedToGrant { .. }))
    ));
}

#[tokio::test]
async fn preconditions_fail_in_documented_order() {
    let harness = harness().await;

    let missing_granter = grant(&harness, 99, 98, 97, Vec::new()).await;
    let missing_resource = grant(&harness, 1, 98, 97, Vec::new()).await;
    let missing_receiver = grant(&harness, 1, 98, 5, Vec::new()).await;
    let empty_requests = grant(&harness, 1, 2, 5, Vec::new()).await;
    let unknown_permission = grant(
        &harness,
        1,
        2,
        5,
        vec![request("questionnaire_view"), request("questionnaire_delete"), selected(&[])],
    )
    .await;

    assert!(matches!(
        missing_granter,
        Err(AppError::Access(AccessError::GranterNotFound(user))) if user == UserId::new(99)
    ));
    assert!(matches!(
        missing_resource,
        Err(AppError::Access(AccessError::ResourceNotFound(questionnaire)))
            if questionnaire == QuestionnaireId::new(97)
    ));
    assert!(matches!(
        missing_receiver,
        Err(AppError::Access(AccessError::ReceiverNotFound(user))) if user == UserId::new(98)
    ));
    assert!(matches!(
        empty_requests,
        Err(AppError::Access(AccessError::PermissionsFieldRequired))
    ));
    assert!(matches!(
        unknown_permission,
        Err(AppError::Access(AccessError::PermissionNotFound(name))) if name == "questionnaire_delete"
    ));
    assert_eq!(harness.store.row_counts().await, (0, 0, 0, 0));
}

#[tokio::test]
async fn global_permissions_cannot_be_granted_per_questionnaire() {
    let harness = harness().await;

    let result = grant(&harness, 1, 2, 5, vec![request("superadmin_see_all_answers")]).await;

    assert!(matches!(
        result,
        Err(AppError::Access(AccessError::PermissionNotFound(name)))
            if name == PermissionKind::SuperadminSeeAllAnswers.as_str()
    ));
}

#[tokio::test]
async fn unknown_viewer_is_rejected_before_writing() {
    let harness = harness().await;

    let result = grant(&harness, 1, 2, 5, vec![selected(&[3, 42])]).await;

    assert!(matches!(
        result,
        Err(AppError::Access(AccessError::UserNotFound(user))) if user == UserId::new(42)
    ));
    assert_eq!(harness.store.row_counts().await, (0, 0, 0, 0));
}

#[tokio::test]
async fn repeated_grants_create_independent_roles() {
    let harness = harness().await;

    let first = grant(&harness, 1, 2, 5, vec![request("questionnaire_view")]).await;
    let second = grant(&harness, 1, 2, 5, vec![request("questionnaire_view")]).await;

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_ne!(
        first.map(|receipt| receipt.role.id).ok(),
        second.map(|receipt| receipt.role.id).ok()
    );
    assert_eq!(harness.store.row_counts().await, (2, 2, 2, 0));
}

#[tokio::test]
async fn audit_failure_does_not_fail_a_committed_grant() {
    let harness = harness().await;
    let service = GrantService::new(
        harness.authorization.clone(),
        harness.store.clone(),
        harness.store.clone(),
        harness.store.clone(),
        Arc::new(FailingAuditRepository),
    );

    let receipt = service
        .grant_permissions(
            UserId::new(1),
            UserId::new(2),
            QuestionnaireId::new(5),
            vec![request("questionnaire_edit")],
        )
        .await;

    assert!(matches!(receipt, Ok(receipt) if receipt.role.name.as_str() == "qe_5_2_1"));
    assert_eq!(harness.store.row_counts().await, (1, 1, 1, 0));
    assert!(matches!(
        harness
            .authorization
            .can_do(UserId::new(2), QuestionnaireId::new(5), "questionnaire_edit")
            .await,
        Ok(true)
    ));
}

#[tokio::test]
async fn empty_viewer_list_is_reported_before_unknown_viewers() {
    let harness = harness().await;

    let result = grant(
        &harness,
        1,
        2,
        5,
        vec![selected(&[42]), selected(&[])],
    )
    .await;

    assert!(matches!(
        result,
        Err(AppError::Access(AccessError::EmptySelectedUsers))
    ));
    assert_eq!(harness.store.row_counts().await, (0, 0, 0, 0));
}
