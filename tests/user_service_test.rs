//! User service tests: admin gating, city scoping, the global-admin
//! promotion ban and self-deletion protection.

mod common;

use std::sync::Arc;

use common::{make_user, FakeUserRepo, RecordingAudit};
use registro_api::domain::{AccessLevel, AuditAction, CreateUser, UpdateUser};
use registro_api::errors::AppError;
use registro_api::services::{ActorContext, AuditRecorder, UserManager, UserService};

fn service(users: Vec<registro_api::domain::User>) -> (UserManager, Arc<RecordingAudit>) {
    let audit = Arc::new(RecordingAudit::default());
    let recorder: Arc<dyn AuditRecorder> = audit.clone();
    let manager = UserManager::new(Arc::new(FakeUserRepo::with(users)), recorder);
    (manager, audit)
}

fn ctx(user_id: i32) -> ActorContext {
    ActorContext::new(user_id, None)
}

fn create_input(level: Option<AccessLevel>, city_id: Option<i32>) -> CreateUser {
    CreateUser {
        full_name: "Novo Usuário".to_string(),
        email: "novo@example.com".to_string(),
        password: "SenhaSegura123".to_string(),
        access_level: level,
        city_id,
    }
}

#[tokio::test]
async fn editor_cannot_list_users() {
    let (service, _) = service(vec![make_user(1, AccessLevel::Editor, Some(3))]);

    let result = service.list(1).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn city_admin_sees_only_own_city() {
    let users = vec![
        make_user(1, AccessLevel::CityAdmin, Some(5)),
        make_user(2, AccessLevel::Viewer, Some(5)),
        make_user(3, AccessLevel::Viewer, Some(7)),
    ];
    let (service, _) = service(users);

    let visible = service.list(1).await.unwrap();

    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|u| u.city_id == Some(5)));
}

#[tokio::test]
async fn global_admin_sees_everyone() {
    let users = vec![
        make_user(1, AccessLevel::GlobalAdmin, None),
        make_user(2, AccessLevel::Viewer, Some(5)),
        make_user(3, AccessLevel::Viewer, Some(7)),
    ];
    let (service, _) = service(users);

    let visible = service.list(1).await.unwrap();

    assert_eq!(visible.len(), 3);
}

#[tokio::test]
async fn city_admin_cannot_create_global_admin() {
    let (service, audit) = service(vec![make_user(1, AccessLevel::CityAdmin, Some(5))]);

    let result = service
        .create(create_input(Some(AccessLevel::GlobalAdmin), Some(5)), &ctx(1))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
    assert!(audit.recorded().is_empty());
}

#[tokio::test]
async fn city_admin_creates_within_own_city() {
    let (service, audit) = service(vec![make_user(1, AccessLevel::CityAdmin, Some(5))]);

    let created = service
        .create(create_input(Some(AccessLevel::Editor), Some(5)), &ctx(1))
        .await
        .unwrap();

    assert_eq!(created.access_level, AccessLevel::Editor);

    let events = audit.recorded();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::Create);
    assert_eq!(events[0].table, "usuarios");
    assert!(events[0].new_data.is_some());
    // The snapshot never carries the password hash
    assert!(events[0]
        .new_data
        .as_ref()
        .unwrap()
        .get("password_hash")
        .is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let existing = make_user(2, AccessLevel::Viewer, Some(5));
    let mut input = create_input(None, Some(5));
    input.email = existing.email.clone();

    let (service, _) = service(vec![make_user(1, AccessLevel::GlobalAdmin, None), existing]);

    match service.create(input, &ctx(1)).await.unwrap_err() {
        AppError::Conflict(field) => assert_eq!(field, "Email"),
        other => panic!("esperava conflito, obteve {other:?}"),
    }
}

#[tokio::test]
async fn city_admin_cannot_update_user_of_other_city() {
    let users = vec![
        make_user(1, AccessLevel::CityAdmin, Some(5)),
        make_user(2, AccessLevel::Viewer, Some(7)),
    ];
    let (service, _) = service(users);

    let patch = UpdateUser {
        full_name: Some("Outro Nome".to_string()),
        ..Default::default()
    };
    let result = service.update(2, patch, &ctx(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn city_admin_cannot_promote_to_global_admin() {
    let users = vec![
        make_user(1, AccessLevel::CityAdmin, Some(5)),
        make_user(2, AccessLevel::Viewer, Some(5)),
    ];
    let (service, _) = service(users);

    let patch = UpdateUser {
        access_level: Some(AccessLevel::GlobalAdmin),
        ..Default::default()
    };
    let result = service.update(2, patch, &ctx(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn global_admin_promotes_freely() {
    let users = vec![
        make_user(1, AccessLevel::GlobalAdmin, None),
        make_user(2, AccessLevel::CityAdmin, Some(5)),
    ];
    let (service, audit) = service(users);

    let patch = UpdateUser {
        access_level: Some(AccessLevel::GlobalAdmin),
        ..Default::default()
    };
    let updated = service.update(2, patch, &ctx(1)).await.unwrap();

    assert_eq!(updated.access_level, AccessLevel::GlobalAdmin);
    assert_eq!(audit.recorded().len(), 1);
}

#[tokio::test]
async fn nobody_deletes_their_own_account() {
    let (service, audit) = service(vec![make_user(1, AccessLevel::GlobalAdmin, None)]);

    let result = service.delete(1, &ctx(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    assert!(audit.recorded().is_empty());
}

#[tokio::test]
async fn delete_audits_old_data_only() {
    let users = vec![
        make_user(1, AccessLevel::GlobalAdmin, None),
        make_user(2, AccessLevel::Viewer, Some(5)),
    ];
    let (service, audit) = service(users);

    service.delete(2, &ctx(1)).await.unwrap();

    let events = audit.recorded();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::Delete);
    assert_eq!(events[0].record_id, 2);
    assert!(events[0].old_data.is_some());
    assert!(events[0].new_data.is_none());
}

#[tokio::test]
async fn city_admin_cannot_delete_user_of_other_city() {
    let users = vec![
        make_user(1, AccessLevel::CityAdmin, Some(5)),
        make_user(2, AccessLevel::Viewer, Some(7)),
    ];
    let (service, _) = service(users);

    let result = service.delete(2, &ctx(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn short_password_is_rejected_on_create() {
    let (service, _) = service(vec![make_user(1, AccessLevel::GlobalAdmin, None)]);

    let mut input = create_input(None, None);
    input.password = "curta".to_string();

    let result = service.create(input, &ctx(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}
