//! Professional service tests: city scoping, uniqueness conflicts,
//! soft delete, reactivation and audit emission.

mod common;

use std::sync::Arc;

use common::{
    make_create_professional, make_professional, make_user, FakeProfessionalRepo, FakeUserRepo,
    RecordingAudit,
};
use registro_api::domain::{AccessLevel, AuditAction, ProfessionalFilter, UpdateProfessional};
use registro_api::errors::AppError;
use registro_api::services::{
    ActorContext, AuditRecorder, ProfessionalManager, ProfessionalService,
};

fn service(
    rows: Vec<registro_api::domain::Professional>,
    users: Vec<registro_api::domain::User>,
) -> (ProfessionalManager, Arc<RecordingAudit>) {
    let audit = Arc::new(RecordingAudit::default());
    let recorder: Arc<dyn AuditRecorder> = audit.clone();
    let manager = ProfessionalManager::new(
        Arc::new(FakeProfessionalRepo::with(rows)),
        Arc::new(FakeUserRepo::with(users)),
        recorder,
    );
    (manager, audit)
}

fn ctx(user_id: i32) -> ActorContext {
    ActorContext::new(user_id, Some("10.0.0.1".to_string()))
}

#[tokio::test]
async fn editor_listing_is_scoped_to_own_city() {
    let rows = vec![
        make_professional(1, 3),
        make_professional(2, 3),
        make_professional(3, 4),
    ];
    let users = vec![make_user(1, AccessLevel::Editor, Some(3))];
    let (service, _) = service(rows, users);

    let visible = service.list(ProfessionalFilter::default(), 1).await.unwrap();

    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|p| p.city_id == 3));
}

#[tokio::test]
async fn global_admin_lists_every_city() {
    let rows = vec![make_professional(1, 3), make_professional(2, 4)];
    let users = vec![make_user(1, AccessLevel::GlobalAdmin, None)];
    let (service, _) = service(rows, users);

    let visible = service.list(ProfessionalFilter::default(), 1).await.unwrap();

    assert_eq!(visible.len(), 2);
}

#[tokio::test]
async fn missing_actor_is_denied() {
    let (service, _) = service(vec![make_professional(1, 3)], vec![]);

    let result = service.list(ProfessionalFilter::default(), 42).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn single_read_outside_city_is_denied() {
    let rows = vec![make_professional(1, 5)];
    let users = vec![
        make_user(1, AccessLevel::Viewer, Some(7)),
        make_user(2, AccessLevel::GlobalAdmin, None),
    ];
    let (service, _) = service(rows, users);

    let denied = service.get(1, 1).await;
    assert!(matches!(denied.unwrap_err(), AppError::Forbidden));

    let allowed = service.get(1, 2).await;
    assert_eq!(allowed.unwrap().id, 1);
}

#[tokio::test]
async fn duplicate_cpf_is_a_conflict_and_nothing_is_audited() {
    let existing = make_professional(1, 3);
    let mut input = make_create_professional(3);
    input.cpf = existing.cpf.clone();

    let users = vec![make_user(1, AccessLevel::GlobalAdmin, None)];
    let (service, audit) = service(vec![existing], users);

    let result = service.create(input, &ctx(1)).await;

    match result.unwrap_err() {
        AppError::Conflict(field) => assert_eq!(field, "CPF"),
        other => panic!("esperava conflito, obteve {other:?}"),
    }
    assert!(audit.recorded().is_empty());
}

#[tokio::test]
async fn duplicate_email_names_the_field() {
    let existing = make_professional(1, 3);
    let mut input = make_create_professional(3);
    input.email = existing.email.clone();

    let users = vec![make_user(1, AccessLevel::GlobalAdmin, None)];
    let (service, _) = service(vec![existing], users);

    match service.create(input, &ctx(1)).await.unwrap_err() {
        AppError::Conflict(field) => assert_eq!(field, "Email"),
        other => panic!("esperava conflito, obteve {other:?}"),
    }
}

#[tokio::test]
async fn viewer_cannot_create() {
    let users = vec![make_user(1, AccessLevel::Viewer, Some(3))];
    let (service, audit) = service(vec![], users);

    let result = service.create(make_create_professional(3), &ctx(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
    assert!(audit.recorded().is_empty());
}

#[tokio::test]
async fn create_audits_once_with_new_data_only() {
    let users = vec![make_user(1, AccessLevel::Editor, Some(3))];
    let (service, audit) = service(vec![], users);

    let created = service
        .create(make_create_professional(3), &ctx(1))
        .await
        .unwrap();

    let events = audit.recorded();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.action, AuditAction::Create);
    assert_eq!(event.table, "profissionais");
    assert_eq!(event.record_id, created.id);
    assert!(event.old_data.is_none());
    assert!(event.new_data.is_some());
    assert_eq!(event.source_ip.as_deref(), Some("10.0.0.1"));
}

#[tokio::test]
async fn editor_cannot_update_other_city() {
    let rows = vec![make_professional(1, 5)];
    let users = vec![make_user(1, AccessLevel::Editor, Some(7))];
    let (service, audit) = service(rows, users);

    let patch = UpdateProfessional {
        full_name: Some("Outro Nome".to_string()),
        ..Default::default()
    };
    let result = service.update(1, patch, &ctx(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
    assert!(audit.recorded().is_empty());
}

#[tokio::test]
async fn city_admin_cannot_delete_other_city() {
    let rows = vec![make_professional(1, 5)];
    let users = vec![make_user(1, AccessLevel::CityAdmin, Some(7))];
    let (service, _) = service(rows, users);

    let result = service.delete(1, Some("motivo".to_string()), &ctx(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn global_admin_is_never_denied_on_city_grounds() {
    let rows = vec![make_professional(1, 5)];
    let users = vec![make_user(1, AccessLevel::GlobalAdmin, Some(2))];
    let (service, _) = service(rows, users);

    let patch = UpdateProfessional {
        profession: Some("Enfermeira".to_string()),
        ..Default::default()
    };
    let updated = service.update(1, patch, &ctx(1)).await.unwrap();

    assert_eq!(updated.profession, "Enfermeira");
}

#[tokio::test]
async fn update_audits_with_before_and_after_snapshots() {
    let rows = vec![make_professional(1, 3)];
    let users = vec![make_user(1, AccessLevel::CityAdmin, Some(3))];
    let (service, audit) = service(rows, users);

    let patch = UpdateProfessional {
        full_name: Some("Nome Atualizado".to_string()),
        ..Default::default()
    };
    service.update(1, patch, &ctx(1)).await.unwrap();

    let events = audit.recorded();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.action, AuditAction::Update);

    let old = event.old_data.as_ref().unwrap();
    let new = event.new_data.as_ref().unwrap();
    assert_eq!(old["nome_completo"], "Profissional 1");
    assert_eq!(new["nome_completo"], "Nome Atualizado");
}

#[tokio::test]
async fn delete_records_reason_and_audits_old_data_only() {
    let rows = vec![make_professional(1, 3)];
    let users = vec![make_user(1, AccessLevel::Editor, Some(3))];
    let (service, audit) = service(rows, users);

    let deleted = service
        .delete(1, Some("Desligamento".to_string()), &ctx(1))
        .await
        .unwrap();

    assert!(!deleted.active);
    assert_eq!(deleted.inactivation_reason.as_deref(), Some("Desligamento"));
    assert!(deleted.inactivated_at.is_some());

    let events = audit.recorded();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::Delete);
    assert!(events[0].old_data.is_some());
    assert!(events[0].new_data.is_none());
}

#[tokio::test]
async fn delete_without_reason_uses_the_fallback() {
    let rows = vec![make_professional(1, 3)];
    let users = vec![make_user(1, AccessLevel::Editor, Some(3))];
    let (service, _) = service(rows, users);

    let deleted = service.delete(1, None, &ctx(1)).await.unwrap();

    assert_eq!(deleted.inactivation_reason.as_deref(), Some("Não informado"));
}

#[tokio::test]
async fn reactivate_clears_inactivation_fields() {
    let mut row = make_professional(1, 3);
    row.active = false;
    row.inactivation_reason = Some("Desligamento".to_string());
    row.inactivated_at = Some(chrono::Utc::now());

    let users = vec![make_user(1, AccessLevel::CityAdmin, Some(3))];
    let (service, audit) = service(vec![row], users);

    let reactivated = service.reactivate(1, &ctx(1)).await.unwrap();

    assert!(reactivated.active);
    assert!(reactivated.inactivation_reason.is_none());
    assert!(reactivated.inactivated_at.is_none());

    let events = audit.recorded();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::Update);
    assert!(events[0].old_data.is_some());
    assert!(events[0].new_data.is_some());
}

#[tokio::test]
async fn update_of_missing_professional_is_not_found() {
    let users = vec![make_user(1, AccessLevel::GlobalAdmin, None)];
    let (service, _) = service(vec![], users);

    let result = service
        .update(9, UpdateProfessional::default(), &ctx(1))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
