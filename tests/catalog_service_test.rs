//! City and equipment service tests: admin gating, the name
//! uniqueness rule and one-way soft deletes.

mod common;

use std::sync::Arc;

use common::{
    make_city, make_equipment, make_professional, make_user, FakeCityRepo, FakeEquipmentRepo,
    FakeProfessionalRepo, FakeUserRepo, RecordingAudit,
};
use registro_api::domain::{
    AccessLevel, AuditAction, CreateCity, CreateEquipment, RecordStatus, StatusFilter, UpdateCity,
};
use registro_api::errors::AppError;
use registro_api::services::{
    ActorContext, AuditRecorder, CityManager, CityService, EquipmentManager, EquipmentService,
};

fn city_service(
    cities: Vec<registro_api::domain::City>,
    users: Vec<registro_api::domain::User>,
) -> (CityManager, Arc<RecordingAudit>) {
    let audit = Arc::new(RecordingAudit::default());
    let recorder: Arc<dyn AuditRecorder> = audit.clone();
    let manager = CityManager::new(
        Arc::new(FakeCityRepo::with(cities)),
        Arc::new(FakeUserRepo::with(users)),
        recorder,
    );
    (manager, audit)
}

fn equipment_service(
    units: Vec<registro_api::domain::Equipment>,
    rows: Vec<registro_api::domain::Professional>,
    users: Vec<registro_api::domain::User>,
) -> (EquipmentManager, Arc<RecordingAudit>) {
    let audit = Arc::new(RecordingAudit::default());
    let recorder: Arc<dyn AuditRecorder> = audit.clone();
    let manager = EquipmentManager::new(
        Arc::new(FakeEquipmentRepo::with(units)),
        Arc::new(FakeProfessionalRepo::with(rows)),
        Arc::new(FakeUserRepo::with(users)),
        recorder,
    );
    (manager, audit)
}

fn ctx(user_id: i32) -> ActorContext {
    ActorContext::new(user_id, None)
}

#[tokio::test]
async fn editor_cannot_create_city() {
    let users = vec![make_user(1, AccessLevel::Editor, Some(3))];
    let (service, audit) = city_service(vec![], users);

    let result = service
        .create(
            CreateCity {
                name: "Sobral".to_string(),
            },
            &ctx(1),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
    assert!(audit.recorded().is_empty());
}

#[tokio::test]
async fn duplicate_city_name_is_a_conflict() {
    let users = vec![make_user(1, AccessLevel::CityAdmin, Some(3))];
    let (service, _) = city_service(vec![make_city(1, "Sobral")], users);

    let result = service
        .create(
            CreateCity {
                name: "Sobral".to_string(),
            },
            &ctx(1),
        )
        .await;

    match result.unwrap_err() {
        AppError::Conflict(field) => assert_eq!(field, "Cidade"),
        other => panic!("esperava conflito, obteve {other:?}"),
    }
}

#[tokio::test]
async fn city_delete_flips_status_and_audits_old_data() {
    let users = vec![make_user(1, AccessLevel::GlobalAdmin, None)];
    let (service, audit) = city_service(vec![make_city(7, "Sobral")], users);

    let city = service.delete(7, &ctx(1)).await.unwrap();

    assert_eq!(city.status, RecordStatus::Inativo);

    let events = audit.recorded();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::Delete);
    assert_eq!(events[0].table, "cidades");
    assert!(events[0].old_data.is_some());
    assert!(events[0].new_data.is_none());
    // The pre-delete snapshot still shows the city active
    assert_eq!(events[0].old_data.as_ref().unwrap()["status"], "ativo");
}

#[tokio::test]
async fn city_update_audits_both_snapshots() {
    let users = vec![make_user(1, AccessLevel::CityAdmin, Some(3))];
    let (service, audit) = city_service(vec![make_city(7, "Sobral")], users);

    let updated = service
        .update(
            7,
            UpdateCity {
                name: Some("Sobral Novo".to_string()),
            },
            &ctx(1),
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Sobral Novo");

    let events = audit.recorded();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].old_data.as_ref().unwrap()["nome"], "Sobral");
    assert_eq!(events[0].new_data.as_ref().unwrap()["nome"], "Sobral Novo");
}

#[tokio::test]
async fn city_update_of_missing_row_is_not_found() {
    let users = vec![make_user(1, AccessLevel::GlobalAdmin, None)];
    let (service, _) = city_service(vec![], users);

    let result = service.update(9, UpdateCity::default(), &ctx(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn equipment_create_requires_city_admin() {
    let users = vec![
        make_user(1, AccessLevel::Editor, Some(3)),
        make_user(2, AccessLevel::CityAdmin, Some(3)),
    ];
    let (service, audit) = equipment_service(vec![], vec![], users);

    let input = CreateEquipment {
        name: "CRAS Centro".to_string(),
        description: Some("Unidade central".to_string()),
    };

    let denied = service.create(input.clone(), &ctx(1)).await;
    assert!(matches!(denied.unwrap_err(), AppError::Forbidden));

    let created = service.create(input, &ctx(2)).await.unwrap();
    assert_eq!(created.name, "CRAS Centro");
    assert_eq!(audit.recorded().len(), 1);
    assert_eq!(audit.recorded()[0].table, "equipamentos");
}

#[tokio::test]
async fn equipment_delete_is_soft() {
    let users = vec![make_user(1, AccessLevel::CityAdmin, Some(3))];
    let (service, audit) = equipment_service(vec![make_equipment(4, "CRAS Centro")], vec![], users);

    let unit = service.delete(4, &ctx(1)).await.unwrap();

    assert_eq!(unit.status, RecordStatus::Inativo);
    assert_eq!(audit.recorded()[0].action, AuditAction::Delete);
}

#[tokio::test]
async fn roster_filters_by_status() {
    let mut inactive = make_professional(2, 3);
    inactive.active = false;

    let rows = vec![make_professional(1, 3), inactive];
    let units = vec![make_equipment(1, "CRAS Centro")];
    let users = vec![make_user(1, AccessLevel::Viewer, Some(3))];
    let (service, _) = equipment_service(units, rows, users);

    let (unit, active_rows) = service.roster(1, StatusFilter::Ativo).await.unwrap();
    assert_eq!(unit.id, 1);
    assert_eq!(active_rows.len(), 1);
    assert!(active_rows[0].active);

    let (_, all_rows) = service.roster(1, StatusFilter::Todos).await.unwrap();
    assert_eq!(all_rows.len(), 2);
}

#[tokio::test]
async fn roster_of_missing_equipment_is_not_found() {
    let users = vec![make_user(1, AccessLevel::Viewer, Some(3))];
    let (service, _) = equipment_service(vec![], vec![], users);

    let result = service.roster(9, StatusFilter::Ativo).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
