//! Equipment handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::extractors::{SourceIp, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateEquipment, Equipment, Professional, StatusFilter, UpdateEquipment};
use crate::errors::AppResult;
use crate::services::ActorContext;
use crate::types::MessageResponse;

/// Status filter accepted by the roster endpoint
#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    pub status: Option<String>,
}

/// One equipment unit and its assigned professionals
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterResponse {
    pub equipamento: Equipment,
    pub profissionais: Vec<Professional>,
}

/// Create equipment routes
pub fn equipment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_equipment).post(create_equipment))
        .route("/:id", put(update_equipment).delete(delete_equipment))
        .route("/:id/profissionais", get(equipment_roster))
}

/// List active equipment units
#[utoipa::path(
    get,
    path = "/equipamentos",
    tag = "Equipamentos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipamentos ativos", body = Vec<Equipment>),
        (status = 401, description = "Não autenticado")
    )
)]
pub async fn list_equipment(State(state): State<AppState>) -> AppResult<Json<Vec<Equipment>>> {
    let units = state.equipment.list().await?;

    Ok(Json(units))
}

/// Create an equipment unit
#[utoipa::path(
    post,
    path = "/equipamentos",
    tag = "Equipamentos",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipamento criado", body = Equipment),
        (status = 403, description = "Permissão negada")
    )
)]
pub async fn create_equipment(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let unit = state.equipment.create(payload, &ctx).await?;

    Ok((StatusCode::CREATED, Json(unit)))
}

/// Update an equipment unit
#[utoipa::path(
    put,
    path = "/equipamentos/{id}",
    tag = "Equipamentos",
    security(("bearer_auth" = [])),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipamento atualizado", body = Equipment),
        (status = 403, description = "Permissão negada"),
        (status = 404, description = "Equipamento não encontrado")
    )
)]
pub async fn update_equipment(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let unit = state.equipment.update(id, payload, &ctx).await?;

    Ok(Json(unit))
}

/// Soft delete an equipment unit
#[utoipa::path(
    delete,
    path = "/equipamentos/{id}",
    tag = "Equipamentos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipamento inativado", body = MessageResponse),
        (status = 403, description = "Permissão negada"),
        (status = 404, description = "Equipamento não encontrado")
    )
)]
pub async fn delete_equipment(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    state.equipment.delete(id, &ctx).await?;

    Ok(Json(MessageResponse::new("Equipamento inativado com sucesso")))
}

/// List professionals assigned to one unit
#[utoipa::path(
    get,
    path = "/equipamentos/{id}/profissionais",
    tag = "Equipamentos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipamento e profissionais", body = RosterResponse),
        (status = 404, description = "Equipamento não encontrado")
    )
)]
pub async fn equipment_roster(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<RosterQuery>,
) -> AppResult<Json<RosterResponse>> {
    let status = StatusFilter::from_param(query.status.as_deref());
    let (equipamento, profissionais) = state.equipment.roster(id, status).await?;

    Ok(Json(RosterResponse {
        equipamento,
        profissionais,
    }))
}
