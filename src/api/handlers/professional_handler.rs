//! Professional handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;

use crate::api::extractors::{SourceIp, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{
    CreateProfessional, InactivateProfessional, Professional, ProfessionalFilter, StatusFilter,
    UpdateProfessional,
};
use crate::errors::AppResult;
use crate::services::ActorContext;
use crate::types::MessageResponse;

/// Listing filters accepted on the query string
#[derive(Debug, Default, Deserialize)]
pub struct ProfessionalListQuery {
    pub status: Option<String>,
    pub cidade_id: Option<i32>,
    pub equipamento_id: Option<i32>,
    pub profissao: Option<String>,
    pub cargo: Option<String>,
}

impl From<ProfessionalListQuery> for ProfessionalFilter {
    fn from(query: ProfessionalListQuery) -> Self {
        ProfessionalFilter {
            status: StatusFilter::from_param(query.status.as_deref()),
            city_id: query.cidade_id,
            equipment_id: query.equipamento_id,
            profession: query.profissao,
            role: query.cargo,
        }
    }
}

/// Create professional routes
pub fn professional_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_professionals).post(create_professional))
        .route(
            "/:id",
            get(get_professional)
                .put(update_professional)
                .delete(delete_professional),
        )
        .route("/:id/reativar", put(reactivate_professional))
}

/// List professionals visible to the caller
#[utoipa::path(
    get,
    path = "/profissionais",
    tag = "Profissionais",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profissionais no escopo do usuário", body = Vec<Professional>),
        (status = 401, description = "Não autenticado")
    )
)]
pub async fn list_professionals(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ProfessionalListQuery>,
) -> AppResult<Json<Vec<Professional>>> {
    let professionals = state
        .professionals
        .list(query.into(), current_user.id)
        .await?;

    Ok(Json(professionals))
}

/// Fetch one professional
#[utoipa::path(
    get,
    path = "/profissionais/{id}",
    tag = "Profissionais",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profissional", body = Professional),
        (status = 403, description = "Fora da cidade do usuário"),
        (status = 404, description = "Profissional não encontrado")
    )
)]
pub async fn get_professional(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Professional>> {
    let professional = state.professionals.get(id, current_user.id).await?;

    Ok(Json(professional))
}

/// Create a professional
#[utoipa::path(
    post,
    path = "/profissionais",
    tag = "Profissionais",
    security(("bearer_auth" = [])),
    request_body = CreateProfessional,
    responses(
        (status = 201, description = "Profissional criado", body = Professional),
        (status = 400, description = "CPF, RG ou email já cadastrado"),
        (status = 403, description = "Permissão negada")
    )
)]
pub async fn create_professional(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProfessional>,
) -> AppResult<(StatusCode, Json<Professional>)> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let professional = state.professionals.create(payload, &ctx).await?;

    Ok((StatusCode::CREATED, Json(professional)))
}

/// Update a professional
#[utoipa::path(
    put,
    path = "/profissionais/{id}",
    tag = "Profissionais",
    security(("bearer_auth" = [])),
    request_body = UpdateProfessional,
    responses(
        (status = 200, description = "Profissional atualizado", body = Professional),
        (status = 403, description = "Permissão negada"),
        (status = 404, description = "Profissional não encontrado")
    )
)]
pub async fn update_professional(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProfessional>,
) -> AppResult<Json<Professional>> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let professional = state.professionals.update(id, payload, &ctx).await?;

    Ok(Json(professional))
}

/// Soft delete a professional, recording the reason
#[utoipa::path(
    delete,
    path = "/profissionais/{id}",
    tag = "Profissionais",
    security(("bearer_auth" = [])),
    request_body = InactivateProfessional,
    responses(
        (status = 200, description = "Profissional inativado", body = MessageResponse),
        (status = 403, description = "Permissão negada"),
        (status = 404, description = "Profissional não encontrado")
    )
)]
pub async fn delete_professional(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Option<Json<InactivateProfessional>>,
) -> AppResult<Json<MessageResponse>> {
    let reason = payload.and_then(|Json(body)| body.reason);
    let ctx = ActorContext::new(current_user.id, source_ip);

    state.professionals.delete(id, reason, &ctx).await?;

    Ok(Json(MessageResponse::new("Profissional inativado com sucesso")))
}

/// Reverse a soft delete
#[utoipa::path(
    put,
    path = "/profissionais/{id}/reativar",
    tag = "Profissionais",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profissional reativado", body = Professional),
        (status = 403, description = "Permissão negada"),
        (status = 404, description = "Profissional não encontrado")
    )
)]
pub async fn reactivate_professional(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Professional>> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let professional = state.professionals.reactivate(id, &ctx).await?;

    Ok(Json(professional))
}
