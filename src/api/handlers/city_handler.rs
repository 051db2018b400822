//! City handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{SourceIp, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{City, CreateCity, UpdateCity};
use crate::errors::AppResult;
use crate::services::ActorContext;
use crate::types::MessageResponse;

/// Create city routes
pub fn city_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cities).post(create_city))
        .route("/:id", axum::routing::put(update_city).delete(delete_city))
}

/// List active cities
#[utoipa::path(
    get,
    path = "/cidades",
    tag = "Cidades",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cidades ativas", body = Vec<City>),
        (status = 401, description = "Não autenticado")
    )
)]
pub async fn list_cities(State(state): State<AppState>) -> AppResult<Json<Vec<City>>> {
    let cities = state.cities.list().await?;

    Ok(Json(cities))
}

/// Create a city
#[utoipa::path(
    post,
    path = "/cidades",
    tag = "Cidades",
    security(("bearer_auth" = [])),
    request_body = CreateCity,
    responses(
        (status = 201, description = "Cidade criada", body = City),
        (status = 400, description = "Nome já cadastrado"),
        (status = 403, description = "Permissão negada")
    )
)]
pub async fn create_city(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCity>,
) -> AppResult<(StatusCode, Json<City>)> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let city = state.cities.create(payload, &ctx).await?;

    Ok((StatusCode::CREATED, Json(city)))
}

/// Update a city
#[utoipa::path(
    put,
    path = "/cidades/{id}",
    tag = "Cidades",
    security(("bearer_auth" = [])),
    request_body = UpdateCity,
    responses(
        (status = 200, description = "Cidade atualizada", body = City),
        (status = 403, description = "Permissão negada"),
        (status = 404, description = "Cidade não encontrada")
    )
)]
pub async fn update_city(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCity>,
) -> AppResult<Json<City>> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let city = state.cities.update(id, payload, &ctx).await?;

    Ok(Json(city))
}

/// Soft delete a city
#[utoipa::path(
    delete,
    path = "/cidades/{id}",
    tag = "Cidades",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cidade inativada", body = MessageResponse),
        (status = 403, description = "Permissão negada"),
        (status = 404, description = "Cidade não encontrada")
    )
)]
pub async fn delete_city(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    state.cities.delete(id, &ctx).await?;

    Ok(Json(MessageResponse::new("Cidade inativada com sucesso")))
}
