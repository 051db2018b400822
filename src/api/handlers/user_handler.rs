//! User management handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};

use crate::api::extractors::{SourceIp, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::AppResult;
use crate::services::ActorContext;
use crate::types::MessageResponse;

/// Create user management routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", put(update_user).delete(delete_user))
}

/// List users visible to the caller (city admin and above)
#[utoipa::path(
    get,
    path = "/usuarios",
    tag = "Usuários",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Usuários no escopo do administrador", body = Vec<User>),
        (status = 403, description = "Permissão negada")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.users.list(current_user.id).await?;

    Ok(Json(users))
}

/// Create a user (city admin and above)
#[utoipa::path(
    post,
    path = "/usuarios",
    tag = "Usuários",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Email já cadastrado"),
        (status = 403, description = "Permissão negada")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let user = state.users.create(payload, &ctx).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user (city admin and above, own city only below global admin)
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    tag = "Usuários",
    security(("bearer_auth" = [])),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 403, description = "Permissão negada"),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<User>> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let user = state.users.update(id, payload, &ctx).await?;

    Ok(Json(user))
}

/// Permanently delete a user; self-deletion is rejected
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    tag = "Usuários",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Usuário deletado", body = MessageResponse),
        (status = 400, description = "Tentativa de deletar o próprio usuário"),
        (status = 403, description = "Permissão negada"),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    state.users.delete(id, &ctx).await?;

    Ok(Json(MessageResponse::new("Usuário deletado com sucesso")))
}
