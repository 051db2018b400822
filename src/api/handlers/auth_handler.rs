//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateUser, User};
use crate::errors::AppResult;
use crate::services::LoginResponse;

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "maria@example.com")]
    pub email: String,
    /// User password
    #[serde(rename = "senha")]
    #[validate(length(min = 1, message = "Senha é obrigatória"))]
    #[schema(example = "SenhaSegura123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .merge(protected)
}

/// Login and get JWT token plus the user record
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login realizado", body = LoginResponse),
        (status = 400, description = "Entrada inválida"),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.auth.login(payload.email, payload.password).await?;

    Ok(Json(response))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = CreateUser,
    responses(
        (status = 201, description = "Usuário registrado", body = User),
        (status = 400, description = "Entrada inválida ou email já cadastrado")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.auth.register(payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get the user behind the presented token
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Usuário autenticado", body = User),
        (status = 401, description = "Token ausente ou inválido"),
        (status = 404, description = "Usuário não existe mais")
    )
)]
pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<User>> {
    let user = state.auth.current_user(current_user.id).await?;

    Ok(Json(user))
}
