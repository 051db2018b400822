//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    audit_routes, auth_routes, city_routes, equipment_routes, professional_routes, report_routes,
    user_routes,
};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/cidades", city_routes())
        .nest("/equipamentos", equipment_routes())
        .nest("/profissionais", professional_routes())
        .nest("/usuarios", user_routes())
        .nest("/auditoria", audit_routes())
        .nest("/relatorios", report_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        // Health check endpoint
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public authentication routes (/auth/me is token-gated inside)
        .nest("/auth", auth_routes(state.clone()))
        // Resource routes behind the bearer-token middleware
        .merge(protected)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: DatabaseStatus,
}

/// Database connectivity status
#[derive(Serialize)]
struct DatabaseStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match &state.database {
        Some(db) => match db.ping().await {
            Ok(_) => DatabaseStatus {
                status: "healthy",
                error: None,
            },
            Err(e) => DatabaseStatus {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        },
        None => DatabaseStatus {
            status: "not_configured",
            error: None,
        },
    };

    let healthy = database.status != "unhealthy";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        database,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
