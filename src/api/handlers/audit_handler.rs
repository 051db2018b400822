//! Audit trail handlers.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{AuditEntry, AuditFilter, AuditStatistics};
use crate::errors::AppResult;

/// Audit log filters accepted on the query string
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub tabela: Option<String>,
    pub acao: Option<String>,
    pub usuario_id: Option<i32>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
}

impl From<AuditQuery> for AuditFilter {
    fn from(query: AuditQuery) -> Self {
        AuditFilter {
            table: query.tabela,
            action: query.acao,
            user_id: query.usuario_id,
            date_from: query.data_inicio,
            date_to: query.data_fim,
        }
    }
}

/// Create audit routes
pub fn audit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_audit))
        .route("/estatisticas", get(audit_statistics))
}

/// Query the audit trail, newest first (city admin and above)
#[utoipa::path(
    get,
    path = "/auditoria",
    tag = "Auditoria",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Entradas de auditoria", body = Vec<AuditEntry>),
        (status = 403, description = "Permissão negada")
    )
)]
pub async fn list_audit(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<Vec<AuditEntry>>> {
    let entries = state.audit.query(query.into(), current_user.id).await?;

    Ok(Json(entries))
}

/// Audit counts grouped by action, table and user (city admin and above)
#[utoipa::path(
    get,
    path = "/auditoria/estatisticas",
    tag = "Auditoria",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Contagens agrupadas", body = AuditStatistics),
        (status = 403, description = "Permissão negada")
    )
)]
pub async fn audit_statistics(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<AuditStatistics>> {
    let statistics = state.audit.statistics(current_user.id).await?;

    Ok(Json(statistics))
}
