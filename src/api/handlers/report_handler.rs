//! Report handlers.

use axum::{
    extract::{Extension, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::extractors::SourceIp;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ProfessionalFilter, StatusFilter};
use crate::errors::{AppError, AppResult};
use crate::services::{ActorContext, RegistryStatistics, ReportDocument};

/// Filters accepted by both export endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub status: Option<String>,
    pub cidade_id: Option<i32>,
    pub equipamento_id: Option<i32>,
}

impl From<ReportQuery> for ProfessionalFilter {
    fn from(query: ReportQuery) -> Self {
        ProfessionalFilter {
            status: StatusFilter::from_param(query.status.as_deref()),
            city_id: query.cidade_id,
            equipment_id: query.equipamento_id,
            ..Default::default()
        }
    }
}

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/profissionais/pdf", get(professionals_pdf))
        .route("/profissionais/excel", get(professionals_excel))
        .route("/estatisticas", get(registry_statistics))
}

fn download_response(document: ReportDocument) -> AppResult<(HeaderMap, Vec<u8>)> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(document.content_type),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!(
            "attachment; filename=\"{}\"",
            document.file_name
        ))
        .map_err(|e| AppError::internal(format!("Cabeçalho inválido: {e}")))?,
    );

    Ok((headers, document.bytes))
}

/// Professional listing as PDF (editor and above)
#[utoipa::path(
    get,
    path = "/relatorios/profissionais/pdf",
    tag = "Relatórios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Documento PDF para download"),
        (status = 403, description = "Permissão negada")
    )
)]
pub async fn professionals_pdf(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let document = state.reports.professionals_pdf(query.into(), &ctx).await?;

    download_response(document)
}

/// Professional listing as spreadsheet (editor and above)
#[utoipa::path(
    get,
    path = "/relatorios/profissionais/excel",
    tag = "Relatórios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Planilha XLSX"),
        (status = 403, description = "Permissão negada")
    )
)]
pub async fn professionals_excel(
    Extension(current_user): Extension<CurrentUser>,
    SourceIp(source_ip): SourceIp,
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    let ctx = ActorContext::new(current_user.id, source_ip);
    let document = state
        .reports
        .professionals_spreadsheet(query.into(), &ctx)
        .await?;

    download_response(document)
}

/// Registry statistics (editor and above)
#[utoipa::path(
    get,
    path = "/relatorios/estatisticas",
    tag = "Relatórios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Estatísticas do registro", body = RegistryStatistics),
        (status = 403, description = "Permissão negada")
    )
)]
pub async fn registry_statistics(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<RegistryStatistics>> {
    let statistics = state.reports.statistics(current_user.id).await?;

    Ok(Json(statistics))
}
