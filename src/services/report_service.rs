//! Report generation: professional listings as PDF or spreadsheet,
//! plus registry statistics.
//!
//! Purely presentational: rows are fetched with the same access scope
//! and filters as the professional listing, then rendered. Every
//! successful export appends an EXPORT audit entry.

use async_trait::async_trait;
use chrono::Utc;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{AUDIT_EXPORT_RECORD_ID, REPORT_TOP_PROFESSIONS};
use crate::domain::audit::tables;
use crate::domain::{
    access, AccessLevel, AuditAction, AuditEvent, Professional, ProfessionalFilter, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{CityRepository, EquipmentRepository, ProfessionalRepository, UserRepository};

use super::{load_actor, ActorContext, AuditRecorder};

/// A rendered export ready to stream back to the client
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: &'static str,
}

/// Overall professional counts
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GeneralStats {
    pub total_profissionais: i64,
    pub profissionais_ativos: i64,
    pub profissionais_inativos: i64,
    /// Active share in percent, two decimals
    pub taxa_atividade: f64,
}

/// Per-equipment breakdown
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentStats {
    pub equipamento: String,
    pub total: i64,
    pub ativos: i64,
    pub inativos: i64,
}

/// Per-city breakdown (global admins only)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CityStats {
    pub cidade: String,
    pub total: i64,
    pub ativos: i64,
    pub inativos: i64,
}

/// Per-profession count
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfessionStats {
    pub profissao: String,
    pub total: i64,
}

/// Registry statistics, scoped to the actor's city below global admin
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegistryStatistics {
    pub geral: GeneralStats,
    pub por_equipamento: Vec<EquipmentStats>,
    pub por_cidade: Vec<CityStats>,
    pub por_profissao: Vec<ProfessionStats>,
}

/// Report service trait for dependency injection.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Professional listing rendered as PDF (editor and above)
    async fn professionals_pdf(
        &self,
        filter: ProfessionalFilter,
        ctx: &ActorContext,
    ) -> AppResult<ReportDocument>;

    /// Professional listing rendered as a spreadsheet (editor and above)
    async fn professionals_spreadsheet(
        &self,
        filter: ProfessionalFilter,
        ctx: &ActorContext,
    ) -> AppResult<ReportDocument>;

    /// Registry statistics (editor and above)
    async fn statistics(&self, actor_id: i32) -> AppResult<RegistryStatistics>;
}

/// Rows plus the resolved display names they reference
struct ReportData {
    rows: Vec<Professional>,
    city_names: HashMap<i32, String>,
    equipment_names: HashMap<i32, String>,
}

impl ReportData {
    fn city_name(&self, id: i32) -> &str {
        self.city_names.get(&id).map(String::as_str).unwrap_or("N/A")
    }

    fn equipment_name(&self, id: i32) -> &str {
        self.equipment_names
            .get(&id)
            .map(String::as_str)
            .unwrap_or("N/A")
    }
}

/// Concrete implementation of ReportService.
pub struct ReportBuilder {
    professionals: Arc<dyn ProfessionalRepository>,
    cities: Arc<dyn CityRepository>,
    equipment: Arc<dyn EquipmentRepository>,
    users: Arc<dyn UserRepository>,
    audit: Arc<dyn AuditRecorder>,
}

impl ReportBuilder {
    pub fn new(
        professionals: Arc<dyn ProfessionalRepository>,
        cities: Arc<dyn CityRepository>,
        equipment: Arc<dyn EquipmentRepository>,
        users: Arc<dyn UserRepository>,
        audit: Arc<dyn AuditRecorder>,
    ) -> Self {
        Self {
            professionals,
            cities,
            equipment,
            users,
            audit,
        }
    }

    async fn load_data(&self, actor: &User, filter: &ProfessionalFilter) -> AppResult<ReportData> {
        let scope = access::professional_scope(actor);
        let rows = self.professionals.list(scope, filter).await?;

        let city_names = self
            .cities
            .list_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let equipment_names = self
            .equipment
            .list_all()
            .await?
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect();

        Ok(ReportData {
            rows,
            city_names,
            equipment_names,
        })
    }

    async fn record_export(&self, actor_id: i32, kind: &str, filter: &ProfessionalFilter, ctx: &ActorContext) {
        self.audit
            .record(
                AuditEvent::new(
                    actor_id,
                    AuditAction::Export,
                    tables::PROFISSIONAIS,
                    AUDIT_EXPORT_RECORD_ID,
                )
                .new_data(json!({
                    "tipo": kind,
                    "filtros": filters_json(filter),
                }))
                .source_ip(ctx.source_ip.clone()),
            )
            .await;
    }
}

/// Filters echoed into the export audit entry
fn filters_json(filter: &ProfessionalFilter) -> Value {
    let mut map = serde_json::Map::new();
    map.insert("status".to_string(), json!(filter.status.as_str()));
    if let Some(city_id) = filter.city_id {
        map.insert("cidade_id".to_string(), json!(city_id));
    }
    if let Some(equipment_id) = filter.equipment_id {
        map.insert("equipamento_id".to_string(), json!(equipment_id));
    }
    Value::Object(map)
}

fn file_stamp() -> String {
    Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

// -----------------------------------------------------------------------------
// PDF rendering
// -----------------------------------------------------------------------------

/// (x position in mm, header label, character budget)
const PDF_COLUMNS: [(f32, &str, usize); 6] = [
    (10.0, "Nome", 36),
    (80.0, "CPF", 16),
    (115.0, "Profissão", 18),
    (150.0, "Cargo", 18),
    (185.0, "Equipamento", 32),
    (250.0, "Status", 8),
];

const PDF_PAGE_WIDTH: f32 = 297.0;
const PDF_PAGE_HEIGHT: f32 = 210.0;

fn pdf_err(e: impl std::fmt::Display) -> AppError {
    AppError::internal(format!("Falha ao gerar PDF: {e}"))
}

fn draw_table_header(layer: &PdfLayerReference, font: &IndirectFontRef, y: f32) {
    for (x, label, _) in PDF_COLUMNS {
        layer.use_text(label, 9.0, Mm(x), Mm(y), font);
    }
}

fn render_pdf(data: &ReportData, filter: &ProfessionalFilter) -> AppResult<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Relatório de Profissionais",
        Mm(PDF_PAGE_WIDTH),
        Mm(PDF_PAGE_HEIGHT),
        "conteudo",
    );

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    layer.use_text("Relatório de Profissionais", 16.0, Mm(105.0), Mm(196.0), &bold);

    let generated = Utc::now().format("%d/%m/%Y %H:%M").to_string();
    layer.use_text(
        format!("Data de geração: {generated}"),
        10.0,
        Mm(10.0),
        Mm(186.0),
        &regular,
    );
    layer.use_text(
        format!("Status: {}", filter.status.as_str()),
        10.0,
        Mm(10.0),
        Mm(181.0),
        &regular,
    );
    layer.use_text(
        format!("Total de registros: {}", data.rows.len()),
        10.0,
        Mm(10.0),
        Mm(176.0),
        &regular,
    );

    let mut y = 166.0;

    if data.rows.is_empty() {
        layer.use_text(
            "Nenhum profissional encontrado com os filtros aplicados.",
            10.0,
            Mm(10.0),
            Mm(y),
            &regular,
        );
        return doc.save_to_bytes().map_err(pdf_err);
    }

    draw_table_header(&layer, &bold, y);
    y -= 6.0;

    for professional in &data.rows {
        if y < 15.0 {
            let (page, layer_index) =
                doc.add_page(Mm(PDF_PAGE_WIDTH), Mm(PDF_PAGE_HEIGHT), "conteudo");
            layer = doc.get_page(page).get_layer(layer_index);
            y = 196.0;
            draw_table_header(&layer, &bold, y);
            y -= 6.0;
        }

        let cells = [
            professional.full_name.as_str(),
            professional.cpf.as_str(),
            professional.profession.as_str(),
            professional.role.as_str(),
            data.equipment_name(professional.equipment_id),
            professional.status_label(),
        ];

        for ((x, _, budget), text) in PDF_COLUMNS.iter().zip(cells) {
            layer.use_text(truncate(text, *budget), 8.0, Mm(*x), Mm(y), &regular);
        }

        y -= 5.0;
    }

    doc.save_to_bytes().map_err(pdf_err)
}

// -----------------------------------------------------------------------------
// Spreadsheet rendering
// -----------------------------------------------------------------------------

const SHEET_HEADERS: [&str; 15] = [
    "Nome Completo",
    "CPF",
    "RG",
    "Data Nascimento",
    "Escolaridade",
    "Profissão",
    "Cargo",
    "Vínculo",
    "Telefone",
    "Email",
    "Data Início Trabalho",
    "Endereço",
    "Cidade",
    "Equipamento",
    "Status",
];

fn sheet_err(e: impl std::fmt::Display) -> AppError {
    AppError::internal(format!("Falha ao gerar planilha: {e}"))
}

fn render_spreadsheet(data: &ReportData) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Profissionais").map_err(sheet_err)?;

    let header_format = Format::new().set_bold();

    for (col, header) in SHEET_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(sheet_err)?;
    }

    let mut widths: Vec<usize> = SHEET_HEADERS.iter().map(|h| h.chars().count()).collect();

    for (row, professional) in data.rows.iter().enumerate() {
        let cells = [
            professional.full_name.clone(),
            professional.cpf.clone(),
            professional.rg.clone(),
            professional.birth_date.format("%d/%m/%Y").to_string(),
            professional.education_level.clone(),
            professional.profession.clone(),
            professional.role.clone(),
            professional.affiliation.clone(),
            professional.phone.clone(),
            professional.email.clone(),
            professional
                .employment_start_date
                .format("%d/%m/%Y")
                .to_string(),
            professional.address.clone(),
            data.city_name(professional.city_id).to_string(),
            data.equipment_name(professional.equipment_id).to_string(),
            professional.status_label().to_string(),
        ];

        for (col, value) in cells.iter().enumerate() {
            widths[col] = widths[col].max(value.chars().count());
            worksheet
                .write_string(row as u32 + 1, col as u16, value)
                .map_err(sheet_err)?;
        }
    }

    for (col, width) in widths.iter().enumerate() {
        let adjusted = (*width + 2).min(50) as f64;
        worksheet
            .set_column_width(col as u16, adjusted)
            .map_err(sheet_err)?;
    }

    workbook.save_to_buffer().map_err(sheet_err)
}

// -----------------------------------------------------------------------------
// Statistics
// -----------------------------------------------------------------------------

/// Fold `(key, active, count)` rows into per-key totals
fn fold_activity(rows: Vec<(i32, bool, i64)>) -> HashMap<i32, (i64, i64, i64)> {
    let mut grouped: HashMap<i32, (i64, i64, i64)> = HashMap::new();
    for (key, active, count) in rows {
        let entry = grouped.entry(key).or_default();
        entry.0 += count;
        if active {
            entry.1 += count;
        } else {
            entry.2 += count;
        }
    }
    grouped
}

#[async_trait]
impl ReportService for ReportBuilder {
    async fn professionals_pdf(
        &self,
        filter: ProfessionalFilter,
        ctx: &ActorContext,
    ) -> AppResult<ReportDocument> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_export(&actor) {
            return Err(AppError::Forbidden);
        }

        let data = self.load_data(&actor, &filter).await?;
        let bytes = render_pdf(&data, &filter)?;

        self.record_export(actor.id, "PDF", &filter, ctx).await;

        Ok(ReportDocument {
            bytes,
            file_name: format!("relatorio_profissionais_{}.pdf", file_stamp()),
            content_type: "application/pdf",
        })
    }

    async fn professionals_spreadsheet(
        &self,
        filter: ProfessionalFilter,
        ctx: &ActorContext,
    ) -> AppResult<ReportDocument> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_export(&actor) {
            return Err(AppError::Forbidden);
        }

        let data = self.load_data(&actor, &filter).await?;
        let bytes = render_spreadsheet(&data)?;

        self.record_export(actor.id, "Excel", &filter, ctx).await;

        Ok(ReportDocument {
            bytes,
            file_name: format!("relatorio_profissionais_{}.xlsx", file_stamp()),
            content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        })
    }

    async fn statistics(&self, actor_id: i32) -> AppResult<RegistryStatistics> {
        let actor = load_actor(self.users.as_ref(), actor_id).await?;
        if !access::can_export(&actor) {
            return Err(AppError::Forbidden);
        }

        let scope = access::professional_scope(&actor);

        let activity = self.professionals.count_by_activity(scope).await?;
        let total: i64 = activity.iter().map(|(_, count)| count).sum();
        let active: i64 = activity
            .iter()
            .filter(|(is_active, _)| *is_active)
            .map(|(_, count)| count)
            .sum();
        let inactive = total - active;

        let rate = if total > 0 {
            (active as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
        } else {
            0.0
        };

        let equipment_names: HashMap<i32, String> = self
            .equipment
            .list_all()
            .await?
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect();

        let mut by_equipment: Vec<EquipmentStats> =
            fold_activity(self.professionals.count_by_equipment(scope).await?)
                .into_iter()
                .map(|(id, (total, ativos, inativos))| EquipmentStats {
                    equipamento: equipment_names
                        .get(&id)
                        .cloned()
                        .unwrap_or_else(|| "N/A".to_string()),
                    total,
                    ativos,
                    inativos,
                })
                .collect();
        by_equipment.sort_by(|a, b| a.equipamento.cmp(&b.equipamento));

        // Per-city breakdown only makes sense without a city scope
        let by_city = if actor.access_level == AccessLevel::GlobalAdmin {
            let city_names: HashMap<i32, String> = self
                .cities
                .list_all()
                .await?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();

            let mut stats: Vec<CityStats> =
                fold_activity(self.professionals.count_by_city().await?)
                    .into_iter()
                    .map(|(id, (total, ativos, inativos))| CityStats {
                        cidade: city_names
                            .get(&id)
                            .cloned()
                            .unwrap_or_else(|| "N/A".to_string()),
                        total,
                        ativos,
                        inativos,
                    })
                    .collect();
            stats.sort_by(|a, b| a.cidade.cmp(&b.cidade));
            stats
        } else {
            Vec::new()
        };

        let mut professions = self.professionals.count_by_profession(scope).await?;
        professions.sort_by(|a, b| b.1.cmp(&a.1));
        professions.truncate(REPORT_TOP_PROFESSIONS as usize);

        let by_profession = professions
            .into_iter()
            .map(|(profissao, total)| ProfessionStats { profissao, total })
            .collect();

        Ok(RegistryStatistics {
            geral: GeneralStats {
                total_profissionais: total,
                profissionais_ativos: active,
                profissionais_inativos: inactive,
                taxa_atividade: rate,
            },
            por_equipamento: by_equipment,
            por_cidade: by_city,
            por_profissao: by_profession,
        })
    }
}
