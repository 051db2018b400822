//! Professional entity, the primary managed aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Professional domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Professional {
    pub id: i32,
    #[serde(rename = "equipamento_id")]
    pub equipment_id: i32,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
    /// National taxpayer id, unique
    pub cpf: String,
    /// Identity document number, unique
    pub rg: String,
    #[serde(rename = "data_expedicao_rg")]
    pub rg_issue_date: NaiveDate,
    #[serde(rename = "escolaridade")]
    pub education_level: String,
    #[serde(rename = "profissao")]
    pub profession: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "vinculo_institucional")]
    pub affiliation: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "data_inicio_trabalho")]
    pub employment_start_date: NaiveDate,
    #[serde(rename = "endereco_residencial")]
    pub address: String,
    #[serde(rename = "cidade_id")]
    pub city_id: i32,
    #[serde(rename = "data_cadastro")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "motivo_inativacao")]
    pub inactivation_reason: Option<String>,
    #[serde(rename = "data_inativacao")]
    pub inactivated_at: Option<DateTime<Utc>>,
}

impl Professional {
    /// Label shown on reports
    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Ativo"
        } else {
            "Inativo"
        }
    }
}

/// Professional creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProfessional {
    #[serde(rename = "equipamento_id")]
    pub equipment_id: i32,
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
    #[validate(length(min = 1, message = "CPF é obrigatório"))]
    pub cpf: String,
    #[validate(length(min = 1, message = "RG é obrigatório"))]
    pub rg: String,
    #[serde(rename = "data_expedicao_rg")]
    pub rg_issue_date: NaiveDate,
    #[serde(rename = "escolaridade")]
    pub education_level: String,
    #[serde(rename = "profissao")]
    pub profession: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "vinculo_institucional")]
    pub affiliation: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[serde(rename = "data_inicio_trabalho")]
    pub employment_start_date: NaiveDate,
    #[serde(rename = "endereco_residencial")]
    pub address: String,
    #[serde(rename = "cidade_id")]
    pub city_id: i32,
}

/// Professional update payload; only set fields are applied
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfessional {
    #[serde(rename = "equipamento_id")]
    pub equipment_id: Option<i32>,
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    #[serde(rename = "nome_completo")]
    pub full_name: Option<String>,
    #[serde(rename = "data_nascimento")]
    pub birth_date: Option<NaiveDate>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    #[serde(rename = "data_expedicao_rg")]
    pub rg_issue_date: Option<NaiveDate>,
    #[serde(rename = "escolaridade")]
    pub education_level: Option<String>,
    #[serde(rename = "profissao")]
    pub profession: Option<String>,
    #[serde(rename = "cargo")]
    pub role: Option<String>,
    #[serde(rename = "vinculo_institucional")]
    pub affiliation: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    #[serde(rename = "data_inicio_trabalho")]
    pub employment_start_date: Option<NaiveDate>,
    #[serde(rename = "endereco_residencial")]
    pub address: Option<String>,
    #[serde(rename = "cidade_id")]
    pub city_id: Option<i32>,
}

/// Inactivation payload for the soft delete endpoint
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InactivateProfessional {
    #[serde(rename = "motivo_inativacao")]
    pub reason: Option<String>,
}

/// Active-status filter accepted by listings and reports.
///
/// Unknown values fall through to `Todos`, as the original API did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    Ativo,
    Inativo,
    Todos,
}

impl From<&str> for StatusFilter {
    fn from(s: &str) -> Self {
        match s {
            "ativo" => StatusFilter::Ativo,
            "inativo" => StatusFilter::Inativo,
            _ => StatusFilter::Todos,
        }
    }
}

impl StatusFilter {
    pub fn from_param(param: Option<&str>) -> Self {
        param.map(StatusFilter::from).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Ativo => "ativo",
            StatusFilter::Inativo => "inativo",
            StatusFilter::Todos => "todos",
        }
    }
}

/// Caller-supplied listing filters, applied after access scoping, all ANDed
#[derive(Debug, Clone, Default)]
pub struct ProfessionalFilter {
    pub status: StatusFilter,
    pub city_id: Option<i32>,
    pub equipment_id: Option<i32>,
    /// Case-insensitive substring match
    pub profession: Option<String>,
    /// Case-insensitive substring match
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_defaults_to_active() {
        assert_eq!(StatusFilter::from_param(None), StatusFilter::Ativo);
    }

    #[test]
    fn status_filter_falls_through_to_all() {
        assert_eq!(StatusFilter::from_param(Some("todos")), StatusFilter::Todos);
        assert_eq!(StatusFilter::from_param(Some("qualquer")), StatusFilter::Todos);
        assert_eq!(StatusFilter::from_param(Some("inativo")), StatusFilter::Inativo);
    }
}
