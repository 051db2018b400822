//! City entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Lifecycle status shared by cities and equipment.
///
/// Transitions are one-way: records are created `Ativo` and flipped to
/// `Inativo` on delete. Nothing flips them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Ativo,
    Inativo,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Ativo => "ativo",
            RecordStatus::Inativo => "inativo",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Ativo)
    }
}

impl From<&str> for RecordStatus {
    fn from(s: &str) -> Self {
        match s {
            "inativo" => RecordStatus::Inativo,
            _ => RecordStatus::Ativo,
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// City domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct City {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub status: RecordStatus,
    #[serde(rename = "data_cadastro")]
    pub created_at: DateTime<Utc>,
}

/// City creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCity {
    /// City name, unique across the registry
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    #[serde(rename = "nome")]
    #[schema(example = "Fortaleza")]
    pub name: String,
}

/// City update payload; only set fields are applied
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCity {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    #[serde(rename = "nome")]
    pub name: Option<String>,
}
