//! Equipment (organizational unit) entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::city::RecordStatus;

/// Equipment domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Equipment {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    pub status: RecordStatus,
    #[serde(rename = "data_cadastro")]
    pub created_at: DateTime<Utc>,
}

/// Equipment creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    #[serde(rename = "nome")]
    #[schema(example = "CRAS Centro")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}

/// Equipment update payload; only set fields are applied
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}
