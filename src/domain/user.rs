//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Access level hierarchy.
///
/// Serialized as the bare integer (`nivel_acesso`) on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "i32", try_from = "i32")]
pub enum AccessLevel {
    /// Read-only access
    Viewer = 1,
    /// Can edit professionals of their own city
    Editor = 2,
    /// Full rights within their own city, cannot elevate anyone to global admin
    CityAdmin = 3,
    /// Unrestricted
    GlobalAdmin = 4,
}

impl AccessLevel {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<AccessLevel> for i32 {
    fn from(level: AccessLevel) -> Self {
        level as i32
    }
}

impl TryFrom<i32> for AccessLevel {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AccessLevel::Viewer),
            2 => Ok(AccessLevel::Editor),
            3 => Ok(AccessLevel::CityAdmin),
            4 => Ok(AccessLevel::GlobalAdmin),
            other => Err(format!("nível de acesso inválido: {other}")),
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    #[schema(value_type = String)]
    pub password_hash: String,
    #[serde(rename = "nivel_acesso")]
    #[schema(value_type = i32, minimum = 1, maximum = 4)]
    pub access_level: AccessLevel,
    #[serde(rename = "cidade_id")]
    pub city_id: Option<i32>,
    #[serde(rename = "data_cadastro")]
    pub created_at: DateTime<Utc>,
}

/// User creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    #[serde(rename = "nome_completo")]
    #[schema(example = "Maria da Silva")]
    pub full_name: String,
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "maria@example.com")]
    pub email: String,
    /// Plain text password, hashed before storage
    #[serde(rename = "senha")]
    #[schema(example = "SenhaSegura123!", min_length = 8)]
    pub password: String,
    #[serde(rename = "nivel_acesso")]
    #[schema(value_type = Option<i32>)]
    pub access_level: Option<AccessLevel>,
    #[serde(rename = "cidade_id")]
    pub city_id: Option<i32>,
}

/// User update payload; only set fields are applied
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    #[serde(rename = "nome_completo")]
    pub full_name: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    /// New plain text password, re-hashed before storage
    #[serde(rename = "senha")]
    pub password: Option<String>,
    #[serde(rename = "nivel_acesso")]
    #[schema(value_type = Option<i32>)]
    pub access_level: Option<AccessLevel>,
    #[serde(rename = "cidade_id")]
    pub city_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_level_ordering_follows_hierarchy() {
        assert!(AccessLevel::GlobalAdmin > AccessLevel::CityAdmin);
        assert!(AccessLevel::CityAdmin > AccessLevel::Editor);
        assert!(AccessLevel::Editor > AccessLevel::Viewer);
    }

    #[test]
    fn access_level_round_trips_through_i32() {
        for n in 1..=4 {
            let level = AccessLevel::try_from(n).unwrap();
            assert_eq!(level.as_i32(), n);
        }
        assert!(AccessLevel::try_from(0).is_err());
        assert!(AccessLevel::try_from(5).is_err());
    }
}
