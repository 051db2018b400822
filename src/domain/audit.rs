//! Audit trail entities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Table names as recorded on audit entries
pub mod tables {
    pub const CIDADES: &str = "cidades";
    pub const EQUIPAMENTOS: &str = "equipamentos";
    pub const USUARIOS: &str = "usuarios";
    pub const PROFISSIONAIS: &str = "profissionais";
}

/// Kind of mutation recorded on the trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Export,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Export => "EXPORT",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable audit log row. Never updated or deleted by the application.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditEntry {
    pub id: i32,
    #[serde(rename = "usuario_id")]
    pub user_id: i32,
    #[serde(rename = "acao")]
    pub action: String,
    #[serde(rename = "tabela")]
    pub table: String,
    #[serde(rename = "registro_id")]
    pub record_id: i32,
    #[serde(rename = "dados_antigos")]
    #[schema(value_type = Option<Object>)]
    pub old_data: Option<Value>,
    #[serde(rename = "dados_novos")]
    #[schema(value_type = Option<Object>)]
    pub new_data: Option<Value>,
    #[serde(rename = "data_hora")]
    pub recorded_at: DateTime<Utc>,
    #[serde(rename = "ip_origem")]
    pub source_ip: Option<String>,
}

/// A mutation about to be appended to the trail
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub user_id: i32,
    pub action: AuditAction,
    pub table: &'static str,
    pub record_id: i32,
    pub old_data: Option<Value>,
    pub new_data: Option<Value>,
    pub source_ip: Option<String>,
}

impl AuditEvent {
    pub fn new(user_id: i32, action: AuditAction, table: &'static str, record_id: i32) -> Self {
        Self {
            user_id,
            action,
            table,
            record_id,
            old_data: None,
            new_data: None,
            source_ip: None,
        }
    }

    pub fn old_data(mut self, data: Value) -> Self {
        self.old_data = Some(data);
        self
    }

    pub fn new_data(mut self, data: Value) -> Self {
        self.new_data = Some(data);
        self
    }

    pub fn source_ip(mut self, ip: Option<String>) -> Self {
        self.source_ip = ip;
        self
    }
}

/// Audit log query filters, all ANDed
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub table: Option<String>,
    pub action: Option<String>,
    pub user_id: Option<i32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Count of entries per action kind
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActionCount {
    #[serde(rename = "acao")]
    pub action: String,
    pub total: i64,
}

/// Count of entries per affected table
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TableCount {
    #[serde(rename = "tabela")]
    pub table: String,
    pub total: i64,
}

/// Count of entries per acting user, keyed by display name
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserCount {
    #[serde(rename = "usuario")]
    pub user: String,
    pub total: i64,
}

/// Counts grouped by action, table and acting-user name
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditStatistics {
    #[serde(rename = "acoes")]
    pub by_action: Vec<ActionCount>,
    #[serde(rename = "tabelas")]
    pub by_table: Vec<TableCount>,
    #[serde(rename = "usuarios")]
    pub by_user: Vec<UserCount>,
}
