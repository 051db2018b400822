//! Audit trail database entity for SeaORM.
//!
//! Rows are append-only; the application never updates or deletes them.

use sea_orm::entity::prelude::*;

use crate::domain::AuditEntry;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auditoria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub action: String,
    pub table_name: String,
    pub record_id: i32,
    #[sea_orm(nullable)]
    pub old_data: Option<Json>,
    #[sea_orm(nullable)]
    pub new_data: Option<Json>,
    pub recorded_at: DateTimeUtc,
    pub source_ip: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for AuditEntry {
    fn from(model: Model) -> Self {
        AuditEntry {
            id: model.id,
            user_id: model.user_id,
            action: model.action,
            table: model.table_name,
            record_id: model.record_id,
            old_data: model.old_data,
            new_data: model.new_data,
            recorded_at: model.recorded_at,
            source_ip: model.source_ip,
        }
    }
}
