//! Equipment database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Equipment, RecordStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "equipamentos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Equipment {
    fn from(model: Model) -> Self {
        Equipment {
            id: model.id,
            name: model.name,
            description: model.description,
            status: RecordStatus::from(model.status.as_str()),
            created_at: model.created_at,
        }
    }
}
