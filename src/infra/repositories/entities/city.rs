//! City database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{City, RecordStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cidades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for City {
    fn from(model: Model) -> Self {
        City {
            id: model.id,
            name: model.name,
            status: RecordStatus::from(model.status.as_str()),
            created_at: model.created_at,
        }
    }
}
