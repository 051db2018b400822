//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{AccessLevel, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub access_level: i32,
    pub city_id: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            password_hash: model.password_hash,
            // Rows predating the level check fall back to view-only
            access_level: AccessLevel::try_from(model.access_level)
                .unwrap_or(AccessLevel::Viewer),
            city_id: model.city_id,
            created_at: model.created_at,
        }
    }
}
