//! Professional database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Professional;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profissionais")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub equipment_id: i32,
    pub full_name: String,
    pub birth_date: Date,
    #[sea_orm(unique)]
    pub cpf: String,
    #[sea_orm(unique)]
    pub rg: String,
    pub rg_issue_date: Date,
    pub education_level: String,
    pub profession: String,
    pub role: String,
    pub affiliation: String,
    pub phone: String,
    #[sea_orm(unique)]
    pub email: String,
    pub employment_start_date: Date,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub city_id: i32,
    pub created_at: DateTimeUtc,
    pub active: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub inactivation_reason: Option<String>,
    pub inactivated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Professional {
    fn from(model: Model) -> Self {
        Professional {
            id: model.id,
            equipment_id: model.equipment_id,
            full_name: model.full_name,
            birth_date: model.birth_date,
            cpf: model.cpf,
            rg: model.rg,
            rg_issue_date: model.rg_issue_date,
            education_level: model.education_level,
            profession: model.profession,
            role: model.role,
            affiliation: model.affiliation,
            phone: model.phone,
            email: model.email,
            employment_start_date: model.employment_start_date,
            address: model.address,
            city_id: model.city_id,
            created_at: model.created_at,
            active: model.active,
            inactivation_reason: model.inactivation_reason,
            inactivated_at: model.inactivated_at,
        }
    }
}
