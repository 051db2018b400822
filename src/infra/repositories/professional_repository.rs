//! Professional repository.
//!
//! Deletion is always soft: rows flip `active` off and keep the
//! inactivation reason and timestamp.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};

use super::entities::professional::{self, ActiveModel, Entity as ProfessionalEntity};
use crate::domain::{
    CreateProfessional, ListScope, Professional, ProfessionalFilter, StatusFilter,
    UpdateProfessional,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Professional repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfessionalRepository: Send + Sync {
    /// Find professional by ID, active or not
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Professional>>;

    /// Find professional by CPF
    async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Professional>>;

    /// Find professional by RG
    async fn find_by_rg(&self, rg: &str) -> AppResult<Option<Professional>>;

    /// Find professional by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Professional>>;

    /// List professionals within a scope, with caller filters ANDed on top
    async fn list(&self, scope: ListScope, filter: &ProfessionalFilter)
        -> AppResult<Vec<Professional>>;

    /// List professionals assigned to one equipment unit
    async fn list_by_equipment(
        &self,
        equipment_id: i32,
        status: StatusFilter,
    ) -> AppResult<Vec<Professional>>;

    /// Create a new active professional
    async fn create(&self, data: CreateProfessional) -> AppResult<Professional>;

    /// Apply set fields to an existing professional
    async fn update(&self, id: i32, changes: UpdateProfessional) -> AppResult<Professional>;

    /// Soft delete: clear the active flag and record why and when
    async fn inactivate(&self, id: i32, reason: String) -> AppResult<Professional>;

    /// Reverse a soft delete, clearing reason and timestamp
    async fn reactivate(&self, id: i32) -> AppResult<Professional>;

    /// Row counts grouped by active flag
    async fn count_by_activity(&self, scope: ListScope) -> AppResult<Vec<(bool, i64)>>;

    /// Row counts grouped by (equipment, active flag)
    async fn count_by_equipment(&self, scope: ListScope) -> AppResult<Vec<(i32, bool, i64)>>;

    /// Row counts grouped by (city, active flag); unscoped
    async fn count_by_city(&self) -> AppResult<Vec<(i32, bool, i64)>>;

    /// Row counts grouped by profession
    async fn count_by_profession(&self, scope: ListScope) -> AppResult<Vec<(String, i64)>>;
}

/// Concrete implementation of ProfessionalRepository
pub struct ProfessionalStore {
    db: DatabaseConnection,
}

impl ProfessionalStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Case-insensitive substring condition on a text column
fn contains_ci(
    column: professional::Column,
    term: &str,
) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", term.to_lowercase()))
}

fn status_condition(
    query: sea_orm::Select<ProfessionalEntity>,
    status: StatusFilter,
) -> sea_orm::Select<ProfessionalEntity> {
    match status {
        StatusFilter::Ativo => query.filter(professional::Column::Active.eq(true)),
        StatusFilter::Inativo => query.filter(professional::Column::Active.eq(false)),
        StatusFilter::Todos => query,
    }
}

#[async_trait]
impl ProfessionalRepository for ProfessionalStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Professional>> {
        let result = ProfessionalEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Professional::from))
    }

    async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Professional>> {
        let result = ProfessionalEntity::find()
            .filter(professional::Column::Cpf.eq(cpf))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Professional::from))
    }

    async fn find_by_rg(&self, rg: &str) -> AppResult<Option<Professional>> {
        let result = ProfessionalEntity::find()
            .filter(professional::Column::Rg.eq(rg))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Professional::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Professional>> {
        let result = ProfessionalEntity::find()
            .filter(professional::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Professional::from))
    }

    async fn list(
        &self,
        scope: ListScope,
        filter: &ProfessionalFilter,
    ) -> AppResult<Vec<Professional>> {
        let mut query = ProfessionalEntity::find();

        match scope {
            ListScope::All => {}
            ListScope::City(Some(city_id)) => {
                query = query.filter(professional::Column::CityId.eq(city_id));
            }
            ListScope::City(None) => return Ok(Vec::new()),
        }

        query = status_condition(query, filter.status);

        if let Some(city_id) = filter.city_id {
            query = query.filter(professional::Column::CityId.eq(city_id));
        }
        if let Some(equipment_id) = filter.equipment_id {
            query = query.filter(professional::Column::EquipmentId.eq(equipment_id));
        }
        if let Some(ref term) = filter.profession {
            query = query.filter(contains_ci(professional::Column::Profession, term));
        }
        if let Some(ref term) = filter.role {
            query = query.filter(contains_ci(professional::Column::Role, term));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(Professional::from).collect())
    }

    async fn list_by_equipment(
        &self,
        equipment_id: i32,
        status: StatusFilter,
    ) -> AppResult<Vec<Professional>> {
        let query = ProfessionalEntity::find()
            .filter(professional::Column::EquipmentId.eq(equipment_id));
        let query = status_condition(query, status);

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(Professional::from).collect())
    }

    async fn create(&self, data: CreateProfessional) -> AppResult<Professional> {
        let active_model = ActiveModel {
            equipment_id: Set(data.equipment_id),
            full_name: Set(data.full_name),
            birth_date: Set(data.birth_date),
            cpf: Set(data.cpf),
            rg: Set(data.rg),
            rg_issue_date: Set(data.rg_issue_date),
            education_level: Set(data.education_level),
            profession: Set(data.profession),
            role: Set(data.role),
            affiliation: Set(data.affiliation),
            phone: Set(data.phone),
            email: Set(data.email),
            employment_start_date: Set(data.employment_start_date),
            address: Set(data.address),
            city_id: Set(data.city_id),
            created_at: Set(Utc::now()),
            active: Set(true),
            inactivation_reason: Set(None),
            inactivated_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Professional::from(model))
    }

    async fn update(&self, id: i32, changes: UpdateProfessional) -> AppResult<Professional> {
        let stored = ProfessionalEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = stored.into();

        if let Some(equipment_id) = changes.equipment_id {
            active.equipment_id = Set(equipment_id);
        }
        if let Some(full_name) = changes.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(birth_date) = changes.birth_date {
            active.birth_date = Set(birth_date);
        }
        if let Some(cpf) = changes.cpf {
            active.cpf = Set(cpf);
        }
        if let Some(rg) = changes.rg {
            active.rg = Set(rg);
        }
        if let Some(rg_issue_date) = changes.rg_issue_date {
            active.rg_issue_date = Set(rg_issue_date);
        }
        if let Some(education_level) = changes.education_level {
            active.education_level = Set(education_level);
        }
        if let Some(profession) = changes.profession {
            active.profession = Set(profession);
        }
        if let Some(role) = changes.role {
            active.role = Set(role);
        }
        if let Some(affiliation) = changes.affiliation {
            active.affiliation = Set(affiliation);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(employment_start_date) = changes.employment_start_date {
            active.employment_start_date = Set(employment_start_date);
        }
        if let Some(address) = changes.address {
            active.address = Set(address);
        }
        if let Some(city_id) = changes.city_id {
            active.city_id = Set(city_id);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Professional::from(model))
    }

    async fn inactivate(&self, id: i32, reason: String) -> AppResult<Professional> {
        let stored = ProfessionalEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = stored.into();
        active.active = Set(false);
        active.inactivation_reason = Set(Some(reason));
        active.inactivated_at = Set(Some(Utc::now()));

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Professional::from(model))
    }

    async fn reactivate(&self, id: i32) -> AppResult<Professional> {
        let stored = ProfessionalEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = stored.into();
        active.active = Set(true);
        active.inactivation_reason = Set(None);
        active.inactivated_at = Set(None);

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Professional::from(model))
    }

    async fn count_by_activity(&self, scope: ListScope) -> AppResult<Vec<(bool, i64)>> {
        let mut query = ProfessionalEntity::find();

        match scope {
            ListScope::All => {}
            ListScope::City(Some(city_id)) => {
                query = query.filter(professional::Column::CityId.eq(city_id));
            }
            ListScope::City(None) => return Ok(Vec::new()),
        }

        let rows = query
            .select_only()
            .column(professional::Column::Active)
            .column_as(professional::Column::Id.count(), "total")
            .group_by(professional::Column::Active)
            .into_tuple::<(bool, i64)>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows)
    }

    async fn count_by_equipment(&self, scope: ListScope) -> AppResult<Vec<(i32, bool, i64)>> {
        let mut query = ProfessionalEntity::find();

        match scope {
            ListScope::All => {}
            ListScope::City(Some(city_id)) => {
                query = query.filter(professional::Column::CityId.eq(city_id));
            }
            ListScope::City(None) => return Ok(Vec::new()),
        }

        let rows = query
            .select_only()
            .column(professional::Column::EquipmentId)
            .column(professional::Column::Active)
            .column_as(professional::Column::Id.count(), "total")
            .group_by(professional::Column::EquipmentId)
            .group_by(professional::Column::Active)
            .into_tuple::<(i32, bool, i64)>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows)
    }

    async fn count_by_city(&self) -> AppResult<Vec<(i32, bool, i64)>> {
        let rows = ProfessionalEntity::find()
            .select_only()
            .column(professional::Column::CityId)
            .column(professional::Column::Active)
            .column_as(professional::Column::Id.count(), "total")
            .group_by(professional::Column::CityId)
            .group_by(professional::Column::Active)
            .into_tuple::<(i32, bool, i64)>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows)
    }

    async fn count_by_profession(&self, scope: ListScope) -> AppResult<Vec<(String, i64)>> {
        let mut query = ProfessionalEntity::find();

        match scope {
            ListScope::All => {}
            ListScope::City(Some(city_id)) => {
                query = query.filter(professional::Column::CityId.eq(city_id));
            }
            ListScope::City(None) => return Ok(Vec::new()),
        }

        let rows = query
            .select_only()
            .column(professional::Column::Profession)
            .column_as(professional::Column::Id.count(), "total")
            .group_by(professional::Column::Profession)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows)
    }
}
