//! City repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::city::{self, ActiveModel, Entity as CityEntity};
use crate::domain::{City, RecordStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// City repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Find city by ID, regardless of status
    async fn find_by_id(&self, id: i32) -> AppResult<Option<City>>;

    /// Find city by its unique name, regardless of status
    async fn find_by_name(&self, name: &str) -> AppResult<Option<City>>;

    /// List active cities
    async fn list_active(&self) -> AppResult<Vec<City>>;

    /// List every city, inactive included (for display-name resolution)
    async fn list_all(&self) -> AppResult<Vec<City>>;

    /// Create a new active city
    async fn create(&self, name: String) -> AppResult<City>;

    /// Apply set fields to an existing city
    async fn update(&self, id: i32, name: Option<String>) -> AppResult<City>;

    /// Soft delete: flip status to inactive. The row is never removed.
    async fn deactivate(&self, id: i32) -> AppResult<City>;
}

/// Concrete implementation of CityRepository
pub struct CityStore {
    db: DatabaseConnection,
}

impl CityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CityRepository for CityStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<City>> {
        let result = CityEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(City::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<City>> {
        let result = CityEntity::find()
            .filter(city::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(City::from))
    }

    async fn list_active(&self) -> AppResult<Vec<City>> {
        let models = CityEntity::find()
            .filter(city::Column::Status.eq(RecordStatus::Ativo.as_str()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(City::from).collect())
    }

    async fn list_all(&self) -> AppResult<Vec<City>> {
        let models = CityEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(City::from).collect())
    }

    async fn create(&self, name: String) -> AppResult<City> {
        let active_model = ActiveModel {
            name: Set(name),
            status: Set(RecordStatus::Ativo.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(City::from(model))
    }

    async fn update(&self, id: i32, name: Option<String>) -> AppResult<City> {
        let city = CityEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = city.into();

        if let Some(name) = name {
            active.name = Set(name);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(City::from(model))
    }

    async fn deactivate(&self, id: i32) -> AppResult<City> {
        let city = CityEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = city.into();
        active.status = Set(RecordStatus::Inativo.as_str().to_string());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(City::from(model))
    }
}
