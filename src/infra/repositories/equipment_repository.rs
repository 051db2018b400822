//! Equipment repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::equipment::{self, ActiveModel, Entity as EquipmentEntity};
use crate::domain::{Equipment, RecordStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Equipment repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    /// Find equipment by ID, regardless of status
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>>;

    /// List active equipment
    async fn list_active(&self) -> AppResult<Vec<Equipment>>;

    /// List every unit, inactive included (for display-name resolution)
    async fn list_all(&self) -> AppResult<Vec<Equipment>>;

    /// Create a new active unit
    async fn create(&self, name: String, description: Option<String>) -> AppResult<Equipment>;

    /// Apply set fields to an existing unit
    async fn update(
        &self,
        id: i32,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Equipment>;

    /// Soft delete: flip status to inactive. The row is never removed.
    async fn deactivate(&self, id: i32) -> AppResult<Equipment>;
}

/// Concrete implementation of EquipmentRepository
pub struct EquipmentStore {
    db: DatabaseConnection,
}

impl EquipmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EquipmentRepository for EquipmentStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        let result = EquipmentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Equipment::from))
    }

    async fn list_active(&self) -> AppResult<Vec<Equipment>> {
        let models = EquipmentEntity::find()
            .filter(equipment::Column::Status.eq(RecordStatus::Ativo.as_str()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Equipment::from).collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Equipment>> {
        let models = EquipmentEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Equipment::from).collect())
    }

    async fn create(&self, name: String, description: Option<String>) -> AppResult<Equipment> {
        let active_model = ActiveModel {
            name: Set(name),
            description: Set(description),
            status: Set(RecordStatus::Ativo.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Equipment::from(model))
    }

    async fn update(
        &self,
        id: i32,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Equipment> {
        let unit = EquipmentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = unit.into();

        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(description) = description {
            active.description = Set(Some(description));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Equipment::from(model))
    }

    async fn deactivate(&self, id: i32) -> AppResult<Equipment> {
        let unit = EquipmentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = unit.into();
        active.status = Set(RecordStatus::Inativo.as_str().to_string());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Equipment::from(model))
    }
}
