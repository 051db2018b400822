//! Audit trail repository.
//!
//! Insert and read only; the trail is never updated or pruned here.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::entities::audit::{self, ActiveModel, Entity as AuditEntity};
use crate::domain::{AuditEntry, AuditEvent, AuditFilter};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Audit repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Append one entry to the trail
    async fn insert(&self, event: AuditEvent) -> AppResult<AuditEntry>;

    /// Query the trail, newest first, capped at `limit` rows
    async fn query(&self, filter: &AuditFilter, limit: u64) -> AppResult<Vec<AuditEntry>>;

    /// Entry counts grouped by action
    async fn count_by_action(&self) -> AppResult<Vec<(String, i64)>>;

    /// Entry counts grouped by affected table
    async fn count_by_table(&self) -> AppResult<Vec<(String, i64)>>;

    /// Entry counts grouped by acting user id
    async fn count_by_user(&self) -> AppResult<Vec<(i32, i64)>>;
}

/// Concrete implementation of AuditRepository
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditRepository for AuditStore {
    async fn insert(&self, event: AuditEvent) -> AppResult<AuditEntry> {
        let active_model = ActiveModel {
            user_id: Set(event.user_id),
            action: Set(event.action.as_str().to_string()),
            table_name: Set(event.table.to_string()),
            record_id: Set(event.record_id),
            old_data: Set(event.old_data),
            new_data: Set(event.new_data),
            recorded_at: Set(Utc::now()),
            source_ip: Set(event.source_ip),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(AuditEntry::from(model))
    }

    async fn query(&self, filter: &AuditFilter, limit: u64) -> AppResult<Vec<AuditEntry>> {
        let mut query = AuditEntity::find();

        if let Some(ref table) = filter.table {
            query = query.filter(audit::Column::TableName.eq(table.as_str()));
        }
        if let Some(ref action) = filter.action {
            query = query.filter(audit::Column::Action.eq(action.as_str()));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(audit::Column::UserId.eq(user_id));
        }
        // Date bounds compare against midnight UTC of the given day
        if let Some(date_from) = filter.date_from {
            let start = date_from.and_time(chrono::NaiveTime::MIN).and_utc();
            query = query.filter(audit::Column::RecordedAt.gte(start));
        }
        if let Some(date_to) = filter.date_to {
            let end = date_to.and_time(chrono::NaiveTime::MIN).and_utc();
            query = query.filter(audit::Column::RecordedAt.lte(end));
        }

        let models = query
            .order_by_desc(audit::Column::RecordedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(AuditEntry::from).collect())
    }

    async fn count_by_action(&self) -> AppResult<Vec<(String, i64)>> {
        let rows = AuditEntity::find()
            .select_only()
            .column(audit::Column::Action)
            .column_as(audit::Column::Id.count(), "total")
            .group_by(audit::Column::Action)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows)
    }

    async fn count_by_table(&self) -> AppResult<Vec<(String, i64)>> {
        let rows = AuditEntity::find()
            .select_only()
            .column(audit::Column::TableName)
            .column_as(audit::Column::Id.count(), "total")
            .group_by(audit::Column::TableName)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows)
    }

    async fn count_by_user(&self) -> AppResult<Vec<(i32, i64)>> {
        let rows = AuditEntity::find()
            .select_only()
            .column(audit::Column::UserId)
            .column_as(audit::Column::Id.count(), "total")
            .group_by(audit::Column::UserId)
            .into_tuple::<(i32, i64)>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows)
    }
}
