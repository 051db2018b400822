//! City service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::audit::tables;
use crate::domain::{access, AuditAction, AuditEvent, City, CreateCity, UpdateCity};
use crate::errors::{AppError, AppResult};
use crate::infra::{CityRepository, UserRepository};

use super::{load_actor, snapshot, ActorContext, AuditRecorder};

/// City service trait for dependency injection.
#[async_trait]
pub trait CityService: Send + Sync {
    /// List active cities; no access-level restriction
    async fn list(&self) -> AppResult<Vec<City>>;

    /// Create a city (city admin and above)
    async fn create(&self, input: CreateCity, ctx: &ActorContext) -> AppResult<City>;

    /// Apply a partial update (city admin and above)
    async fn update(&self, id: i32, patch: UpdateCity, ctx: &ActorContext) -> AppResult<City>;

    /// Soft delete: the city flips to inactive, the row stays
    async fn delete(&self, id: i32, ctx: &ActorContext) -> AppResult<City>;
}

/// Concrete implementation of CityService.
pub struct CityManager {
    cities: Arc<dyn CityRepository>,
    users: Arc<dyn UserRepository>,
    audit: Arc<dyn AuditRecorder>,
}

impl CityManager {
    pub fn new(
        cities: Arc<dyn CityRepository>,
        users: Arc<dyn UserRepository>,
        audit: Arc<dyn AuditRecorder>,
    ) -> Self {
        Self {
            cities,
            users,
            audit,
        }
    }
}

#[async_trait]
impl CityService for CityManager {
    async fn list(&self) -> AppResult<Vec<City>> {
        self.cities.list_active().await
    }

    async fn create(&self, input: CreateCity, ctx: &ActorContext) -> AppResult<City> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_manage_catalog(&actor) {
            return Err(AppError::Forbidden);
        }

        if self.cities.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::conflict("Cidade"));
        }

        let city = self.cities.create(input.name).await?;

        self.audit
            .record(
                AuditEvent::new(actor.id, AuditAction::Create, tables::CIDADES, city.id)
                    .new_data(snapshot(&city))
                    .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(city)
    }

    async fn update(&self, id: i32, patch: UpdateCity, ctx: &ActorContext) -> AppResult<City> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_manage_catalog(&actor) {
            return Err(AppError::Forbidden);
        }

        let before = self.cities.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        let city = self.cities.update(id, patch.name).await?;

        self.audit
            .record(
                AuditEvent::new(actor.id, AuditAction::Update, tables::CIDADES, city.id)
                    .old_data(snapshot(&before))
                    .new_data(snapshot(&city))
                    .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(city)
    }

    async fn delete(&self, id: i32, ctx: &ActorContext) -> AppResult<City> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_manage_catalog(&actor) {
            return Err(AppError::Forbidden);
        }

        let before = self.cities.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        let city = self.cities.deactivate(id).await?;

        self.audit
            .record(
                AuditEvent::new(actor.id, AuditAction::Delete, tables::CIDADES, city.id)
                    .old_data(snapshot(&before))
                    .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(city)
    }
}
