//! Equipment service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::audit::tables;
use crate::domain::{
    access, AuditAction, AuditEvent, CreateEquipment, Equipment, Professional, StatusFilter,
    UpdateEquipment,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{EquipmentRepository, ProfessionalRepository, UserRepository};

use super::{load_actor, snapshot, ActorContext, AuditRecorder};

/// Equipment service trait for dependency injection.
#[async_trait]
pub trait EquipmentService: Send + Sync {
    /// List active units; no access-level restriction
    async fn list(&self) -> AppResult<Vec<Equipment>>;

    /// Create a unit (city admin and above)
    async fn create(&self, input: CreateEquipment, ctx: &ActorContext) -> AppResult<Equipment>;

    /// Apply a partial update (city admin and above)
    async fn update(
        &self,
        id: i32,
        patch: UpdateEquipment,
        ctx: &ActorContext,
    ) -> AppResult<Equipment>;

    /// Soft delete: the unit flips to inactive, the row stays
    async fn delete(&self, id: i32, ctx: &ActorContext) -> AppResult<Equipment>;

    /// One unit plus its professionals, filtered by active status
    async fn roster(
        &self,
        id: i32,
        status: StatusFilter,
    ) -> AppResult<(Equipment, Vec<Professional>)>;
}

/// Concrete implementation of EquipmentService.
pub struct EquipmentManager {
    equipment: Arc<dyn EquipmentRepository>,
    professionals: Arc<dyn ProfessionalRepository>,
    users: Arc<dyn UserRepository>,
    audit: Arc<dyn AuditRecorder>,
}

impl EquipmentManager {
    pub fn new(
        equipment: Arc<dyn EquipmentRepository>,
        professionals: Arc<dyn ProfessionalRepository>,
        users: Arc<dyn UserRepository>,
        audit: Arc<dyn AuditRecorder>,
    ) -> Self {
        Self {
            equipment,
            professionals,
            users,
            audit,
        }
    }
}

#[async_trait]
impl EquipmentService for EquipmentManager {
    async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.equipment.list_active().await
    }

    async fn create(&self, input: CreateEquipment, ctx: &ActorContext) -> AppResult<Equipment> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_manage_catalog(&actor) {
            return Err(AppError::Forbidden);
        }

        let unit = self.equipment.create(input.name, input.description).await?;

        self.audit
            .record(
                AuditEvent::new(actor.id, AuditAction::Create, tables::EQUIPAMENTOS, unit.id)
                    .new_data(snapshot(&unit))
                    .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(unit)
    }

    async fn update(
        &self,
        id: i32,
        patch: UpdateEquipment,
        ctx: &ActorContext,
    ) -> AppResult<Equipment> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_manage_catalog(&actor) {
            return Err(AppError::Forbidden);
        }

        let before = self
            .equipment
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let unit = self.equipment.update(id, patch.name, patch.description).await?;

        self.audit
            .record(
                AuditEvent::new(actor.id, AuditAction::Update, tables::EQUIPAMENTOS, unit.id)
                    .old_data(snapshot(&before))
                    .new_data(snapshot(&unit))
                    .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(unit)
    }

    async fn delete(&self, id: i32, ctx: &ActorContext) -> AppResult<Equipment> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_manage_catalog(&actor) {
            return Err(AppError::Forbidden);
        }

        let before = self
            .equipment
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let unit = self.equipment.deactivate(id).await?;

        self.audit
            .record(
                AuditEvent::new(actor.id, AuditAction::Delete, tables::EQUIPAMENTOS, unit.id)
                    .old_data(snapshot(&before))
                    .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(unit)
    }

    async fn roster(
        &self,
        id: i32,
        status: StatusFilter,
    ) -> AppResult<(Equipment, Vec<Professional>)> {
        let unit = self
            .equipment
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let professionals = self.professionals.list_by_equipment(id, status).await?;

        Ok((unit, professionals))
    }
}
