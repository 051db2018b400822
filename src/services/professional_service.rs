//! Professional service.
//!
//! The primary managed aggregate: city-scoped visibility, soft
//! delete with reason, reactivation, and an audit entry per mutation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::audit::tables;
use crate::domain::{
    access, AuditAction, AuditEvent, CreateProfessional, Professional, ProfessionalFilter,
    UpdateProfessional,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{ProfessionalRepository, UserRepository};

use super::{load_actor, snapshot, ActorContext, AuditRecorder};

/// Fallback inactivation reason when the caller gives none
const REASON_NOT_GIVEN: &str = "Não informado";

/// Professional service trait for dependency injection.
#[async_trait]
pub trait ProfessionalService: Send + Sync {
    /// List professionals visible to the actor, with caller filters ANDed
    async fn list(
        &self,
        filter: ProfessionalFilter,
        actor_id: i32,
    ) -> AppResult<Vec<Professional>>;

    /// Fetch one professional; denied outside the actor's city
    async fn get(&self, id: i32, actor_id: i32) -> AppResult<Professional>;

    /// Create a professional (editor and above)
    async fn create(
        &self,
        input: CreateProfessional,
        ctx: &ActorContext,
    ) -> AppResult<Professional>;

    /// Apply a partial update (editor and above, own city unless global admin)
    async fn update(
        &self,
        id: i32,
        patch: UpdateProfessional,
        ctx: &ActorContext,
    ) -> AppResult<Professional>;

    /// Soft delete with a recorded reason
    async fn delete(
        &self,
        id: i32,
        reason: Option<String>,
        ctx: &ActorContext,
    ) -> AppResult<Professional>;

    /// Reverse a soft delete; clears reason and timestamp
    async fn reactivate(&self, id: i32, ctx: &ActorContext) -> AppResult<Professional>;
}

/// Concrete implementation of ProfessionalService.
pub struct ProfessionalManager {
    professionals: Arc<dyn ProfessionalRepository>,
    users: Arc<dyn UserRepository>,
    audit: Arc<dyn AuditRecorder>,
}

impl ProfessionalManager {
    pub fn new(
        professionals: Arc<dyn ProfessionalRepository>,
        users: Arc<dyn UserRepository>,
        audit: Arc<dyn AuditRecorder>,
    ) -> Self {
        Self {
            professionals,
            users,
            audit,
        }
    }

    /// Uniqueness checks shared by create; each conflict names its field.
    async fn check_unique(&self, input: &CreateProfessional) -> AppResult<()> {
        if self.professionals.find_by_cpf(&input.cpf).await?.is_some() {
            return Err(AppError::conflict("CPF"));
        }
        if self.professionals.find_by_rg(&input.rg).await?.is_some() {
            return Err(AppError::conflict("RG"));
        }
        if self
            .professionals
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Email"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfessionalService for ProfessionalManager {
    async fn list(
        &self,
        filter: ProfessionalFilter,
        actor_id: i32,
    ) -> AppResult<Vec<Professional>> {
        let actor = load_actor(self.users.as_ref(), actor_id).await?;
        let scope = access::professional_scope(&actor);

        self.professionals.list(scope, &filter).await
    }

    async fn get(&self, id: i32, actor_id: i32) -> AppResult<Professional> {
        let actor = load_actor(self.users.as_ref(), actor_id).await?;

        let professional = self
            .professionals
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !access::can_view_professional(&actor, &professional) {
            return Err(AppError::Forbidden);
        }

        Ok(professional)
    }

    async fn create(
        &self,
        input: CreateProfessional,
        ctx: &ActorContext,
    ) -> AppResult<Professional> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_edit_professional(&actor, None) {
            return Err(AppError::Forbidden);
        }

        self.check_unique(&input).await?;

        let professional = self.professionals.create(input).await?;

        self.audit
            .record(
                AuditEvent::new(
                    actor.id,
                    AuditAction::Create,
                    tables::PROFISSIONAIS,
                    professional.id,
                )
                .new_data(snapshot(&professional))
                .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(professional)
    }

    async fn update(
        &self,
        id: i32,
        patch: UpdateProfessional,
        ctx: &ActorContext,
    ) -> AppResult<Professional> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;

        let before = self
            .professionals
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !access::can_edit_professional(&actor, Some(&before)) {
            return Err(AppError::Forbidden);
        }

        let professional = self.professionals.update(id, patch).await?;

        self.audit
            .record(
                AuditEvent::new(
                    actor.id,
                    AuditAction::Update,
                    tables::PROFISSIONAIS,
                    professional.id,
                )
                .old_data(snapshot(&before))
                .new_data(snapshot(&professional))
                .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(professional)
    }

    async fn delete(
        &self,
        id: i32,
        reason: Option<String>,
        ctx: &ActorContext,
    ) -> AppResult<Professional> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;

        let before = self
            .professionals
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !access::can_edit_professional(&actor, Some(&before)) {
            return Err(AppError::Forbidden);
        }

        let reason = reason.unwrap_or_else(|| REASON_NOT_GIVEN.to_string());
        let professional = self.professionals.inactivate(id, reason).await?;

        self.audit
            .record(
                AuditEvent::new(
                    actor.id,
                    AuditAction::Delete,
                    tables::PROFISSIONAIS,
                    professional.id,
                )
                .old_data(snapshot(&before))
                .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(professional)
    }

    async fn reactivate(&self, id: i32, ctx: &ActorContext) -> AppResult<Professional> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;

        let before = self
            .professionals
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !access::can_edit_professional(&actor, Some(&before)) {
            return Err(AppError::Forbidden);
        }

        let professional = self.professionals.reactivate(id).await?;

        self.audit
            .record(
                AuditEvent::new(
                    actor.id,
                    AuditAction::Update,
                    tables::PROFISSIONAIS,
                    professional.id,
                )
                .old_data(snapshot(&before))
                .new_data(snapshot(&professional))
                .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(professional)
    }
}
