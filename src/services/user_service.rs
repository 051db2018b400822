//! User management service.
//!
//! Gated to city admins and above. City admins stay inside their own
//! city and can never mint a global admin. Users are hard-deleted:
//! the model carries no inactive flag.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::audit::tables;
use crate::domain::{
    access, AccessLevel, AuditAction, AuditEvent, CreateUser, Password, UpdateUser, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{UserChanges, UserRepository};

use super::{load_actor, snapshot, ActorContext, AuditRecorder};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List users visible to the actor
    async fn list(&self, actor_id: i32) -> AppResult<Vec<User>>;

    /// Create a user
    async fn create(&self, input: CreateUser, ctx: &ActorContext) -> AppResult<User>;

    /// Apply a partial update
    async fn update(&self, id: i32, patch: UpdateUser, ctx: &ActorContext) -> AppResult<User>;

    /// Permanently delete a user; self-deletion is rejected
    async fn delete(&self, id: i32, ctx: &ActorContext) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    audit: Arc<dyn AuditRecorder>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>, audit: Arc<dyn AuditRecorder>) -> Self {
        Self { users, audit }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list(&self, actor_id: i32) -> AppResult<Vec<User>> {
        let actor = load_actor(self.users.as_ref(), actor_id).await?;
        if !access::can_manage_users(&actor) {
            return Err(AppError::Forbidden);
        }

        self.users.list(access::user_scope(&actor)).await
    }

    async fn create(&self, input: CreateUser, ctx: &ActorContext) -> AppResult<User> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_manage_users(&actor) {
            return Err(AppError::Forbidden);
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let level = input.access_level.unwrap_or(AccessLevel::Viewer);
        if !access::can_assign_level(&actor, level) {
            return Err(AppError::Forbidden);
        }

        let password_hash = Password::new(&input.password)?.into_string();

        let user = self
            .users
            .create(
                input.full_name,
                input.email,
                password_hash,
                level,
                input.city_id,
            )
            .await?;

        self.audit
            .record(
                AuditEvent::new(actor.id, AuditAction::Create, tables::USUARIOS, user.id)
                    .new_data(snapshot(&user))
                    .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(user)
    }

    async fn update(&self, id: i32, patch: UpdateUser, ctx: &ActorContext) -> AppResult<User> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_manage_users(&actor) {
            return Err(AppError::Forbidden);
        }

        let before = self.users.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        if !access::can_touch_user(&actor, &before) {
            return Err(AppError::Forbidden);
        }

        if let Some(level) = patch.access_level {
            if !access::can_assign_level(&actor, level) {
                return Err(AppError::Forbidden);
            }
        }

        let password_hash = match patch.password {
            Some(ref plain) => Some(Password::new(plain)?.into_string()),
            None => None,
        };

        let user = self
            .users
            .update(
                id,
                UserChanges {
                    full_name: patch.full_name,
                    email: patch.email,
                    password_hash,
                    access_level: patch.access_level,
                    city_id: patch.city_id,
                },
            )
            .await?;

        self.audit
            .record(
                AuditEvent::new(actor.id, AuditAction::Update, tables::USUARIOS, user.id)
                    .old_data(snapshot(&before))
                    .new_data(snapshot(&user))
                    .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(user)
    }

    async fn delete(&self, id: i32, ctx: &ActorContext) -> AppResult<()> {
        let actor = load_actor(self.users.as_ref(), ctx.user_id).await?;
        if !access::can_manage_users(&actor) {
            return Err(AppError::Forbidden);
        }

        let before = self.users.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        if before.id == actor.id {
            return Err(AppError::validation(
                "Não é possível deletar seu próprio usuário",
            ));
        }

        if !access::can_touch_user(&actor, &before) {
            return Err(AppError::Forbidden);
        }

        self.users.delete(id).await?;

        self.audit
            .record(
                AuditEvent::new(actor.id, AuditAction::Delete, tables::USUARIOS, before.id)
                    .old_data(snapshot(&before))
                    .source_ip(ctx.source_ip.clone()),
            )
            .await;

        Ok(())
    }
}
