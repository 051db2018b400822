//! Audit trail service.
//!
//! Recording is best-effort by contract: a failed insert is logged and
//! dropped so it can never fail the mutation that triggered it.
//! Reading the trail is gated to city admins and above.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::AUDIT_QUERY_LIMIT;
use crate::domain::access;
use crate::domain::audit::{ActionCount, TableCount, UserCount};
use crate::domain::{AuditEntry, AuditEvent, AuditFilter, AuditStatistics, ListScope};
use crate::errors::{AppError, AppResult};
use crate::infra::{AuditRepository, UserRepository};

use super::load_actor;

/// Append-only sink for mutation records.
#[async_trait]
pub trait AuditRecorder: Send + Sync {
    /// Append one entry. Infallible for the caller: persistence errors
    /// are reported to the operational log and swallowed.
    async fn record(&self, event: AuditEvent);
}

/// Read side of the trail.
#[async_trait]
pub trait AuditService: Send + Sync {
    /// Query entries, newest first, capped at 1000 rows
    async fn query(&self, filter: AuditFilter, actor_id: i32) -> AppResult<Vec<AuditEntry>>;

    /// Counts grouped by action, table and acting-user name
    async fn statistics(&self, actor_id: i32) -> AppResult<AuditStatistics>;
}

/// Concrete audit trail backed by the audit repository.
pub struct AuditLog {
    entries: Arc<dyn AuditRepository>,
    users: Arc<dyn UserRepository>,
}

impl AuditLog {
    pub fn new(entries: Arc<dyn AuditRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { entries, users }
    }
}

#[async_trait]
impl AuditRecorder for AuditLog {
    async fn record(&self, event: AuditEvent) {
        let action = event.action;
        let table = event.table;

        if let Err(e) = self.entries.insert(event).await {
            tracing::error!("falha ao registrar auditoria ({action} em {table}): {e}");
        }
    }
}

#[async_trait]
impl AuditService for AuditLog {
    async fn query(&self, filter: AuditFilter, actor_id: i32) -> AppResult<Vec<AuditEntry>> {
        let actor = load_actor(self.users.as_ref(), actor_id).await?;
        if !access::can_view_audit(&actor) {
            return Err(AppError::Forbidden);
        }

        self.entries.query(&filter, AUDIT_QUERY_LIMIT).await
    }

    async fn statistics(&self, actor_id: i32) -> AppResult<AuditStatistics> {
        let actor = load_actor(self.users.as_ref(), actor_id).await?;
        if !access::can_view_audit(&actor) {
            return Err(AppError::Forbidden);
        }

        let by_action = self
            .entries
            .count_by_action()
            .await?
            .into_iter()
            .map(|(action, total)| ActionCount { action, total })
            .collect();

        let by_table = self
            .entries
            .count_by_table()
            .await?
            .into_iter()
            .map(|(table, total)| TableCount { table, total })
            .collect();

        // Per-user counts come back keyed by id; resolve to display names
        let names: HashMap<i32, String> = self
            .users
            .list(ListScope::All)
            .await?
            .into_iter()
            .map(|u| (u.id, u.full_name))
            .collect();

        let by_user = self
            .entries
            .count_by_user()
            .await?
            .into_iter()
            .map(|(user_id, total)| UserCount {
                user: names
                    .get(&user_id)
                    .cloned()
                    .unwrap_or_else(|| format!("usuário {user_id}")),
                total,
            })
            .collect();

        Ok(AuditStatistics {
            by_action,
            by_table,
            by_user,
        })
    }
}
