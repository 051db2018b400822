//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate the access evaluator, repositories and the
//! audit recorder to fulfill application use cases. They depend on
//! abstractions (traits) for dependency inversion.

mod audit_service;
mod auth_service;
mod city_service;
pub mod container;
mod equipment_service;
mod professional_service;
mod report_service;
mod user_service;

use serde::Serialize;
use serde_json::Value;

use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

// Service Container
pub use container::Services;

// Service traits and implementations
pub use audit_service::{AuditLog, AuditRecorder, AuditService};
pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse};
pub use city_service::{CityManager, CityService};
pub use equipment_service::{EquipmentManager, EquipmentService};
pub use professional_service::{ProfessionalManager, ProfessionalService};
pub use report_service::{
    CityStats, EquipmentStats, GeneralStats, ProfessionStats, RegistryStatistics, ReportBuilder,
    ReportDocument, ReportService,
};
pub use user_service::{UserManager, UserService};

/// Identity and origin of the request driving a mutation.
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub user_id: i32,
    pub source_ip: Option<String>,
}

impl ActorContext {
    pub fn new(user_id: i32, source_ip: Option<String>) -> Self {
        Self { user_id, source_ip }
    }
}

/// Load the acting user; a token for a deleted user is a deny.
pub(crate) async fn load_actor(users: &dyn UserRepository, user_id: i32) -> AppResult<User> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::Forbidden)
}

/// Wire-shaped snapshot for audit entries.
pub(crate) fn snapshot<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
