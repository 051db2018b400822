//! Service container - Centralized service wiring.
//!
//! Builds every service over a shared database connection, injecting
//! the repository and audit-recorder handles explicitly. No service
//! reaches for process-wide state.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    AuditLog, AuditRecorder, AuditService, AuthService, Authenticator, CityManager, CityService,
    EquipmentManager, EquipmentService, ProfessionalManager, ProfessionalService, ReportBuilder,
    ReportService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{AuditStore, CityStore, EquipmentStore, ProfessionalStore, UserStore};

/// Concrete service container.
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub cities: Arc<dyn CityService>,
    pub equipment: Arc<dyn EquipmentService>,
    pub professionals: Arc<dyn ProfessionalService>,
    pub users: Arc<dyn UserService>,
    pub audit: Arc<dyn AuditService>,
    pub reports: Arc<dyn ReportService>,
}

impl Services {
    /// Wire every service over one database connection.
    pub fn from_connection(db: DatabaseConnection, config: Config) -> Self {
        let city_repo = Arc::new(CityStore::new(db.clone()));
        let equipment_repo = Arc::new(EquipmentStore::new(db.clone()));
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let professional_repo = Arc::new(ProfessionalStore::new(db.clone()));
        let audit_repo = Arc::new(AuditStore::new(db));

        let audit_log = Arc::new(AuditLog::new(audit_repo, user_repo.clone()));
        let recorder: Arc<dyn AuditRecorder> = audit_log.clone();

        Self {
            auth: Arc::new(Authenticator::new(user_repo.clone(), config)),
            cities: Arc::new(CityManager::new(
                city_repo.clone(),
                user_repo.clone(),
                recorder.clone(),
            )),
            equipment: Arc::new(EquipmentManager::new(
                equipment_repo.clone(),
                professional_repo.clone(),
                user_repo.clone(),
                recorder.clone(),
            )),
            professionals: Arc::new(ProfessionalManager::new(
                professional_repo.clone(),
                user_repo.clone(),
                recorder.clone(),
            )),
            users: Arc::new(UserManager::new(user_repo.clone(), recorder.clone())),
            audit: audit_log,
            reports: Arc::new(ReportBuilder::new(
                professional_repo,
                city_repo,
                equipment_repo,
                user_repo,
                recorder,
            )),
        }
    }
}
