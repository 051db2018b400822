//! Application state - Dependency injection container.
//!
//! Holds every service handle the handlers need. Built once at startup
//! from an explicit database connection; no process-wide singletons.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    AuditService, AuthService, CityService, EquipmentService, ProfessionalService, ReportService,
    Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub cities: Arc<dyn CityService>,
    pub equipment: Arc<dyn EquipmentService>,
    pub professionals: Arc<dyn ProfessionalService>,
    pub users: Arc<dyn UserService>,
    pub audit: Arc<dyn AuditService>,
    pub reports: Arc<dyn ReportService>,
    /// Database handle for health checks; absent when services are mocked
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from a connected database and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        Self {
            auth: services.auth,
            cities: services.cities,
            equipment: services.equipment,
            professionals: services.professionals,
            users: services.users,
            audit: services.audit,
            reports: services.reports,
            database: Some(database),
        }
    }

    /// Create application state with manually injected services (tests).
    #[allow(clippy::too_many_arguments)]
    pub fn with_services(
        auth: Arc<dyn AuthService>,
        cities: Arc<dyn CityService>,
        equipment: Arc<dyn EquipmentService>,
        professionals: Arc<dyn ProfessionalService>,
        users: Arc<dyn UserService>,
        audit: Arc<dyn AuditService>,
        reports: Arc<dyn ReportService>,
    ) -> Self {
        Self {
            auth,
            cities,
            equipment,
            professionals,
            users,
            audit,
            reports,
            database: None,
        }
    }
}
