//! Infrastructure layer - External systems integration
//!
//! Database connection management, schema migrations and the
//! repository implementations backing the services.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    AuditRepository, AuditStore, CityRepository, CityStore, EquipmentRepository, EquipmentStore,
    ProfessionalRepository, ProfessionalStore, UserChanges, UserRepository, UserStore,
};
