//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod audit_repository;
mod city_repository;
pub(crate) mod entities;
mod equipment_repository;
mod professional_repository;
mod user_repository;

pub use audit_repository::{AuditRepository, AuditStore};
pub use city_repository::{CityRepository, CityStore};
pub use equipment_repository::{EquipmentRepository, EquipmentStore};
pub use professional_repository::{ProfessionalRepository, ProfessionalStore};
pub use user_repository::{UserChanges, UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use audit_repository::MockAuditRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use city_repository::MockCityRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use equipment_repository::MockEquipmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use professional_repository::MockProfessionalRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
