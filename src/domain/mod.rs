//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the access control evaluator,
//! independent of infrastructure concerns.

pub mod access;
pub mod audit;
pub mod city;
pub mod equipment;
pub mod password;
pub mod professional;
pub mod user;

pub use access::ListScope;
pub use audit::{AuditAction, AuditEntry, AuditEvent, AuditFilter, AuditStatistics};
pub use city::{City, CreateCity, RecordStatus, UpdateCity};
pub use equipment::{CreateEquipment, Equipment, UpdateEquipment};
pub use password::Password;
pub use professional::{
    CreateProfessional, InactivateProfessional, Professional, ProfessionalFilter, StatusFilter,
    UpdateProfessional,
};
pub use user::{AccessLevel, CreateUser, UpdateUser, User};
