//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    audit_handler, auth_handler, city_handler, equipment_handler, professional_handler,
    report_handler, user_handler,
};
use crate::domain::audit::{ActionCount, TableCount, UserCount};
use crate::domain::{
    AuditAction, AuditEntry, AuditStatistics, City, CreateCity, CreateEquipment,
    CreateProfessional, CreateUser, Equipment, InactivateProfessional, Professional, RecordStatus,
    UpdateCity, UpdateEquipment, UpdateProfessional, UpdateUser, User,
};
use crate::services::{
    CityStats, EquipmentStats, GeneralStats, LoginResponse, ProfessionStats, RegistryStatistics,
};
use crate::types::MessageResponse;

/// OpenAPI documentation for the professional registry API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registro de Profissionais",
        version = "0.1.0",
        description = "API administrativa de profissionais, equipamentos e cidades, com trilha de auditoria e exportações",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        auth_handler::register,
        auth_handler::me,
        // City endpoints
        city_handler::list_cities,
        city_handler::create_city,
        city_handler::update_city,
        city_handler::delete_city,
        // Equipment endpoints
        equipment_handler::list_equipment,
        equipment_handler::create_equipment,
        equipment_handler::update_equipment,
        equipment_handler::delete_equipment,
        equipment_handler::equipment_roster,
        // Professional endpoints
        professional_handler::list_professionals,
        professional_handler::get_professional,
        professional_handler::create_professional,
        professional_handler::update_professional,
        professional_handler::delete_professional,
        professional_handler::reactivate_professional,
        // User endpoints
        user_handler::list_users,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        // Audit endpoints
        audit_handler::list_audit,
        audit_handler::audit_statistics,
        // Report endpoints
        report_handler::professionals_pdf,
        report_handler::professionals_excel,
        report_handler::registry_statistics,
    ),
    components(
        schemas(
            // Domain types
            RecordStatus,
            AuditAction,
            City,
            CreateCity,
            UpdateCity,
            Equipment,
            CreateEquipment,
            UpdateEquipment,
            Professional,
            CreateProfessional,
            UpdateProfessional,
            InactivateProfessional,
            User,
            CreateUser,
            UpdateUser,
            AuditEntry,
            AuditStatistics,
            ActionCount,
            TableCount,
            UserCount,
            // Handler and service types
            auth_handler::LoginRequest,
            equipment_handler::RosterResponse,
            LoginResponse,
            RegistryStatistics,
            GeneralStats,
            EquipmentStats,
            CityStats,
            ProfessionStats,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login e registro"),
        (name = "Cidades", description = "Cadastro de cidades"),
        (name = "Equipamentos", description = "Cadastro de equipamentos"),
        (name = "Profissionais", description = "Cadastro de profissionais"),
        (name = "Usuários", description = "Gestão de usuários"),
        (name = "Auditoria", description = "Trilha de auditoria"),
        (name = "Relatórios", description = "Exportações e estatísticas")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtido em /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
