//! Shared fixtures for service tests: in-memory repositories and a
//! recording audit sink.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Mutex;

use registro_api::domain::{
    AccessLevel, AuditEvent, City, CreateProfessional, Equipment, ListScope, Professional,
    ProfessionalFilter, RecordStatus, StatusFilter, UpdateProfessional, User,
};
use registro_api::errors::{AppError, AppResult};
use registro_api::infra::{
    CityRepository, EquipmentRepository, ProfessionalRepository, UserChanges, UserRepository,
};
use registro_api::services::AuditRecorder;

pub fn make_user(id: i32, level: AccessLevel, city_id: Option<i32>) -> User {
    User {
        id,
        full_name: format!("Usuário {id}"),
        email: format!("usuario{id}@example.com"),
        password_hash: "hash".to_string(),
        access_level: level,
        city_id,
        created_at: Utc::now(),
    }
}

pub fn make_professional(id: i32, city_id: i32) -> Professional {
    Professional {
        id,
        equipment_id: 1,
        full_name: format!("Profissional {id}"),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        cpf: format!("{id:011}"),
        rg: format!("rg-{id}"),
        rg_issue_date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        education_level: "Superior".to_string(),
        profession: "Psicólogo".to_string(),
        role: "Técnico".to_string(),
        affiliation: "Municipal".to_string(),
        phone: "(85) 99999-0000".to_string(),
        email: format!("prof{id}@example.com"),
        employment_start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        address: "Rua A, 1".to_string(),
        city_id,
        created_at: Utc::now(),
        active: true,
        inactivation_reason: None,
        inactivated_at: None,
    }
}

pub fn make_create_professional(city_id: i32) -> CreateProfessional {
    CreateProfessional {
        equipment_id: 1,
        full_name: "Nova Profissional".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1992, 5, 20).unwrap(),
        cpf: "11122233344".to_string(),
        rg: "rg-novo".to_string(),
        rg_issue_date: NaiveDate::from_ymd_opt(2012, 1, 1).unwrap(),
        education_level: "Superior".to_string(),
        profession: "Assistente Social".to_string(),
        role: "Coordenadora".to_string(),
        affiliation: "Municipal".to_string(),
        phone: "(85) 98888-0000".to_string(),
        email: "nova@example.com".to_string(),
        employment_start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        address: "Rua B, 2".to_string(),
        city_id,
    }
}

/// In-memory user repository
pub struct FakeUserRepo {
    pub users: Vec<User>,
}

impl FakeUserRepo {
    pub fn with(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserRepository for FakeUserRepo {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self, scope: ListScope) -> AppResult<Vec<User>> {
        let users = match scope {
            ListScope::All => self.users.clone(),
            ListScope::City(Some(city_id)) => self
                .users
                .iter()
                .filter(|u| u.city_id == Some(city_id))
                .cloned()
                .collect(),
            ListScope::City(None) => Vec::new(),
        };
        Ok(users)
    }

    async fn create(
        &self,
        full_name: String,
        email: String,
        password_hash: String,
        access_level: AccessLevel,
        city_id: Option<i32>,
    ) -> AppResult<User> {
        Ok(User {
            id: 1000,
            full_name,
            email,
            password_hash,
            access_level,
            city_id,
            created_at: Utc::now(),
        })
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let mut user = self
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(AppError::NotFound)?;

        if let Some(full_name) = changes.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(access_level) = changes.access_level {
            user.access_level = access_level;
        }
        if let Some(city_id) = changes.city_id {
            user.city_id = Some(city_id);
        }

        Ok(user)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        if self.users.iter().any(|u| u.id == id) {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}

/// In-memory professional repository
pub struct FakeProfessionalRepo {
    pub rows: Vec<Professional>,
}

impl FakeProfessionalRepo {
    pub fn with(rows: Vec<Professional>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl ProfessionalRepository for FakeProfessionalRepo {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Professional>> {
        Ok(self.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Professional>> {
        Ok(self.rows.iter().find(|p| p.cpf == cpf).cloned())
    }

    async fn find_by_rg(&self, rg: &str) -> AppResult<Option<Professional>> {
        Ok(self.rows.iter().find(|p| p.rg == rg).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Professional>> {
        Ok(self.rows.iter().find(|p| p.email == email).cloned())
    }

    async fn list(
        &self,
        scope: ListScope,
        filter: &ProfessionalFilter,
    ) -> AppResult<Vec<Professional>> {
        let rows: Vec<Professional> = match scope {
            ListScope::All => self.rows.clone(),
            ListScope::City(Some(city_id)) => self
                .rows
                .iter()
                .filter(|p| p.city_id == city_id)
                .cloned()
                .collect(),
            ListScope::City(None) => Vec::new(),
        };

        let rows = rows
            .into_iter()
            .filter(|p| match filter.status {
                StatusFilter::Ativo => p.active,
                StatusFilter::Inativo => !p.active,
                StatusFilter::Todos => true,
            })
            .collect();

        Ok(rows)
    }

    async fn list_by_equipment(
        &self,
        equipment_id: i32,
        status: StatusFilter,
    ) -> AppResult<Vec<Professional>> {
        Ok(self
            .rows
            .iter()
            .filter(|p| p.equipment_id == equipment_id)
            .filter(|p| match status {
                StatusFilter::Ativo => p.active,
                StatusFilter::Inativo => !p.active,
                StatusFilter::Todos => true,
            })
            .cloned()
            .collect())
    }

    async fn create(&self, data: CreateProfessional) -> AppResult<Professional> {
        Ok(Professional {
            id: 99,
            equipment_id: data.equipment_id,
            full_name: data.full_name,
            birth_date: data.birth_date,
            cpf: data.cpf,
            rg: data.rg,
            rg_issue_date: data.rg_issue_date,
            education_level: data.education_level,
            profession: data.profession,
            role: data.role,
            affiliation: data.affiliation,
            phone: data.phone,
            email: data.email,
            employment_start_date: data.employment_start_date,
            address: data.address,
            city_id: data.city_id,
            created_at: Utc::now(),
            active: true,
            inactivation_reason: None,
            inactivated_at: None,
        })
    }

    async fn update(&self, id: i32, changes: UpdateProfessional) -> AppResult<Professional> {
        let mut row = self
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(AppError::NotFound)?;

        if let Some(full_name) = changes.full_name {
            row.full_name = full_name;
        }
        if let Some(profession) = changes.profession {
            row.profession = profession;
        }
        if let Some(city_id) = changes.city_id {
            row.city_id = city_id;
        }

        Ok(row)
    }

    async fn inactivate(&self, id: i32, reason: String) -> AppResult<Professional> {
        let mut row = self
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(AppError::NotFound)?;

        row.active = false;
        row.inactivation_reason = Some(reason);
        row.inactivated_at = Some(Utc::now());

        Ok(row)
    }

    async fn reactivate(&self, id: i32) -> AppResult<Professional> {
        let mut row = self
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(AppError::NotFound)?;

        row.active = true;
        row.inactivation_reason = None;
        row.inactivated_at = None;

        Ok(row)
    }

    async fn count_by_activity(&self, _scope: ListScope) -> AppResult<Vec<(bool, i64)>> {
        Ok(Vec::new())
    }

    async fn count_by_equipment(&self, _scope: ListScope) -> AppResult<Vec<(i32, bool, i64)>> {
        Ok(Vec::new())
    }

    async fn count_by_city(&self) -> AppResult<Vec<(i32, bool, i64)>> {
        Ok(Vec::new())
    }

    async fn count_by_profession(&self, _scope: ListScope) -> AppResult<Vec<(String, i64)>> {
        Ok(Vec::new())
    }
}

pub fn make_city(id: i32, name: &str) -> City {
    City {
        id,
        name: name.to_string(),
        status: RecordStatus::Ativo,
        created_at: Utc::now(),
    }
}

pub fn make_equipment(id: i32, name: &str) -> Equipment {
    Equipment {
        id,
        name: name.to_string(),
        description: None,
        status: RecordStatus::Ativo,
        created_at: Utc::now(),
    }
}

/// In-memory city repository
pub struct FakeCityRepo {
    pub cities: Vec<City>,
}

impl FakeCityRepo {
    pub fn with(cities: Vec<City>) -> Self {
        Self { cities }
    }
}

#[async_trait]
impl CityRepository for FakeCityRepo {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<City>> {
        Ok(self.cities.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<City>> {
        Ok(self.cities.iter().find(|c| c.name == name).cloned())
    }

    async fn list_active(&self) -> AppResult<Vec<City>> {
        Ok(self
            .cities
            .iter()
            .filter(|c| c.status.is_active())
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> AppResult<Vec<City>> {
        Ok(self.cities.clone())
    }

    async fn create(&self, name: String) -> AppResult<City> {
        Ok(City {
            id: 500,
            name,
            status: RecordStatus::Ativo,
            created_at: Utc::now(),
        })
    }

    async fn update(&self, id: i32, name: Option<String>) -> AppResult<City> {
        let mut city = self
            .cities
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(AppError::NotFound)?;
        if let Some(name) = name {
            city.name = name;
        }
        Ok(city)
    }

    async fn deactivate(&self, id: i32) -> AppResult<City> {
        let mut city = self
            .cities
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(AppError::NotFound)?;
        city.status = RecordStatus::Inativo;
        Ok(city)
    }
}

/// In-memory equipment repository
pub struct FakeEquipmentRepo {
    pub units: Vec<Equipment>,
}

impl FakeEquipmentRepo {
    pub fn with(units: Vec<Equipment>) -> Self {
        Self { units }
    }
}

#[async_trait]
impl EquipmentRepository for FakeEquipmentRepo {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        Ok(self.units.iter().find(|e| e.id == id).cloned())
    }

    async fn list_active(&self) -> AppResult<Vec<Equipment>> {
        Ok(self
            .units
            .iter()
            .filter(|e| e.status.is_active())
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Equipment>> {
        Ok(self.units.clone())
    }

    async fn create(&self, name: String, description: Option<String>) -> AppResult<Equipment> {
        Ok(Equipment {
            id: 600,
            name,
            description,
            status: RecordStatus::Ativo,
            created_at: Utc::now(),
        })
    }

    async fn update(
        &self,
        id: i32,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Equipment> {
        let mut unit = self
            .units
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(AppError::NotFound)?;
        if let Some(name) = name {
            unit.name = name;
        }
        if let Some(description) = description {
            unit.description = Some(description);
        }
        Ok(unit)
    }

    async fn deactivate(&self, id: i32) -> AppResult<Equipment> {
        let mut unit = self
            .units
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(AppError::NotFound)?;
        unit.status = RecordStatus::Inativo;
        Ok(unit)
    }
}

/// Audit sink that remembers every recorded event
#[derive(Default)]
pub struct RecordingAudit {
    pub events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRecorder for RecordingAudit {
    async fn record(&self, event: AuditEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl RecordingAudit {
    pub fn recorded(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }
}
