//! User repository.
//!
//! Users carry no inactive flag; delete is a hard delete.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{AccessLevel, ListScope, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Field changes applied by [`UserRepository::update`]; `None` keeps the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub access_level: Option<AccessLevel>,
    pub city_id: Option<i32>,
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List users within the given city scope
    async fn list(&self, scope: ListScope) -> AppResult<Vec<User>>;

    /// Create a new user
    async fn create(
        &self,
        full_name: String,
        email: String,
        password_hash: String,
        access_level: AccessLevel,
        city_id: Option<i32>,
    ) -> AppResult<User>;

    /// Apply set fields to an existing user
    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Permanently delete a user
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn list(&self, scope: ListScope) -> AppResult<Vec<User>> {
        let mut query = UserEntity::find();

        match scope {
            ListScope::All => {}
            ListScope::City(Some(city_id)) => {
                query = query.filter(user::Column::CityId.eq(city_id));
            }
            ListScope::City(None) => return Ok(Vec::new()),
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(
        &self,
        full_name: String,
        email: String,
        password_hash: String,
        access_level: AccessLevel,
        city_id: Option<i32>,
    ) -> AppResult<User> {
        let active_model = ActiveModel {
            full_name: Set(full_name),
            email: Set(email),
            password_hash: Set(password_hash),
            access_level: Set(access_level.as_i32()),
            city_id: Set(city_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let stored = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = stored.into();

        if let Some(full_name) = changes.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(access_level) = changes.access_level {
            active.access_level = Set(access_level.as_i32());
        }
        if let Some(city_id) = changes.city_id {
            active.city_id = Set(Some(city_id));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
