//! Authentication service.
//!
//! Credential verification and bearer-token issuance/validation.
//! Login failures never produce an audit entry.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{AccessLevel, CreateUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Acting user id
    pub sub: i32,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
    /// The authenticated user
    pub usuario: User,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user (open endpoint; defaults to view-only access)
    async fn register(&self, input: CreateUser) -> AppResult<User>;

    /// Login and return JWT token plus the user record
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// Load the user a validated token refers to; NotFound once deleted
    async fn current_user(&self, user_id: i32) -> AppResult<User>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<(String, i64)> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok((token, config.jwt_expiration_hours * SECONDS_PER_HOUR))
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    config: Config,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { users, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, input: CreateUser) -> AppResult<User> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let password_hash = Password::new(&input.password)?.into_string();
        let level = input.access_level.unwrap_or(AccessLevel::Viewer);

        self.users
            .create(
                input.full_name,
                input.email,
                password_hash,
                level,
                input.city_id,
            )
            .await
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let user_result = self.users.find_by_email(&email).await?;

        // Verify against a dummy hash when the user does not exist so
        // response timing cannot enumerate valid emails.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = match user_result {
            Some(user) => user,
            None => return Err(AppError::InvalidCredentials),
        };

        let (access_token, expires_in) = generate_token(&user, &self.config)?;

        Ok(LoginResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
            usuario: user,
        })
    }

    async fn current_user(&self, user_id: i32) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
