//! Account management and authentication service

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Credentials, RegisterUser, TokenResponse, UpdateUser, User, UserClaims},
    repository::UsersRepository,
};

const DUPLICATE_EMAIL: &str = "User with this email already exists.";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct UsersService {
    users: Arc<dyn UsersRepository>,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(users: Arc<dyn UsersRepository>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Register a new account, storing an argon2 hash of the password
    pub async fn register(&self, data: RegisterUser) -> AppResult<User> {
        data.validate()?;

        if self.users.email_exists(&data.email, None).await? {
            tracing::warn!("Registration refused, email already in use: {}", data.email);
            return Err(AppError::Validation(DUPLICATE_EMAIL.to_string()));
        }

        let hash = hash_password(&data.password)?;
        let user = self.users.create(&data.email, &hash).await?;
        tracing::info!("User {} registered", user.id);
        Ok(user)
    }

    /// Check credentials and issue a bearer token
    pub async fn authenticate(&self, credentials: Credentials) -> AppResult<TokenResponse> {
        let user = self
            .users
            .get_by_email(&credentials.email)
            .await?
            .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&user.password, &credentials.password)? {
            tracing::warn!("Failed login for user {}", user.id);
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        let now = Utc::now();
        let expires = now + Duration::minutes(self.config.jwt_expiration_minutes);
        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            exp: expires.timestamp(),
            iat: now.timestamp(),
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!("User {} logged in", user.id);
        Ok(TokenResponse {
            token_type: "Bearer".to_string(),
            user_token: token,
            expires,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<User> {
        self.users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<User>, i64)> {
        self.users.list(limit, offset).await
    }

    /// Update email and/or password; a new password is re-hashed
    pub async fn update(&self, id: Uuid, data: UpdateUser) -> AppResult<User> {
        data.validate()?;

        if let Some(ref email) = data.email {
            if self.users.email_exists(email, Some(id)).await? {
                return Err(AppError::Validation(DUPLICATE_EMAIL.to_string()));
            }
        }

        let password_hash = match data.password {
            Some(ref password) => Some(hash_password(password)?),
            None => None,
        };

        let user = self
            .users
            .update(id, data.email, password_hash)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        tracing::info!("User {} updated", id);
        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.users.delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        tracing::info!("User {} deleted", id);
        Ok(())
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
