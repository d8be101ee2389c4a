//! Authentication service for signup, login, and token handling
//!
//! Provides:
//! - User signup and login
//! - Password hashing with bcrypt
//! - JWT token generation

use anyhow::{Result, anyhow};
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::db::{CreateUser, Database, UserRecord};

/// Claims carried by auth tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID (subject)
    pub sub: String,
    /// Email
    pub email: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Signup input
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Result of signup or login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserRecord,
    pub token: String,
}

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub app_secret: String,
    /// Token lifetime in seconds (default: 7 days)
    pub token_lifetime: i64,
    /// Bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            app_secret: "change-me-in-production".to_string(),
            token_lifetime: 7 * 24 * 60 * 60,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl AuthConfig {
    /// Config with the given secret and default lifetimes
    pub fn from_secret(app_secret: impl Into<String>) -> Self {
        Self {
            app_secret: app_secret.into(),
            ..Default::default()
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(db: Database, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Register a new user and return a token for them
    pub async fn signup(&self, input: SignupInput) -> Result<LoginResult> {
        let users = self.db.users();

        if users.get_by_email(&input.email).await?.is_some() {
            return Err(anyhow!("Email already registered"));
        }

        let password_hash = self.hash_password(&input.password)?;

        let user = users
            .create(CreateUser {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await?;

        let token = self.generate_token(&user)?;

        Ok(LoginResult { user, token })
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult> {
        let user = self
            .db
            .users()
            .get_by_email(email)
            .await?
            .ok_or_else(|| anyhow!("Invalid email or password"))?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(anyhow!("Invalid email or password"));
        }

        let token = self.generate_token(&user)?;

        Ok(LoginResult { user, token })
    }

    /// Hash a password with bcrypt
    fn hash_password(&self, password: &str) -> Result<String> {
        hash(password, self.config.bcrypt_cost)
            .map_err(|e| anyhow!("Failed to hash password: {}", e))
    }

    /// Verify a password against a hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        verify(password, hash).map_err(|e| anyhow!("Failed to verify password: {}", e))
    }

    /// Generate a signed token for a user
    pub fn generate_token(&self, user: &UserRecord) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.token_lifetime);

        let claims = TokenClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.app_secret.as_bytes()),
        )
        .map_err(|e| anyhow!("Failed to create token: {}", e))
    }
}
