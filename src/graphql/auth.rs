//! GraphQL authentication context
//!
//! Verifies bearer tokens and exposes the authenticated user to resolvers.
//! The HTTP handler verifies the token before GraphQL execution starts and
//! injects an [AuthUser] into the request data; an invalid or absent token
//! just leaves the request unauthenticated.

use async_graphql::{Context, ErrorExtensions, Result};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::services::TokenClaims;

/// User context extracted from a verified token, available in GraphQL resolvers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
}

/// Verify a token and extract the calling user
pub fn verify_token(secret: &str, token: &str) -> Result<AuthUser> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_aud = false;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        async_graphql::Error::new(format!("Invalid token: {}", e))
            .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
    })?;

    let user_id = token_data.claims.sub.parse::<i64>().map_err(|_| {
        async_graphql::Error::new("Invalid token subject")
            .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
    })?;

    Ok(AuthUser {
        user_id,
        email: token_data.claims.email,
    })
}

/// Extension trait to get the authenticated user from the GraphQL context
pub trait AuthExt {
    /// Get the authenticated user, or return an error if not authenticated
    fn auth_user(&self) -> Result<&AuthUser>;

    /// Get the authenticated user if present, or None
    fn try_auth_user(&self) -> Option<&AuthUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn auth_user(&self) -> Result<&AuthUser> {
        self.data_opt::<AuthUser>().ok_or_else(|| {
            async_graphql::Error::new("Authentication required")
                .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
        })
    }

    fn try_auth_user(&self) -> Option<&AuthUser> {
        self.data_opt::<AuthUser>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_token_rejected() {
        assert!(verify_token("secret", "not-a-token").is_err());
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        use jsonwebtoken::{EncodingKey, Header, encode};

        let claims = TokenClaims {
            sub: "not-a-number".to_string(),
            email: "alice@example.com".to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(verify_token("secret", &token).is_err());
    }
}
