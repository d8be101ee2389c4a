//! GraphQL signup and login mutations
//!
//! Neither mutation requires authentication.

use crate::services::{AuthService, SignupInput};

use super::prelude::*;

#[derive(Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Create a new user account and return an auth token for it
    async fn signup(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        name: String,
    ) -> Result<AuthPayload> {
        let auth_service = ctx.data_unchecked::<AuthService>();

        let result = auth_service
            .signup(SignupInput {
                email,
                password,
                name,
            })
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Signup failed");
                async_graphql::Error::new(e.to_string())
            })?;

        tracing::info!(user_id = result.user.id, "User signed up");

        Ok(AuthPayload {
            token: result.token,
            user: user_record_to_graphql(result.user),
        })
    }

    /// Authenticate with email and password
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<AuthPayload> {
        let auth_service = ctx.data_unchecked::<AuthService>();

        let result = auth_service.login(&email, &password).await.map_err(|e| {
            tracing::warn!(email = %email, error = %e, "Login failed");
            async_graphql::Error::new(e.to_string())
        })?;

        tracing::info!(user_id = result.user.id, "User logged in");

        Ok(AuthPayload {
            token: result.token,
            user: user_record_to_graphql(result.user),
        })
    }
}
