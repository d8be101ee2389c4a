//! Backend services

pub mod auth;

pub use auth::{AuthConfig, AuthService, LoginResult, SignupInput, TokenClaims};
