//! GraphQL API
//!
//! This module provides the GraphQL API using async-graphql: queries,
//! mutations, and relation resolvers, merged into the schema roots in
//! `schema.rs`. This is the single API surface for the Linkboard backend.

pub mod auth;
pub mod helpers;
pub mod loaders;
pub mod mutations;
pub mod queries;
mod schema;
pub mod types;

pub use auth::{AuthUser, verify_token};
pub use schema::{LinkboardSchema, MutationRoot, QueryRoot, build_schema};
