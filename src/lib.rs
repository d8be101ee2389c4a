//! Linkboard backend - GraphQL API for sharing and voting on links
//!
//! The library exposes the configuration, persistence, and GraphQL layers so
//! the binary in `main.rs` and the integration tests can share them.

pub mod api;
pub mod config;
pub mod db;
pub mod graphql;
pub mod services;

use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;
use crate::graphql::LinkboardSchema;

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub schema: LinkboardSchema,
}
