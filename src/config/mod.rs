//! Application configuration management

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// SQLite database path
    /// Use DATABASE_PATH, or DATABASE_URL for compatibility with older deployments
    pub database_url: String,

    /// Secret for signing and verifying auth tokens
    pub app_secret: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_PATH")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "./data/linkboard.db".to_string());

        // APP_SECRET must be set explicitly in production
        let app_secret =
            env::var("APP_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            app_secret,
        })
    }
}
