//! REST endpoints outside the GraphQL surface (health checks only)

pub mod health;
