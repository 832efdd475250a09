//! Configuration management for the database connection and seed data.

/// Database configuration and connection management
pub mod database;

/// Roster and calendar seed data loaded from config.toml
pub mod seed;
