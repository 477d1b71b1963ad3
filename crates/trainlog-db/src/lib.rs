//! Trainlog Database: SurrealDB connection management, schema
//! migrations and repository implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization, migrations and preset seeding
//!   ([`run_migrations`])
//! - Implementations of every `trainlog-core` repository trait
//!   ([`repository`])

mod connection;
mod error;
mod schema;
mod seed;

pub mod repository;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
pub use seed::PRESET_EXERCISES;
