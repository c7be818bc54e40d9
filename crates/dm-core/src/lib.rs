//! dm-core - Core library for devmig
//!
//! This crate provides the shared error type, project configuration, the
//! migration version token, and the migration directory scanner used by the
//! seeding and reconciliation tools.

pub mod config;
pub mod error;
pub mod migration_dir;
pub mod version;

pub use config::{Config, DatabaseConfig, ToolConfig, CONFIG_FILE_NAME, DATABASE_URL_ENV};
pub use error::{CoreError, CoreResult};
pub use migration_dir::{MigrationDir, MigrationFilePair, RemovedFiles};
pub use version::MigrationVersion;
