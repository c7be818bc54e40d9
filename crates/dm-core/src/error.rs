//! Error types for dm-core

use thiserror::Error;

/// Core error type for devmig
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: No database connection string in the environment or config
    #[error("[E004] No database connection string: set DATABASE_URL or database.path in {config_file}")]
    MissingConnectionString { config_file: String },

    /// E005: Migration directory does not exist
    #[error("[E005] Migration directory not found: {path}")]
    MigrationDirNotFound { path: String },

    /// E006: Migration directory has no down-migration scripts
    #[error("[E006] No down-migration files (*.down.sql) in {path}")]
    NoDownMigrations { path: String },

    /// E007: A migration version is missing one half of its up/down pair
    #[error("[E007] Migration {version} has no {missing} script (found {present})")]
    UnpairedMigration {
        version: String,
        missing: &'static str,
        present: String,
    },

    /// E008: More than one up or down script for the same version
    #[error("[E008] Migration {version} has more than one {direction} script: {files}")]
    DuplicateMigration {
        version: String,
        direction: &'static str,
        files: String,
    },

    /// E009: Migration filename has no version prefix
    #[error("[E009] Invalid migration file name '{file}': expected <version>_<description>.{{up,down}}.sql")]
    InvalidMigrationFileName { file: String },

    /// E010: IO error with file path context
    #[error("[E010] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
