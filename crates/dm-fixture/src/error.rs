//! Error types for dm-fixture

use crate::catalog::FixtureKind;
use dm_db::DbError;
use thiserror::Error;

/// Fixture catalog and seeding errors
#[derive(Error, Debug)]
pub enum FixtureError {
    /// An entity kind has no table in the catalog (F001)
    #[error("[F001] Fixture kind {0} is not registered in the catalog")]
    UnregisteredKind(FixtureKind),

    /// A kind or table was registered twice (F002)
    #[error("[F002] Duplicate catalog registration: {0}")]
    DuplicateRegistration(String),

    /// An entity serialized different columns than its table declares (F003)
    #[error("[F003] Fixture {kind} produced columns [{found}] but table {table} declares [{expected}]")]
    ColumnMismatch {
        kind: FixtureKind,
        table: &'static str,
        expected: String,
        found: String,
    },

    /// Database error while seeding or cleaning
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type alias for FixtureError
pub type FixtureResult<T> = Result<T, FixtureError>;
