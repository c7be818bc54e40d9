//! Backend selection from a connection string

use crate::duckdb::DuckDbBackend;
use crate::error::DbResult;
use crate::postgres::PostgresBackend;
use crate::traits::Database;
use std::sync::Arc;

/// Database backend named by a connection string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbType {
    DuckDb,
    Postgres,
}

impl DbType {
    /// `postgres://` and `postgresql://` URLs select Postgres; anything else
    /// is a DuckDB file path, `:memory:`, or `duckdb://` URL.
    pub fn from_url(url: &str) -> Self {
        let scheme = url
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase());
        match scheme.as_deref() {
            Some("postgres") | Some("postgresql") => DbType::Postgres,
            _ => DbType::DuckDb,
        }
    }
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
            DbType::Postgres => write!(f, "postgres"),
        }
    }
}

/// Open the backend `url` names
pub async fn connect(url: &str) -> DbResult<Arc<dyn Database>> {
    let db: Arc<dyn Database> = match DbType::from_url(url) {
        DbType::Postgres => Arc::new(PostgresBackend::connect(url).await?),
        DbType::DuckDb => Arc::new(DuckDbBackend::new(url)?),
    };
    log::debug!("Connected to {} database", db.db_type());
    Ok(db)
}
