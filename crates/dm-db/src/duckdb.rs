//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::statement::Statement;
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::{params_from_iter, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from a connection string (handles :memory: special case)
    ///
    /// A `duckdb://` prefix is accepted and stripped.
    pub fn new(url: &str) -> DbResult<Self> {
        let path = url.strip_prefix("duckdb://").unwrap_or(url);
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Run statements in one transaction synchronously.
    ///
    /// The transaction rolls back when dropped without a commit, so every
    /// early return (and unwinding panic) leaves the database untouched.
    fn execute_in_transaction_sync(&self, statements: &[Statement]) -> DbResult<Vec<usize>> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

        let mut counts = Vec::with_capacity(statements.len());
        for stmt in statements {
            log::debug!("Executing {}", stmt);
            match tx.execute(&stmt.sql, params_from_iter(stmt.params.iter())) {
                Ok(rows) => {
                    log::debug!("  -> {} row(s)", rows);
                    counts.push(rows);
                }
                Err(e) => {
                    log::error!("Statement failed, rolling back: {}: {}", stmt, e);
                    return Err(DbError::StatementFailed {
                        sql: stmt.sql.clone(),
                        params: stmt.params_display(),
                        message: e.to_string(),
                    });
                }
            }
        }

        tx.commit()
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))?;
        Ok(counts)
    }

    /// Query count synchronously
    fn query_count_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
                row.get(0)
            })
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count as usize)
    }

    /// Collect the first column of every row as strings
    fn query_strings_sync(&self, sql: &str) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn execute_in_transaction(&self, statements: &[Statement]) -> DbResult<Vec<usize>> {
        self.execute_in_transaction_sync(statements)
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        self.query_count_sync(sql)
    }

    async fn query_strings(&self, sql: &str) -> DbResult<Vec<String>> {
        self.query_strings_sync(sql)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
