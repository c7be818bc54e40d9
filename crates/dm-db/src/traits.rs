//! Database trait definition

use crate::error::DbResult;
use crate::statement::Statement;
use async_trait::async_trait;

/// Database abstraction trait for devmig
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run `statements` in order inside a single transaction.
    ///
    /// Returns the affected row count of each statement. If any statement
    /// fails the transaction is rolled back and [`DbError::StatementFailed`]
    /// names the statement and its bound values.
    ///
    /// [`DbError::StatementFailed`]: crate::DbError::StatementFailed
    async fn execute_in_transaction(&self, statements: &[Statement]) -> DbResult<Vec<usize>>;

    /// Execute query returning row count
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Return the first column of every row as a string
    async fn query_strings(&self, sql: &str) -> DbResult<Vec<String>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
