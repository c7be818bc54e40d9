//! Postgres database backend implementation

use crate::error::{DbError, DbResult};
use crate::statement::{SqlValue, Statement};
use crate::traits::Database;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;
use std::time::Duration;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Postgres database backend
///
/// Parameters travel as text and are cast to their column type on the
/// server, so enum, uuid and range columns accept them unchanged.
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Connect to a `postgres://` or `postgresql://` URL
    pub async fn connect(url: &str) -> DbResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(url)
            .await
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", redact_password(url))))?;
        Ok(Self { pool })
    }
}

/// Rewrite `?` placeholders to `$n::type` using each parameter's column type.
///
/// Question marks inside single-quoted literals are left alone.
pub(crate) fn to_postgres_placeholders(sql: &str, params: &[SqlValue]) -> String {
    let mut out = String::with_capacity(sql.len() + params.len() * 12);
    let mut in_literal = false;
    let mut n = 0;
    for ch in sql.chars() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                out.push(ch);
            }
            '?' if !in_literal => {
                n += 1;
                out.push('$');
                out.push_str(&n.to_string());
                if let Some(param) = params.get(n - 1) {
                    out.push_str("::");
                    out.push_str(param.sql_type().postgres_name());
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Hide the password component of a connection URL for error messages
pub(crate) fn redact_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((userinfo, host)) => match userinfo.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}

#[async_trait]
impl Database for PostgresBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        let result = sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        Ok(result.rows_affected() as usize)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn execute_in_transaction(&self, statements: &[Statement]) -> DbResult<Vec<usize>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

        let mut counts = Vec::with_capacity(statements.len());
        for stmt in statements {
            log::debug!("Executing {}", stmt);
            let sql = to_postgres_placeholders(&stmt.sql, &stmt.params);
            let query = stmt
                .params
                .iter()
                .fold(sqlx::query::<Postgres>(&sql), |query, param| {
                    query.bind(param.as_text())
                });
            match query.execute(&mut *tx).await {
                Ok(result) => {
                    let rows = result.rows_affected() as usize;
                    log::debug!("  -> {} row(s)", rows);
                    counts.push(rows);
                }
                Err(e) => {
                    // Dropping `tx` rolls the transaction back
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
            .await
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))?;
        Ok(counts)
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM ({}) AS q", sql))
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    async fn query_strings(&self, sql: &str) -> DbResult<Vec<String>> {
        let rows: Vec<String> = sqlx::query_scalar(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        Ok(rows)
    }

    fn db_type(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;
