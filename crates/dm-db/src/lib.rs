//! dm-db - Database abstraction layer for devmig
//!
//! This crate provides the `Database` trait, parameterized statements, and
//! the DuckDB and Postgres implementations used by the fixture seeder.

pub mod backend;
pub mod duckdb;
pub mod error;
pub mod postgres;
pub mod statement;
pub mod traits;

pub use backend::{connect, DbType};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use postgres::PostgresBackend;
pub use statement::{DateRange, SqlType, SqlTyped, SqlValue, Statement};
pub use traits::Database;
