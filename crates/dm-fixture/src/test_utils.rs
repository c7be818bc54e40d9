//! Shared test utilities for dm-fixture

use dm_db::{Database, DuckDbBackend};

/// DuckDB version of the application tables the standard catalog targets.
pub const FIXTURE_SCHEMA: &str = "
CREATE TABLE users (
    id UUID PRIMARY KEY,
    username VARCHAR NOT NULL UNIQUE
);
CREATE TABLE tasks (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL,
    title VARCHAR NOT NULL,
    status VARCHAR NOT NULL,
    point INTEGER
);
CREATE TABLE iterations (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL,
    name VARCHAR NOT NULL,
    date_range VARCHAR
);
CREATE TABLE iterations_tasks (
    iteration_id UUID NOT NULL,
    task_id UUID NOT NULL,
    PRIMARY KEY (iteration_id, task_id)
);
";

/// Postgres version of the same tables, with the enum and range types the
/// application declares. Drops any previous copy first.
pub const POSTGRES_FIXTURE_SCHEMA: &str = "
DROP TABLE IF EXISTS iterations_tasks, iterations, tasks, users;
DROP TYPE IF EXISTS task_status;
CREATE TYPE task_status AS ENUM ('active', 'completed');
CREATE TABLE users (
    id UUID PRIMARY KEY,
    username TEXT NOT NULL UNIQUE
);
CREATE TABLE tasks (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users (id),
    title TEXT NOT NULL,
    status task_status NOT NULL,
    point INTEGER
);
CREATE TABLE iterations (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users (id),
    name TEXT NOT NULL,
    date_range DATERANGE
);
CREATE TABLE iterations_tasks (
    iteration_id UUID NOT NULL REFERENCES iterations (id),
    task_id UUID NOT NULL REFERENCES tasks (id),
    PRIMARY KEY (iteration_id, task_id)
);
";

/// In-memory DuckDB with the fixture tables created.
pub async fn fixture_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().expect("in-memory DuckDB");
    db.execute_batch(FIXTURE_SCHEMA)
        .await
        .expect("Failed to create fixture tables. Check FIXTURE_SCHEMA");
    db
}

/// Row count of `table`.
pub async fn row_count(db: &dyn Database, table: &str) -> usize {
    db.query_count(&format!("SELECT * FROM {table}"))
        .await
        .expect("count rows")
}
