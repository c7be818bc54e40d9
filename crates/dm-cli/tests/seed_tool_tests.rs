//! Integration tests for the seed-tool binary

use dm_db::{Database, DuckDbBackend};
use dm_fixture::test_utils::FIXTURE_SCHEMA;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run `seed-tool` and return (stdout, stderr, exit code).
fn run_seed_tool(args: &[&str], database_url: Option<&Path>) -> (String, String, Option<i32>) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_seed-tool"));
    command.args(args).env_remove("DATABASE_URL");
    if let Some(path) = database_url {
        command.env("DATABASE_URL", path);
    }
    let output = command
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute seed-tool with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code(),
    )
}

/// Create the fixture tables in a DuckDB file and release it.
async fn create_fixture_db(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("dev.duckdb");
    let db = DuckDbBackend::from_path(&path).unwrap();
    db.execute_batch(FIXTURE_SCHEMA).await.unwrap();
    path
}

async fn counts(path: &Path) -> Vec<usize> {
    let db = DuckDbBackend::from_path(path).unwrap();
    let mut counts = Vec::new();
    for table in ["users", "tasks", "iterations", "iterations_tasks"] {
        counts.push(
            db.query_count(&format!("SELECT * FROM {table}"))
                .await
                .unwrap(),
        );
    }
    counts
}

#[test]
fn test_missing_action_is_usage_error() {
    let (_, stderr, code) = run_seed_tool(&[], None);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn test_unknown_action_is_usage_error() {
    let (_, stderr, code) = run_seed_tool(&["drop"], None);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("generate"), "stderr: {stderr}");
}

#[test]
fn test_help_exits_zero() {
    let (stdout, _, code) = run_seed_tool(&["--help"], None);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("clean"));
}

#[test]
fn test_missing_connection_string() {
    let project = TempDir::new().unwrap();
    let (_, stderr, code) = run_seed_tool(
        &["generate", "--project-dir", project.path().to_str().unwrap()],
        None,
    );
    assert_eq!(code, Some(1));
    assert!(stderr.contains("[E004]"), "stderr: {stderr}");
}

#[tokio::test]
async fn test_generate_then_clean() {
    let dir = TempDir::new().unwrap();
    let db_path = create_fixture_db(&dir).await;
    let project = dir.path().to_str().unwrap();

    let (stdout, stderr, code) =
        run_seed_tool(&["generate", "-p", project], Some(&db_path));
    assert_eq!(code, Some(0), "stderr: {stderr}");
    assert!(stdout.contains("Inserted 11 fixture rows"), "stdout: {stdout}");
    assert_eq!(counts(&db_path).await, vec![2, 4, 2, 3]);

    let (stdout, stderr, code) = run_seed_tool(&["clean", "-p", project], Some(&db_path));
    assert_eq!(code, Some(0), "stderr: {stderr}");
    assert!(stdout.contains("Deleted 11 fixture rows"), "stdout: {stdout}");
    assert_eq!(counts(&db_path).await, vec![0, 0, 0, 0]);

    let (_, stderr, code) = run_seed_tool(&["clean", "-p", project], Some(&db_path));
    assert_eq!(code, Some(0), "stderr: {stderr}");
}

#[tokio::test]
async fn test_second_generate_fails_and_keeps_first_run() {
    let dir = TempDir::new().unwrap();
    let db_path = create_fixture_db(&dir).await;
    let project = dir.path().to_str().unwrap();

    let (_, _, code) = run_seed_tool(&["generate", "-p", project], Some(&db_path));
    assert_eq!(code, Some(0));

    let (_, stderr, code) = run_seed_tool(&["generate", "-p", project], Some(&db_path));
    assert_eq!(code, Some(1));
    assert!(stderr.contains("[D003]"), "stderr: {stderr}");
    assert!(stderr.contains("INSERT INTO users"), "stderr: {stderr}");
    assert_eq!(counts(&db_path).await, vec![2, 4, 2, 3]);
}

#[tokio::test]
async fn test_database_path_from_config() {
    let dir = TempDir::new().unwrap();
    create_fixture_db(&dir).await;
    std::fs::write(dir.path().join("devmig.yml"), "database:\n  path: dev.duckdb\n").unwrap();

    let (_, stderr, code) = run_seed_tool(
        &["generate", "-p", dir.path().to_str().unwrap()],
        None,
    );
    assert_eq!(code, Some(0), "stderr: {stderr}");
    assert_eq!(counts(&dir.path().join("dev.duckdb")).await, vec![2, 4, 2, 3]);
}
