use super::*;
use crate::error::ToolError;
use crate::test_utils::{write_pair, CountingHasher, FakeExecutor, ScriptedConfirm};
use dm_core::CoreError;
use tempfile::TempDir;

fn migrations(versions: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (version, name) in versions {
        write_pair(dir.path(), version, name);
    }
    dir
}

fn file_names(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_mismatch_halts_without_reverting() {
    let dir = migrations(&[("0001", "init"), ("0002", "add_tasks")]);
    let executor = FakeExecutor::new(&["0001", "0003"]);
    let hasher = CountingHasher::default();
    let mut confirm = ScriptedConfirm::new(&[true]);

    let reconciler = Reconciler::new(MigrationDir::new(dir.path()), &executor, &hasher);
    let err = reconciler.run(&mut confirm).await.unwrap_err();

    match err {
        ReconcileError::VersionMismatch {
            ref file,
            ref applied,
            ref reverted,
        } => {
            assert_eq!(*file, "0002");
            assert_eq!(*applied, "0003");
            assert!(reverted.is_empty());
            assert!(err.to_string().ends_with("nothing was reverted"));
        }
        other => panic!("expected VersionMismatch, got {:?}", other),
    }
    assert_eq!(executor.reverts(), 0);
    assert_eq!(hasher.calls(), 0);
    assert!(confirm.prompts.is_empty());
    assert_eq!(file_names(&dir).len(), 4);
}

#[tokio::test]
async fn test_mismatch_after_revert_reports_progress() {
    let dir = migrations(&[("0001", "init"), ("0002", "add_tasks"), ("0003", "add_points")]);
    let executor = FakeExecutor::new(&["0000", "0003"]);
    let hasher = CountingHasher::default();
    let mut confirm = ScriptedConfirm::new(&[true]);

    let reconciler = Reconciler::new(MigrationDir::new(dir.path()), &executor, &hasher);
    let err = reconciler.run(&mut confirm).await.unwrap_err();

    match err {
        ReconcileError::VersionMismatch {
            ref file,
            ref applied,
            ref reverted,
        } => {
            assert_eq!(*file, "0002");
            assert_eq!(*applied, "0000");
            assert_eq!(*reverted, vec![MigrationVersion::new("0003")]);
            let message = err.to_string();
            assert!(message.contains("already reverted in this run: 0003"));
            assert!(!message.contains("nothing was reverted"));
        }
        other => panic!("expected VersionMismatch, got {:?}", other),
    }
    assert_eq!(executor.reverts(), 1);
    assert_eq!(hasher.calls(), 0);
    assert_eq!(confirm.prompts, vec!["Revert 0003?"]);
    assert_eq!(file_names(&dir).len(), 4);
}

#[tokio::test]
async fn test_confirm_once_then_decline() {
    let dir = migrations(&[("0001", "init"), ("0002", "add_tasks")]);
    let executor = FakeExecutor::new(&["0001", "0002"]);
    let hasher = CountingHasher::default();
    let mut confirm = ScriptedConfirm::new(&[true, false]);

    let reconciler = Reconciler::new(MigrationDir::new(dir.path()), &executor, &hasher);
    let report = reconciler.run(&mut confirm).await.unwrap();

    assert_eq!(report.reverted, vec![MigrationVersion::new("0002")]);
    assert_eq!(report.removed_files.len(), 2);
    assert!(report.missing_files.is_empty());
    assert_eq!(executor.reverts(), 1);
    assert_eq!(hasher.calls(), 1);
    assert_eq!(confirm.prompts, vec!["Revert 0002?", "Revert 0001?"]);
    assert_eq!(
        file_names(&dir),
        vec!["0001_init.down.sql", "0001_init.up.sql"]
    );
}

#[tokio::test]
async fn test_decline_reverts_nothing_and_hashes() {
    let dir = migrations(&[("0001", "init"), ("0002", "add_tasks")]);
    let executor = FakeExecutor::new(&["0001", "0002"]);
    let hasher = CountingHasher::default();
    let mut confirm = ScriptedConfirm::new(&[false]);

    let reconciler = Reconciler::new(MigrationDir::new(dir.path()), &executor, &hasher);
    let report = reconciler.run(&mut confirm).await.unwrap();

    assert_eq!(report, ReconcileReport::default());
    assert_eq!(executor.reverts(), 0);
    assert_eq!(hasher.calls(), 1);
    assert_eq!(file_names(&dir).len(), 4);
}

#[tokio::test]
async fn test_failed_revert_keeps_files_and_skips_hash() {
    let dir = migrations(&[("0001", "init"), ("0002", "add_tasks")]);
    let executor = FakeExecutor::new(&["0001", "0002"]).failing_revert();
    let hasher = CountingHasher::default();
    let mut confirm = ScriptedConfirm::new(&[true]);

    let reconciler = Reconciler::new(MigrationDir::new(dir.path()), &executor, &hasher);
    let err = reconciler.run(&mut confirm).await.unwrap_err();

    match err {
        ReconcileError::Tool(ToolError::NonZeroExit { diagnostic, .. }) => {
            assert_eq!(diagnostic, "error: revert failed\n");
        }
        other => panic!("expected NonZeroExit, got {:?}", other),
    }
    assert_eq!(hasher.calls(), 0);
    assert_eq!(file_names(&dir).len(), 4);
}

#[tokio::test]
async fn test_reverting_everything_ends_on_empty_directory() {
    let dir = migrations(&[("0001", "init"), ("0002", "add_tasks")]);
    let executor = FakeExecutor::new(&["0001", "0002"]);
    let hasher = CountingHasher::default();
    let mut confirm = ScriptedConfirm::new(&[true, true]);

    let reconciler = Reconciler::new(MigrationDir::new(dir.path()), &executor, &hasher);
    let err = reconciler.run(&mut confirm).await.unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::Migrations(CoreError::NoDownMigrations { .. })
    ));
    assert_eq!(executor.reverts(), 2);
    assert_eq!(hasher.calls(), 0);
    assert!(file_names(&dir).is_empty());
}

#[tokio::test]
async fn test_hash_failure_is_reported() {
    let dir = migrations(&[("0001", "init")]);
    let executor = FakeExecutor::new(&["0001"]);
    let hasher = CountingHasher::failing();
    let mut confirm = ScriptedConfirm::new(&[]);

    let reconciler = Reconciler::new(MigrationDir::new(dir.path()), &executor, &hasher);
    let err = reconciler.run(&mut confirm).await.unwrap_err();

    assert!(matches!(err, ReconcileError::Tool(ToolError::NonZeroExit { .. })));
    assert_eq!(hasher.calls(), 1);
}

#[tokio::test]
async fn test_missing_directory_fails_before_querying() {
    let dir = TempDir::new().unwrap();
    let executor = FakeExecutor::new(&["0001"]);
    let hasher = CountingHasher::default();
    let mut confirm = ScriptedConfirm::new(&[true]);

    let reconciler = Reconciler::new(
        MigrationDir::new(dir.path().join("migrations")),
        &executor,
        &hasher,
    );
    let err = reconciler.run(&mut confirm).await.unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::Migrations(CoreError::MigrationDirNotFound { .. })
    ));
    assert_eq!(executor.reverts(), 0);
}
