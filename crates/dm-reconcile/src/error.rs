//! Error types for dm-reconcile

use dm_core::{CoreError, MigrationVersion};
use thiserror::Error;

/// Failure of an external command
#[derive(Error, Debug)]
pub enum ToolError {
    /// T001: The program could not be started
    #[error("[T001] Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// T002: The program ran and exited unsuccessfully
    ///
    /// `diagnostic` is the program's stderr (or stdout when stderr is empty),
    /// unmodified.
    #[error("[T002] '{command}' exited with status {code}\n{diagnostic}")]
    NonZeroExit {
        command: String,
        code: i32,
        diagnostic: String,
    },

    /// T003: The program succeeded but its output could not be interpreted
    #[error("[T003] Unexpected output from '{command}' ({reason}):\n{output}")]
    UnparseableOutput {
        command: String,
        reason: &'static str,
        output: String,
    },
}

/// Result type alias for ToolError
pub type ToolResult<T> = Result<T, ToolError>;

/// Reasons the reconciliation loop halts with an error
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// R001: The newest migration file is not the newest applied migration
    ///
    /// `reverted` lists the versions this run had already reverted, newest
    /// first; their files are gone and the hash was not regenerated.
    #[error(
        "[R001] Latest migration file is {file} but the database reports {applied} as latest; {}",
        reverted_summary(.reverted)
    )]
    VersionMismatch {
        file: MigrationVersion,
        applied: MigrationVersion,
        reverted: Vec<MigrationVersion>,
    },

    /// R002: The operator's answer could not be read
    #[error("[R002] Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),

    /// Migration directory scan or file removal failed
    #[error(transparent)]
    Migrations(#[from] CoreError),

    /// Executor or hash tool failed
    #[error(transparent)]
    Tool(#[from] ToolError),
}

fn reverted_summary(reverted: &[MigrationVersion]) -> String {
    if reverted.is_empty() {
        return "nothing was reverted".to_string();
    }
    let versions = reverted
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("already reverted in this run: {versions} (migration hash not regenerated)")
}

/// Result type alias for ReconcileError
pub type ReconcileResult<T> = Result<T, ReconcileError>;
