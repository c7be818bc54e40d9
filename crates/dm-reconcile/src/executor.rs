//! Migration executor capability
//!
//! The reconciliation loop only needs two things from the migration tool:
//! the newest applied version and a one-step revert. [`CommandExecutor`]
//! provides both by shelling out to a sqlx-style CLI (`<tool> info`,
//! `<tool> revert`).

use crate::error::{ToolError, ToolResult};
use crate::tool::ToolRunner;
use async_trait::async_trait;
use dm_core::MigrationVersion;

/// Something that can report and revert applied migrations
#[async_trait]
pub trait MigrationExecutor: Send + Sync {
    /// Version of the newest migration the database reports.
    async fn latest_applied(&self) -> ToolResult<MigrationVersion>;

    /// Revert exactly one migration.
    async fn revert(&self) -> ToolResult<()>;
}

/// [`MigrationExecutor`] backed by an external CLI
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    runner: ToolRunner,
}

impl CommandExecutor {
    pub fn new(runner: ToolRunner) -> Self {
        Self { runner }
    }
}

/// Parse the version from the last non-empty line of `info` output.
pub(crate) fn parse_latest_version(command: &str, stdout: &str) -> ToolResult<MigrationVersion> {
    let unparseable = |reason| ToolError::UnparseableOutput {
        command: command.to_string(),
        reason,
        output: stdout.to_string(),
    };

    let last = stdout
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| unparseable("no migrations listed"))?;

    MigrationVersion::from_status_line(last)
        .ok_or_else(|| unparseable("expected <version>/<description> on the last line"))
}

#[async_trait]
impl MigrationExecutor for CommandExecutor {
    async fn latest_applied(&self) -> ToolResult<MigrationVersion> {
        let output = self.runner.run(&["info"]).await?;
        let version = parse_latest_version(&self.runner.command_line(&["info"]), &output.stdout)?;
        log::debug!("Executor reports {} as latest", version);
        Ok(version)
    }

    async fn revert(&self) -> ToolResult<()> {
        let output = self.runner.run(&["revert"]).await?;
        for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
            log::info!("{}", line);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
