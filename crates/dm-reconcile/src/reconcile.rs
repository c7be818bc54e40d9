//! The reconciliation loop
//!
//! ```text
//! Check ──match──▶ Confirm ──yes──▶ Revert ──▶ Remove ──▶ Check
//!   │                 │                │
//!   mismatch          no               failed
//!   ▼                 ▼                ▼
//! error            Stopped ──▶ hash   error
//! ```
//!
//! The migration hash is regenerated only after a clean stop. A mismatch or
//! a failed step returns immediately and leaves the hash alone; a mismatch
//! still names the versions reverted before it.

use crate::confirm::Confirm;
use crate::error::{ReconcileError, ReconcileResult};
use crate::executor::MigrationExecutor;
use crate::hash::HashFinalizer;
use dm_core::{MigrationDir, MigrationFilePair, MigrationVersion};
use std::path::PathBuf;

/// What a finished run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Reverted versions, newest first
    pub reverted: Vec<MigrationVersion>,
    /// Migration files deleted from disk
    pub removed_files: Vec<PathBuf>,
    /// Files that were already gone when their version was removed
    pub missing_files: Vec<PathBuf>,
}

#[derive(Debug)]
enum State {
    Check,
    Confirm(MigrationFilePair),
    Revert(MigrationFilePair),
    Remove(MigrationFilePair),
    Stopped,
}

/// Reverts development migrations until the operator stops it
pub struct Reconciler<'a> {
    dir: MigrationDir,
    executor: &'a dyn MigrationExecutor,
    hasher: &'a dyn HashFinalizer,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        dir: MigrationDir,
        executor: &'a dyn MigrationExecutor,
        hasher: &'a dyn HashFinalizer,
    ) -> Self {
        Self {
            dir,
            executor,
            hasher,
        }
    }

    /// Run the loop until the operator declines or a step fails.
    pub async fn run(&self, confirm: &mut dyn Confirm) -> ReconcileResult<ReconcileReport> {
        let mut report = ReconcileReport::default();
        let mut state = State::Check;

        loop {
            log::debug!("Reconcile state: {:?}", state);
            state = match state {
                State::Check => State::Confirm(self.check(&report.reverted).await?),
                State::Confirm(pair) => {
                    let prompt = format!("Revert {}?", pair.version);
                    if confirm
                        .confirm(&prompt)
                        .await
                        .map_err(ReconcileError::Prompt)?
                    {
                        State::Revert(pair)
                    } else {
                        State::Stopped
                    }
                }
                State::Revert(pair) => {
                    log::info!("Reverting {}", pair.version);
                    self.executor.revert().await?;
                    report.reverted.push(pair.version.clone());
                    State::Remove(pair)
                }
                State::Remove(pair) => {
                    let removed = self.dir.remove_pair(&pair)?;
                    report.removed_files.extend(removed.removed);
                    report.missing_files.extend(removed.missing);
                    State::Check
                }
                State::Stopped => {
                    self.hasher.finalize().await?;
                    log::info!(
                        "Reverted {} migration(s), removed {} file(s)",
                        report.reverted.len(),
                        report.removed_files.len()
                    );
                    return Ok(report);
                }
            };
        }
    }

    /// Newest file pair, provided the database agrees it is the newest applied.
    ///
    /// A mismatch carries `reverted` so the caller can report partial progress.
    async fn check(&self, reverted: &[MigrationVersion]) -> ReconcileResult<MigrationFilePair> {
        let pair = self.dir.latest_pair()?;
        let applied = self.executor.latest_applied().await?;

        if pair.version != applied {
            log::error!(
                "Version mismatch: file {} vs applied {}",
                pair.version,
                applied
            );
            return Err(ReconcileError::VersionMismatch {
                file: pair.version,
                applied,
                reverted: reverted.to_vec(),
            });
        }

        log::info!("Latest migration {} is applied", pair.version);
        Ok(pair)
    }
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
