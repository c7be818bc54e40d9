//! Shared test utilities for dm-reconcile

use crate::confirm::Confirm;
use crate::error::{ToolError, ToolResult};
use crate::executor::MigrationExecutor;
use crate::hash::HashFinalizer;
use async_trait::async_trait;
use dm_core::MigrationVersion;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Write an empty `<version>_<name>.{up,down}.sql` pair into `dir`.
pub fn write_pair(dir: &Path, version: &str, name: &str) {
    for direction in ["up", "down"] {
        std::fs::write(
            dir.join(format!("{version}_{name}.{direction}.sql")),
            format!("-- {direction} {name}\n"),
        )
        .expect("write migration file");
    }
}

/// In-memory migration history: the last entry is the newest applied version
pub struct FakeExecutor {
    applied: Mutex<Vec<MigrationVersion>>,
    reverts: AtomicUsize,
    fail_revert: bool,
}

impl FakeExecutor {
    pub fn new(applied: &[&str]) -> Self {
        Self {
            applied: Mutex::new(applied.iter().map(|v| MigrationVersion::new(*v)).collect()),
            reverts: AtomicUsize::new(0),
            fail_revert: false,
        }
    }

    /// Every revert exits non-zero.
    pub fn failing_revert(mut self) -> Self {
        self.fail_revert = true;
        self
    }

    pub fn reverts(&self) -> usize {
        self.reverts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MigrationExecutor for FakeExecutor {
    async fn latest_applied(&self) -> ToolResult<MigrationVersion> {
        let applied = self.applied.lock().expect("applied lock");
        applied
            .last()
            .cloned()
            .ok_or_else(|| ToolError::UnparseableOutput {
                command: "fake info".to_string(),
                reason: "no migrations listed",
                output: String::new(),
            })
    }

    async fn revert(&self) -> ToolResult<()> {
        if self.fail_revert {
            return Err(ToolError::NonZeroExit {
                command: "fake revert".to_string(),
                code: 1,
                diagnostic: "error: revert failed\n".to_string(),
            });
        }
        self.reverts.fetch_add(1, Ordering::SeqCst);
        self.applied.lock().expect("applied lock").pop();
        Ok(())
    }
}

/// Counts hash regenerations
#[derive(Default)]
pub struct CountingHasher {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingHasher {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HashFinalizer for CountingHasher {
    async fn finalize(&self) -> ToolResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ToolError::NonZeroExit {
                command: "fake hash".to_string(),
                code: 1,
                diagnostic: "hash failed\n".to_string(),
            });
        }
        Ok(())
    }
}

/// Answers from a fixed script, then "no"; records every prompt
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    pub prompts: Vec<String>,
}

impl ScriptedConfirm {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            prompts: Vec::new(),
        }
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&mut self, prompt: &str) -> std::io::Result<bool> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
