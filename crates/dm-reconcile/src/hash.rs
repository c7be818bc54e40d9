//! Migration directory hash regeneration

use crate::error::ToolResult;
use crate::tool::ToolRunner;
use async_trait::async_trait;

/// Regenerates the migration directory's integrity hash
#[async_trait]
pub trait HashFinalizer: Send + Sync {
    async fn finalize(&self) -> ToolResult<()>;
}

/// [`HashFinalizer`] that runs the configured hash command as is
#[derive(Debug, Clone)]
pub struct CommandHashFinalizer {
    runner: ToolRunner,
}

impl CommandHashFinalizer {
    pub fn new(runner: ToolRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl HashFinalizer for CommandHashFinalizer {
    async fn finalize(&self) -> ToolResult<()> {
        log::info!("Regenerating migration hash: {}", self.runner.command_line(&[]));
        let output = self.runner.run(&[]).await?;
        if !output.stdout.trim().is_empty() {
            log::debug!("{}", output.stdout.trim_end());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use dm_core::ToolConfig;

    #[tokio::test]
    async fn test_finalize_passes_no_extra_args() {
        let hasher = CommandHashFinalizer::new(ToolRunner::new(ToolConfig::new(
            "sh",
            &["-c", "test $# -eq 0", "sh"],
        )));
        hasher.finalize().await.unwrap();
    }

    #[tokio::test]
    async fn test_finalize_failure_is_fatal() {
        let hasher = CommandHashFinalizer::new(ToolRunner::new(ToolConfig::new(
            "sh",
            &["-c", "echo 'atlas.sum: checksum mismatch' >&2; exit 1"],
        )));
        let err = hasher.finalize().await.unwrap_err();
        assert!(matches!(
            err,
            ToolError::NonZeroExit { ref diagnostic, .. } if diagnostic == "atlas.sum: checksum mismatch\n"
        ));
    }
}
