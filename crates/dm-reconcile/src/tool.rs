//! External command execution

use crate::error::{ToolError, ToolResult};
use dm_core::ToolConfig;
use std::path::PathBuf;

/// Captured result of one external command
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// What the program said about itself: stderr, or stdout if stderr is empty.
    pub fn diagnostic(&self) -> &str {
        if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Runs a configured program with extra trailing arguments
#[derive(Debug, Clone)]
pub struct ToolRunner {
    config: ToolConfig,
    working_dir: Option<PathBuf>,
}

impl ToolRunner {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            config,
            working_dir: None,
        }
    }

    /// Run the program from `dir` instead of the current directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Full command line for `extra`, as shown in logs and errors
    pub fn command_line(&self, extra: &[&str]) -> String {
        self.config.command_line(extra)
    }

    /// Run to completion and capture the output, whatever the exit status.
    ///
    /// Only a failure to start the program is an error. The child gets no
    /// stdin.
    pub async fn output(&self, extra: &[&str]) -> ToolResult<ToolOutput> {
        let command_line = self.command_line(extra);
        log::debug!("Running: {}", command_line);

        let mut command = tokio::process::Command::new(&self.config.program);
        command.args(&self.config.args).args(extra);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .await
            .map_err(|source| ToolError::Spawn {
                command: command_line,
                source,
            })?;

        Ok(ToolOutput {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run to completion, failing with [`ToolError::NonZeroExit`] unless the
    /// program exits successfully.
    pub async fn run(&self, extra: &[&str]) -> ToolResult<ToolOutput> {
        let output = self.output(extra).await?;
        if !output.success {
            return Err(ToolError::NonZeroExit {
                command: self.command_line(extra),
                code: output.exit_code,
                diagnostic: output.diagnostic().to_string(),
            });
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "tool_test.rs"]
mod tests;
