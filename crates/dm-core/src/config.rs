//! Configuration types and parsing for devmig.yml
//!
//! Every key is optional: a project without `devmig.yml` runs with the
//! defaults below (`migrations/`, `sqlx migrate`, `npx @ariga/atlas migrate
//! hash`). The database connection string normally comes from the
//! `DATABASE_URL` environment variable, which wins over `database.path`.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the environment variable holding the database connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Default config file name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "devmig.yml";

/// Main project configuration from devmig.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding `<version>_<description>.{up,down}.sql` files
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// External migration executor; `revert` and `info` are appended
    #[serde(default = "default_executor")]
    pub executor: ToolConfig,

    /// External schema-hash regeneration command
    #[serde(default = "default_hash_tool")]
    pub hash_tool: ToolConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file path, `:memory:`, or a `postgres://` URL; overridden by `DATABASE_URL`
    #[serde(default)]
    pub path: Option<String>,
}

/// An external command: program plus the fixed leading arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Program to execute (looked up on PATH)
    pub program: String,

    /// Arguments always passed before any subcommand
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolConfig {
    /// Build a tool config from a program and its leading arguments.
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Render the full command line, for logs and error messages.
    pub fn command_line(&self, extra: &[&str]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(extra.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_executor() -> ToolConfig {
    ToolConfig::new("sqlx", &["migrate"])
}

fn default_hash_tool() -> ToolConfig {
    ToolConfig::new("npx", &["@ariga/atlas", "migrate", "hash"])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            database: DatabaseConfig::default(),
            executor: default_executor(),
            hash_tool: default_hash_tool(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: format!("{}: {}", path.display(), e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    ///
    /// Looks for devmig.yml or devmig.yaml and falls back to the defaults when
    /// neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join(CONFIG_FILE_NAME);
        let yaml_path = dir.join("devmig.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            log::debug!(
                "No {} in {}, using defaults",
                CONFIG_FILE_NAME,
                dir.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }
        for (key, tool) in [("executor", &self.executor), ("hash_tool", &self.hash_tool)] {
            if tool.program.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{key}.program cannot be empty"),
                });
            }
        }
        Ok(())
    }

    /// Absolute path to the migration directory for a project root
    pub fn migrations_path(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Resolve the database connection string.
    ///
    /// `env_url` is the value of `DATABASE_URL` (if set); it takes precedence
    /// over `database.path`. Blank values count as unset.
    pub fn connection_string(&self, env_url: Option<String>) -> CoreResult<String> {
        env_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                self.database
                    .path
                    .clone()
                    .filter(|p| !p.trim().is_empty())
            })
            .ok_or_else(|| CoreError::MissingConnectionString {
                config_file: CONFIG_FILE_NAME.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
