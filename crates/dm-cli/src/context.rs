//! Runtime context for CLI commands

use anyhow::{Context, Result};
use dm_core::{Config, DATABASE_URL_ENV};
use dm_db::{Database, DbType};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Project directory, loaded configuration, and environment
pub struct RuntimeContext {
    /// Project root, as given by `--project-dir`
    pub project_dir: PathBuf,

    /// Loaded devmig.yml (or defaults)
    pub config: Config,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Load `.env` and the project configuration.
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let project_dir = PathBuf::from(&args.project_dir);
        load_dotenv(&project_dir);

        let config =
            Config::load_from_dir(&project_dir).context("Failed to load project configuration")?;

        Ok(Self {
            project_dir,
            config,
            verbose: args.verbose,
        })
    }

    /// Database target: `DATABASE_URL`, else `database.path`. A DuckDB file
    /// path from the config is taken relative to the project directory.
    pub fn database_target(&self) -> Result<String> {
        let env_url = std::env::var(DATABASE_URL_ENV).ok();
        let from_env = env_url.as_deref().is_some_and(|url| !url.trim().is_empty());
        let target = self.config.connection_string(env_url)?;

        if from_env || DbType::from_url(&target) != DbType::DuckDb {
            return Ok(target);
        }
        Ok(resolve_relative(&self.project_dir, &target))
    }

    /// Open the fixture database; Postgres or DuckDB depending on the target.
    pub async fn connect(&self) -> Result<Arc<dyn Database>> {
        let target = self.database_target()?;
        let db_type = DbType::from_url(&target);
        log::debug!("Connecting to {} database", db_type);
        dm_db::connect(&target)
            .await
            .with_context(|| format!("Failed to connect to {} database", db_type))
    }

    /// Absolute path of the migration directory
    pub fn migrations_path(&self) -> PathBuf {
        self.config.migrations_path(&self.project_dir)
    }
}

/// Load `<project>/.env`, falling back to the usual lookup from the current
/// directory. Variables already set in the environment win.
fn load_dotenv(project_dir: &Path) {
    let project_env = project_dir.join(".env");
    let loaded = if project_env.is_file() {
        dotenvy::from_path(&project_env).map(|_| project_env)
    } else {
        dotenvy::dotenv()
    };
    match loaded {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Join a relative DuckDB file path onto the project directory.
fn resolve_relative(project_dir: &Path, target: &str) -> String {
    let path = target.strip_prefix("duckdb://").unwrap_or(target);
    if path == ":memory:" || Path::new(path).is_absolute() {
        return target.to_string();
    }
    project_dir.join(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        let root = Path::new("/srv/app");
        assert_eq!(resolve_relative(root, ":memory:"), ":memory:");
        assert_eq!(resolve_relative(root, "duckdb://:memory:"), "duckdb://:memory:");
        assert_eq!(resolve_relative(root, "/tmp/dev.duckdb"), "/tmp/dev.duckdb");
        assert_eq!(resolve_relative(root, "dev.duckdb"), "/srv/app/dev.duckdb");
        assert_eq!(
            resolve_relative(root, "duckdb://data/dev.duckdb"),
            "/srv/app/data/dev.duckdb"
        );
    }

    fn context_with_path(path: &str) -> RuntimeContext {
        let mut config = Config::default();
        config.database.path = Some(path.to_string());
        RuntimeContext {
            project_dir: PathBuf::from("/srv/app"),
            config,
            verbose: false,
        }
    }

    #[test]
    fn test_config_postgres_url_is_not_joined_to_project_dir() {
        if std::env::var(DATABASE_URL_ENV).is_ok_and(|url| !url.trim().is_empty()) {
            return;
        }
        let ctx = context_with_path("postgres://meteor:pw@localhost:5432/app");
        assert_eq!(
            ctx.database_target().unwrap(),
            "postgres://meteor:pw@localhost:5432/app"
        );

        let ctx = context_with_path("dev.duckdb");
        assert_eq!(ctx.database_target().unwrap(), "/srv/app/dev.duckdb");
    }
}
