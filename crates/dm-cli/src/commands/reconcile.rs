//! `reconcile` implementation
//!
//! Clears the fixture rows first so reverted migrations never trip over
//! seeded data, then hands the terminal to the reconciliation loop.

use anyhow::{Context, Result};
use dm_core::MigrationDir;
use dm_fixture::{FixtureCatalog, Seeder};
use dm_reconcile::{
    CommandExecutor, CommandHashFinalizer, ReconcileError, Reconciler, StdinConfirm, ToolRunner,
};

use crate::cli::ReconcileCli;
use crate::commands::common::{format_report, ExitCode};
use crate::context::RuntimeContext;

/// Execute the reconcile tool
pub async fn execute(args: &ReconcileCli) -> Result<()> {
    let ctx = RuntimeContext::load(&args.global)?;

    let db = ctx.connect().await?;
    let catalog = FixtureCatalog::standard();
    let cleaned = Seeder::new(&catalog, db.as_ref())
        .clean()
        .await
        .context("Failed to clean fixture data before reverting")?;
    println!(
        "Cleaned {} fixture rows ({})",
        cleaned.total_rows(),
        format_report(&cleaned)
    );

    let executor = CommandExecutor::new(
        ToolRunner::new(ctx.config.executor.clone()).with_working_dir(&ctx.project_dir),
    );
    let hasher = CommandHashFinalizer::new(
        ToolRunner::new(ctx.config.hash_tool.clone()).with_working_dir(&ctx.project_dir),
    );
    let dir = MigrationDir::new(ctx.migrations_path());
    log::debug!("Migration directory: {}", dir.path().display());

    let reconciler = Reconciler::new(dir, &executor, &hasher);
    let mut confirm = StdinConfirm::stdin();

    match reconciler.run(&mut confirm).await {
        Ok(report) => {
            if report.reverted.is_empty() {
                println!("No migrations reverted.");
            } else {
                let versions: Vec<&str> = report.reverted.iter().map(|v| v.as_str()).collect();
                println!(
                    "Reverted {} and removed {} files.",
                    versions.join(", "),
                    report.removed_files.len()
                );
            }
            Ok(())
        }
        Err(err @ ReconcileError::VersionMismatch { .. }) => {
            eprintln!("{}", err);
            eprintln!("Apply or remove migrations until they agree, then run reconcile again.");
            Err(ExitCode(1).into())
        }
        Err(err) => Err(err).context("Reconciliation failed"),
    }
}
