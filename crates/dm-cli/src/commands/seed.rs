//! `seed-tool` implementation

use anyhow::{Context, Result};
use dm_fixture::{FixtureCatalog, Seeder};

use crate::cli::{SeedAction, SeedToolCli};
use crate::commands::common::format_report;
use crate::context::RuntimeContext;

/// Execute the seed tool
pub async fn execute(args: &SeedToolCli) -> Result<()> {
    let ctx = RuntimeContext::load(&args.global)?;
    let db = ctx.connect().await?;
    let catalog = FixtureCatalog::standard();
    let seeder = Seeder::new(&catalog, db.as_ref());

    match args.action {
        SeedAction::Generate => {
            let report = seeder
                .seed()
                .await
                .context("Failed to insert fixture data")?;
            println!(
                "Inserted {} fixture rows ({})",
                report.total_rows(),
                format_report(&report)
            );
        }
        SeedAction::Clean => {
            let report = seeder
                .clean()
                .await
                .context("Failed to delete fixture data")?;
            println!(
                "Deleted {} fixture rows ({})",
                report.total_rows(),
                format_report(&report)
            );
        }
    }

    Ok(())
}
