//! reconcile - interactively revert development migrations

use dm_cli::cli::ReconcileCli;
use dm_cli::commands::common::{exit_status, parse_args};
use dm_cli::commands::reconcile;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli: ReconcileCli = parse_args();
    dm_cli::logging::init(cli.global.verbose);

    let status = exit_status(reconcile::execute(&cli).await);
    ExitCode::from(u8::try_from(status).unwrap_or(1))
}
