//! seed-tool - insert or delete the development fixture data

use dm_cli::cli::SeedToolCli;
use dm_cli::commands::common::{exit_status, parse_args};
use dm_cli::commands::seed;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli: SeedToolCli = parse_args();
    dm_cli::logging::init(cli.global.verbose);

    let status = exit_status(seed::execute(&cli).await);
    ExitCode::from(u8::try_from(status).unwrap_or(1))
}
