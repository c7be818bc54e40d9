//! login-header - print an Authorization header for the local API

use dm_cli::cli::LoginCli;
use dm_cli::commands::common::{exit_status, parse_args};
use dm_cli::commands::login;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli: LoginCli = parse_args();
    dm_cli::logging::init(cli.global.verbose);

    let status = exit_status(login::execute(&cli).await);
    ExitCode::from(u8::try_from(status).unwrap_or(1))
}
