//! Logger setup for the devmig binaries

use env_logger::Env;

/// Install the global logger.
///
/// The default level is `info`, or `debug` with `--verbose`; `RUST_LOG`
/// overrides both.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let result = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_target(false)
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}
