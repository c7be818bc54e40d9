//! Shared utilities for CLI commands

use anyhow::Result;
use clap::Parser;
use dm_fixture::FixtureReport;
use std::fmt;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub struct ExitCode(pub i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; never shown to the user
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Parse arguments, exiting 1 on a usage error and 0 for `--help`/`--version`.
pub fn parse_args<T: Parser>() -> T {
    T::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        // Nothing more useful to do if stderr itself is gone
        let _ = err.print();
        std::process::exit(code);
    })
}

/// Map a command result to a process exit status, printing real errors.
pub fn exit_status(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(code) => code.0,
            None => {
                eprintln!("Error: {:?}", err);
                1
            }
        },
    }
}

/// One-line summary such as `users 2, tasks 4`
pub(crate) fn format_report(report: &FixtureReport) -> String {
    report
        .tables
        .iter()
        .map(|t| format!("{} {}", t.table, t.rows))
        .collect::<Vec<_>>()
        .join(", ")
}
