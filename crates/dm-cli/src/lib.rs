//! devmig command line tools
//!
//! Shared argument definitions, runtime context, and command implementations
//! for the `seed-tool`, `reconcile`, and `login-header` binaries.

pub mod cli;
pub mod commands;
pub mod context;
pub mod logging;
