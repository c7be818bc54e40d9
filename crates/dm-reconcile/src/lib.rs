//! dm-reconcile - Interactive migration reconciliation for devmig
//!
//! The [`Reconciler`] walks back the newest development migrations one at a
//! time: it checks that the newest file on disk is the newest migration the
//! database reports, asks the operator, reverts through the external
//! [`MigrationExecutor`], removes the files, and finally regenerates the
//! directory's integrity hash through a [`HashFinalizer`].

pub mod confirm;
pub mod error;
pub mod executor;
pub mod hash;
pub mod reconcile;
pub mod tool;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use confirm::{is_affirmative, Confirm, PromptConfirm, StdinConfirm};
pub use error::{ReconcileError, ReconcileResult, ToolError, ToolResult};
pub use executor::{CommandExecutor, MigrationExecutor};
pub use hash::{CommandHashFinalizer, HashFinalizer};
pub use reconcile::{ReconcileReport, Reconciler};
pub use tool::{ToolOutput, ToolRunner};
