//! Command implementations

pub mod common;
pub mod login;
pub mod reconcile;
pub mod seed;
