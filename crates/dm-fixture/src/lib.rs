//! dm-fixture - Deterministic development fixtures for devmig
//!
//! A [`FixtureCatalog`] maps each entity kind to its table, a [`FixtureSet`]
//! holds the rows to insert (with fixed ids from [`ids`]), and the
//! [`Seeder`] inserts or deletes them transactionally.

pub mod catalog;
pub mod entity;
pub mod error;
pub mod ids;
pub mod seeder;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use catalog::{FixtureCatalog, FixtureKind, TableSpec};
pub use entity::{
    DateRange, FixtureEntity, FixtureSet, Iteration, IterationTask, Task, TaskStatus, User,
};
pub use error::{FixtureError, FixtureResult};
pub use seeder::{FixtureReport, Seeder, TableCount};
