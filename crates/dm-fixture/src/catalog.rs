//! Fixture catalog: which table each fixture kind lives in
//!
//! The catalog is an explicit value built once and handed to the
//! [`Seeder`](crate::Seeder). Registration order is dependency order: owners
//! first, link tables last. Cleanup walks the same list backwards.

use crate::error::{FixtureError, FixtureResult};
use std::fmt;

/// Every kind of fixture entity the seeder knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    User,
    Task,
    Iteration,
    IterationTask,
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FixtureKind::User => "User",
            FixtureKind::Task => "Task",
            FixtureKind::Iteration => "Iteration",
            FixtureKind::IterationTask => "IterationTask",
        };
        f.write_str(name)
    }
}

/// Table and ordered column list registered for one fixture kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub kind: FixtureKind,
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

const STANDARD_TABLES: &[TableSpec] = &[
    TableSpec {
        kind: FixtureKind::User,
        table: "users",
        columns: &["id", "username"],
    },
    TableSpec {
        kind: FixtureKind::Task,
        table: "tasks",
        columns: &["id", "user_id", "title", "status", "point"],
    },
    TableSpec {
        kind: FixtureKind::Iteration,
        table: "iterations",
        columns: &["id", "user_id", "name", "date_range"],
    },
    TableSpec {
        kind: FixtureKind::IterationTask,
        table: "iterations_tasks",
        columns: &["iteration_id", "task_id"],
    },
];

/// Registry mapping fixture kinds to tables, in dependency order
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    tables: Vec<TableSpec>,
}

impl FixtureCatalog {
    /// Empty catalog; populate it with [`register`](Self::register).
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog for the application schema: users, tasks, iterations and the
    /// iteration/task link table.
    pub fn standard() -> Self {
        Self {
            tables: STANDARD_TABLES.to_vec(),
        }
    }

    /// Register `kind` as living in `table`.
    ///
    /// Tables must be registered after every table they reference. A kind or
    /// table can only be registered once.
    pub fn register(
        &mut self,
        kind: FixtureKind,
        table: &'static str,
        columns: &'static [&'static str],
    ) -> FixtureResult<()> {
        if let Some(existing) = self
            .tables
            .iter()
            .find(|spec| spec.kind == kind || spec.table == table)
        {
            return Err(FixtureError::DuplicateRegistration(format!(
                "{kind} -> {table} conflicts with {} -> {}",
                existing.kind, existing.table
            )));
        }
        self.tables.push(TableSpec {
            kind,
            table,
            columns,
        });
        Ok(())
    }

    /// Look up the table registered for `kind`.
    pub fn resolve(&self, kind: FixtureKind) -> FixtureResult<&TableSpec> {
        self.tables
            .iter()
            .find(|spec| spec.kind == kind)
            .ok_or(FixtureError::UnregisteredKind(kind))
    }

    /// Position of `kind` in dependency order.
    pub(crate) fn position(&self, kind: FixtureKind) -> FixtureResult<usize> {
        self.tables
            .iter()
            .position(|spec| spec.kind == kind)
            .ok_or(FixtureError::UnregisteredKind(kind))
    }

    /// Tables in insertion order (owners before dependents)
    pub fn insert_order(&self) -> impl Iterator<Item = &TableSpec> {
        self.tables.iter()
    }

    /// Tables in deletion order (dependents before owners)
    pub fn delete_order(&self) -> impl Iterator<Item = &TableSpec> {
        self.tables.iter().rev()
    }

    /// Number of registered tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
