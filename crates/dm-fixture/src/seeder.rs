//! Fixture seeding and cleanup
//!
//! Both operations build their full statement list up front and hand it to
//! [`Database::execute_in_transaction`], so a run either commits every row or
//! none of them.

use crate::catalog::{FixtureCatalog, TableSpec};
use crate::entity::FixtureSet;
use crate::error::{FixtureError, FixtureResult};
use dm_db::{Database, Statement};

/// Rows affected in one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: usize,
}

/// Per-table row counts of a seed or clean run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureReport {
    pub tables: Vec<TableCount>,
}

impl FixtureReport {
    /// Total rows across all tables
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    fn add(&mut self, table: &'static str, rows: usize) {
        match self.tables.iter_mut().find(|t| t.table == table) {
            Some(entry) => entry.rows += rows,
            None => self.tables.push(TableCount { table, rows }),
        }
    }
}

/// Inserts and deletes fixture rows for the tables in a catalog
pub struct Seeder<'a> {
    catalog: &'a FixtureCatalog,
    db: &'a dyn Database,
}

impl<'a> Seeder<'a> {
    pub fn new(catalog: &'a FixtureCatalog, db: &'a dyn Database) -> Self {
        Self { catalog, db }
    }

    /// Insert the standard fixture graph.
    pub async fn seed(&self) -> FixtureResult<FixtureReport> {
        self.seed_with(&FixtureSet::standard()).await
    }

    /// Insert `fixtures` in dependency order inside one transaction.
    pub async fn seed_with(&self, fixtures: &FixtureSet) -> FixtureResult<FixtureReport> {
        let (tables, statements): (Vec<&'static str>, Vec<Statement>) =
            self.insert_statements(fixtures)?.into_iter().unzip();
        log::info!(
            "Seeding {} rows into {} tables ({})",
            statements.len(),
            self.catalog.len(),
            self.db.db_type()
        );

        let counts = self.db.execute_in_transaction(&statements).await?;

        let mut report = FixtureReport::default();
        for spec in self.catalog.insert_order() {
            report.add(spec.table, 0);
        }
        for (table, rows) in tables.into_iter().zip(counts) {
            report.add(table, rows);
        }
        Ok(report)
    }

    /// Delete every row from every catalog table, dependents first.
    ///
    /// Succeeds on an already-empty database.
    pub async fn clean(&self) -> FixtureResult<FixtureReport> {
        let specs: Vec<&TableSpec> = self.catalog.delete_order().collect();
        let statements: Vec<Statement> = specs
            .iter()
            .map(|spec| Statement::new(format!("DELETE FROM {}", spec.table)))
            .collect();

        log::info!("Cleaning {} fixture tables", statements.len());
        let counts = self.db.execute_in_transaction(&statements).await?;

        let mut report = FixtureReport::default();
        for (spec, rows) in specs.iter().zip(counts) {
            report.add(spec.table, rows);
        }
        Ok(report)
    }

    /// Build one INSERT per entity, ordered by the catalog's dependency order.
    ///
    /// Fails before anything is executed if an entity's kind is not
    /// registered or its serialized columns differ from the catalog's.
    pub fn insert_statements(
        &self,
        fixtures: &FixtureSet,
    ) -> FixtureResult<Vec<(&'static str, Statement)>> {
        let mut planned = Vec::with_capacity(fixtures.len());

        for entity in &fixtures.entities {
            let kind = entity.kind();
            let spec = self.catalog.resolve(kind)?;
            let position = self.catalog.position(kind)?;
            let row = entity.to_row();

            let columns: Vec<&str> = row.iter().map(|(column, _)| *column).collect();
            if columns != spec.columns {
                return Err(FixtureError::ColumnMismatch {
                    kind,
                    table: spec.table,
                    expected: spec.columns.join(", "),
                    found: columns.join(", "),
                });
            }

            let placeholders = vec!["?"; columns.len()].join(", ");
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                spec.table,
                columns.join(", "),
                placeholders
            );
            let params = row.into_iter().map(|(_, value)| value).collect();
            planned.push((position, spec.table, Statement::with_params(sql, params)));
        }

        // Stable: entities of one kind keep their relative order
        planned.sort_by_key(|(position, _, _)| *position);
        Ok(planned
            .into_iter()
            .map(|(_, table, statement)| (table, statement))
            .collect())
    }
}

#[cfg(test)]
#[path = "seeder_test.rs"]
mod tests;
