//! Schema rollout against a live SQLite database.
//!
//! The roller is the caller `oxide-ddl` expects: it introspects the table,
//! marks columns that already exist, picks create or alter, and runs the
//! resulting text in a single transaction.

use std::sync::Arc;

use oxide_ddl::{DialectTranslator, SchemaRow, SqliteTranslator, TableDefinition, TranslationTable};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::{debug, info, warn};

use crate::error::Result;

/// What a rollout did (or would do, in dry-run mode) to one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollPlan {
    /// The table did not exist and was created.
    Create {
        /// Rendered SQL.
        sql: String,
    },
    /// New columns were added.
    Alter {
        /// Rendered SQL.
        sql: String,
        /// Number of columns added.
        added: usize,
    },
    /// Nothing to do.
    Unchanged,
}

impl RollPlan {
    /// Returns the SQL to run, if any.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::Create { sql } | Self::Alter { sql, .. } => Some(sql),
            Self::Unchanged => None,
        }
    }
}

/// Applies table definitions to a SQLite database, additively.
pub struct Roller {
    pool: SqlitePool,
    translator: SqliteTranslator,
    dry_run: bool,
}

impl Roller {
    /// Creates a new roller.
    pub fn new(pool: SqlitePool, translations: Arc<TranslationTable>) -> Self {
        Self {
            pool,
            translator: SqliteTranslator::new(translations),
            dry_run: false,
        }
    }

    /// Enables dry-run mode (SQL is rendered but not executed).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Returns the translator used for rendering.
    #[must_use]
    pub const fn translator(&self) -> &SqliteTranslator {
        &self.translator
    }

    /// Lists the live columns of `table`, in table order.
    ///
    /// Returns an empty list when the table does not exist.
    pub async fn existing_columns(&self, table: &str) -> Result<Vec<String>> {
        let query = self.translator.table_schema_query(table);
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let name_field = self.translator.schema_name_field();
        let mut schema_rows = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut schema_row = SchemaRow::new();
            schema_row.insert(name_field.to_string(), row.try_get::<String, _>(name_field)?);
            schema_rows.push(schema_row);
        }
        Ok(self.translator.normalise_column_names(&schema_rows))
    }

    /// Decides what rolling `table` out requires, without executing it.
    pub async fn plan(&self, table: &TableDefinition) -> Result<RollPlan> {
        let existing = self.existing_columns(&table.name).await?;
        if existing.is_empty() {
            let sql = self.translator.render_create(table)?;
            return Ok(RollPlan::Create { sql });
        }

        for name in &existing {
            if table.get_column(name).is_none() {
                debug!(table = %table.name, column = %name, "Column not in definition, left in place");
            }
        }

        let mut table = table.clone();
        table.mark_existing(&existing);
        let added = table
            .columns
            .iter()
            .filter(|c| !c.exists && !c.drop)
            .count();

        Ok(match self.translator.render_alter(&table)? {
            Some(sql) => RollPlan::Alter { sql, added },
            None => RollPlan::Unchanged,
        })
    }

    /// Rolls one table out.
    pub async fn roll(&self, table: &TableDefinition) -> Result<RollPlan> {
        let plan = self.plan(table).await?;
        match &plan {
            RollPlan::Create { .. } => info!(table = %table.name, "Creating table"),
            RollPlan::Alter { added, .. } => info!(table = %table.name, added, "Altering table"),
            RollPlan::Unchanged => info!(table = %table.name, "No changes"),
        }

        if let Some(sql) = plan.sql() {
            debug!("{sql}");
            if self.dry_run {
                warn!(table = %table.name, "Dry run, SQL not executed");
            } else {
                self.execute(sql).await?;
            }
        }
        Ok(plan)
    }

    /// Rolls several tables out, in order, stopping at the first error.
    pub async fn roll_all(&self, tables: &[TableDefinition]) -> Result<Vec<RollPlan>> {
        let mut plans = Vec::with_capacity(tables.len());
        for table in tables {
            plans.push(self.roll(table).await?);
        }
        Ok(plans)
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::raw_sql(sql).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
