//! Dialect-specific SQL generation.
//!
//! [`DialectTranslator`] holds the rendering shared by every database and
//! exposes small hooks (quoting, auto-increment, nullability, clause order)
//! where the dialects disagree. Each statement in the returned text ends
//! with `;` and statements are separated by newlines.

mod mysql;
mod postgres;
mod sqlite;

use std::collections::BTreeMap;

use tracing::{debug, warn};

pub use mysql::MySqlTranslator;
pub use postgres::PostgresTranslator;
pub use sqlite::SqliteTranslator;

use crate::error::{Result, TranslateError};
use crate::schema::{ColumnDefinition, ConstraintKind, IndexMarker, TableDefinition};
use crate::translation::TranslationKind;
use crate::translator::Translator;
use crate::vendor::Vendor;

/// One row returned by [`DialectTranslator::table_schema_query`], keyed by
/// result column name.
pub type SchemaRow = BTreeMap<String, String>;

/// SQL emission for one database.
pub trait DialectTranslator: Translator {
    /// Returns the vendor this translator emits SQL for.
    fn vendor(&self) -> Vendor;

    /// Returns the identifier quote character.
    fn quote_char(&self) -> char;

    /// Wraps an identifier so it cannot clash with reserved words.
    ///
    /// Quote characters inside the identifier are doubled.
    fn safe_enclose(&self, identifier: &str) -> String {
        let quote = self.quote_char();
        let mut out = String::with_capacity(identifier.len() + 2);
        out.push(quote);
        for c in identifier.chars() {
            if c == quote {
                out.push(quote);
            }
            out.push(c);
        }
        out.push(quote);
        out
    }

    /// Quotes a string constant.
    fn quote_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Returns the inline auto-increment clause, if the dialect has one.
    fn auto_increment_clause(&self) -> Option<&'static str>;

    /// Returns whether a column is declared `NULL`.
    ///
    /// Auto-increment columns are declared nullable so the database can
    /// fill them in.
    fn allows_null(&self, column: &ColumnDefinition) -> bool {
        column.allow_null || column.auto_increment
    }

    /// Resolves the column type: translated keyword, else the literal type.
    fn resolve_type(&self, column: &ColumnDefinition) -> String {
        self.translate(&column.sql_type, self.vendor())
            .map_or_else(|| column.sql_type.clone(), str::to_string)
    }

    /// Returns `NULL` or `NOT NULL`.
    fn null_clause(&self, column: &ColumnDefinition) -> &'static str {
        if self.allows_null(column) {
            "NULL"
        } else {
            "NOT NULL"
        }
    }

    /// Returns the `DEFAULT` clause.
    ///
    /// Auto-increment columns never get one. A translated default is a
    /// recognised expression and is emitted bare, except function calls,
    /// which SQLite and MySQL only accept in parentheses. Anything else is
    /// quoted.
    fn default_clause(&self, column: &ColumnDefinition) -> Option<String> {
        if column.auto_increment {
            return None;
        }
        let value = column.default_value()?;
        Some(match self.translations().lookup(value, self.vendor()) {
            Some(entry) if entry.kind == TranslationKind::Function => {
                format!("DEFAULT ({})", entry.replacement)
            }
            Some(entry) => format!("DEFAULT {}", entry.replacement),
            None => format!("DEFAULT {}", self.quote_literal(value)),
        })
    }

    /// Assembles the clauses of an already validated column.
    ///
    /// The default order is name, type, `UNIQUE`, auto-increment,
    /// nullability, default.
    fn column_clauses(&self, column: &ColumnDefinition) -> Vec<String> {
        let mut parts = vec![self.safe_enclose(&column.name), self.resolve_type(column)];
        if column.index == IndexMarker::Unique {
            parts.push("UNIQUE".to_string());
        }
        if column.auto_increment {
            if let Some(clause) = self.auto_increment_clause() {
                parts.push(clause.to_string());
            }
        }
        parts.push(self.null_clause(column).to_string());
        if let Some(default) = self.default_clause(column) {
            parts.push(default);
        }
        parts
    }

    /// Renders a column definition.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Validation`] if `name` or `sql_type` is empty.
    fn render_column(&self, column: &ColumnDefinition) -> Result<String> {
        column.validate("")?;
        Ok(self.column_clauses(column).join(" "))
    }

    /// Renders a single `INSERT` statement.
    ///
    /// Values are inserted verbatim, so pass placeholders or expressions
    /// that are already safe for the target database.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Validation`] if the table name or column
    /// list is empty or if the column and value counts differ.
    fn render_insert(&self, table: &str, columns: &[&str], values: &[&str]) -> Result<String> {
        if table.trim().is_empty() {
            return Err(TranslateError::required("", "table name"));
        }
        if columns.is_empty() {
            return Err(TranslateError::required(table, "columns"));
        }
        if columns.len() != values.len() {
            return Err(TranslateError::Validation {
                table: table.to_string(),
                field: "values",
                message: format!(
                    "has {} entries but {} columns were given",
                    values.len(),
                    columns.len()
                ),
            });
        }

        let quoted: Vec<String> = columns.iter().map(|c| self.safe_enclose(c)).collect();
        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.safe_enclose(table),
            quoted.join(", "),
            values.join(", ")
        ))
    }

    /// Returns trailing table options (`ENGINE=...` and the like).
    fn table_options(&self, _table: &TableDefinition) -> String {
        String::new()
    }

    /// Returns the guard placed after `CREATE INDEX`.
    fn index_guard(&self) -> &'static str {
        "IF NOT EXISTS "
    }

    /// Renders the `CREATE INDEX` statement for one column.
    fn create_index(&self, table: &str, column: &str) -> String {
        format!(
            "CREATE INDEX {}{} ON {} ({});",
            self.index_guard(),
            self.safe_enclose(&self.name_constraint(table, column, ConstraintKind::Index)),
            self.safe_enclose(table),
            self.safe_enclose(column)
        )
    }

    /// Renders the index statement used by [`Self::render_alter`].
    ///
    /// The table already exists there, and so may the index, so the
    /// statement must succeed either way.
    fn alter_index(&self, table: &str, column: &str) -> String {
        self.create_index(table, column)
    }

    /// Renders the named primary key constraint, if the table has keys.
    fn primary_key_constraint(&self, table: &TableDefinition) -> Option<String> {
        if table.primary_keys.is_empty() {
            return None;
        }
        let label = table.primary_keys.join("_");
        let columns: Vec<String> = table
            .primary_keys
            .iter()
            .map(|c| self.safe_enclose(c))
            .collect();
        Some(format!(
            "CONSTRAINT {} PRIMARY KEY ({})",
            self.safe_enclose(&self.name_constraint(&table.name, &label, ConstraintKind::PrimaryKey)),
            columns.join(", ")
        ))
    }

    /// Renders one named unique constraint per unique key column.
    ///
    /// Columns already carrying an inline `UNIQUE` are skipped.
    fn unique_constraints(&self, table: &TableDefinition) -> Vec<String> {
        table
            .unique_keys
            .iter()
            .filter(|name| {
                table
                    .get_column(name)
                    .map_or(true, |c| c.index != IndexMarker::Unique)
            })
            .map(|name| {
                format!(
                    "CONSTRAINT {} UNIQUE ({})",
                    self.safe_enclose(&self.name_constraint(&table.name, name, ConstraintKind::Unique)),
                    self.safe_enclose(name)
                )
            })
            .collect()
    }

    /// Renders a drop-then-create sequence for the whole table.
    ///
    /// The output only depends on `table`, so rendering twice gives the
    /// same text and running it twice gives the same schema. Primary and
    /// unique keys are only ever set here.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Validation`] if the table has no name, no
    /// columns, or a column without name or type.
    fn render_create(&self, table: &TableDefinition) -> Result<String> {
        table.validate_name()?;
        if table.columns.is_empty() {
            return Err(TranslateError::required(&table.name, "columns"));
        }

        let mut definitions = Vec::with_capacity(table.columns.len() + 1);
        for column in &table.columns {
            column.validate(&table.name)?;
            definitions.push(self.column_clauses(column).join(" "));
        }
        definitions.extend(self.primary_key_constraint(table));
        definitions.extend(self.unique_constraints(table));

        let table_name = self.safe_enclose(&table.name);
        let mut statements = vec![
            format!("DROP TABLE IF EXISTS {table_name};"),
            format!(
                "CREATE TABLE IF NOT EXISTS {table_name} (\n    {}\n){};",
                definitions.join(",\n    "),
                self.table_options(table)
            ),
        ];
        statements.extend(table.indexes.iter().map(|c| self.create_index(&table.name, c)));
        Ok(statements.join("\n"))
    }

    /// Renders additive changes for an existing table.
    ///
    /// Only columns that neither exist nor are marked for removal are
    /// added; nothing is dropped or modified. Index statements are
    /// re-emitted for every entry in `indexes`. Returns `Ok(None)` when no
    /// column needs adding.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Validation`] if the table has no name or a
    /// column to be added has no name or type.
    fn render_alter(&self, table: &TableDefinition) -> Result<Option<String>> {
        table.validate_name()?;
        let table_name = self.safe_enclose(&table.name);

        let mut statements = Vec::new();
        for column in &table.columns {
            if column.drop {
                warn!(
                    table = %table.name,
                    column = %column.name,
                    "Dropping columns is not supported, column left in place"
                );
                continue;
            }
            if column.exists {
                debug!(table = %table.name, column = %column.name, "Column exists, skipping");
                continue;
            }
            column.validate(&table.name)?;
            statements.push(format!(
                "ALTER TABLE {table_name} ADD COLUMN {};",
                self.column_clauses(column).join(" ")
            ));
        }

        let changes = statements.len();
        if changes == 0 {
            return Ok(None);
        }
        debug!(table = %table.name, changes, "Rendered column additions");

        statements.extend(table.indexes.iter().map(|c| self.alter_index(&table.name, c)));
        Ok(Some(statements.join("\n")))
    }

    /// Returns the query listing the live columns of `table`.
    fn table_schema_query(&self, table: &str) -> String;

    /// Returns the result column holding the column name in
    /// [`Self::table_schema_query`] rows.
    fn schema_name_field(&self) -> &'static str;

    /// Extracts column names, in order, from schema query rows.
    ///
    /// Rows without a name field are ignored.
    fn normalise_column_names(&self, rows: &[SchemaRow]) -> Vec<String> {
        let field = self.schema_name_field();
        rows.iter().filter_map(|row| row.get(field).cloned()).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::translation::TranslationTable;

    fn users() -> TableDefinition {
        TableDefinition::new("users")
            .column(ColumnDefinition::new("id", "INTEGER").not_null().auto_increment())
            .column(ColumnDefinition::new("email", "VARCHAR").not_null())
            .primary_key(["id"])
            .index("email")
    }

    #[test]
    fn test_every_dialect_is_idempotent() {
        let table = Arc::new(TranslationTable::builtin());
        for vendor in Vendor::ALL {
            let translator = vendor.translator(Arc::clone(&table));
            let first = translator.render_create(&users()).unwrap();
            let second = translator.render_create(&users()).unwrap();
            assert_eq!(first, second, "{vendor}");
            assert!(first.starts_with("DROP TABLE IF EXISTS "), "{vendor}");
        }
    }

    #[test]
    fn test_every_dialect_rejects_empty_type() {
        let table = Arc::new(TranslationTable::builtin());
        let bad = TableDefinition::new("users").column(ColumnDefinition::new("id", ""));
        for vendor in Vendor::ALL {
            let translator = vendor.translator(Arc::clone(&table));
            assert!(translator.render_create(&bad).is_err(), "{vendor}");
            assert!(translator.render_alter(&bad).is_err(), "{vendor}");
            assert!(
                translator.render_column(&ColumnDefinition::new("", "INT")).is_err(),
                "{vendor}"
            );
        }
    }

    #[test]
    fn test_every_dialect_signals_no_changes() {
        let table = Arc::new(TranslationTable::builtin());
        let mut existing = users();
        existing.indexes.clear();
        existing.mark_existing(&["id", "email"]);
        for vendor in Vendor::ALL {
            let translator = vendor.translator(Arc::clone(&table));
            assert_eq!(translator.render_alter(&existing).unwrap(), None, "{vendor}");
        }
    }

    #[test]
    fn test_normalise_column_names_skips_rows_without_name() {
        let translator = SqliteTranslator::new(Arc::new(TranslationTable::new()));
        let rows = vec![
            SchemaRow::from([("name".to_string(), "id".to_string())]),
            SchemaRow::from([("type".to_string(), "TEXT".to_string())]),
            SchemaRow::from([("name".to_string(), "email".to_string())]),
        ];
        assert_eq!(translator.normalise_column_names(&rows), ["id", "email"]);
    }
}
