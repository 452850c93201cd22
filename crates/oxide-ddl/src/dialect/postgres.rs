//! PostgreSQL dialect.

use std::sync::Arc;

use super::DialectTranslator;
use crate::schema::ColumnDefinition;
use crate::translation::TranslationTable;
use crate::translator::Translator;
use crate::vendor::Vendor;

/// PostgreSQL translator.
///
/// Auto-increment columns become identity columns, which PostgreSQL
/// requires to be `NOT NULL`.
#[derive(Debug, Clone)]
pub struct PostgresTranslator {
    translations: Arc<TranslationTable>,
}

impl PostgresTranslator {
    /// Creates a new PostgreSQL translator.
    #[must_use]
    pub const fn new(translations: Arc<TranslationTable>) -> Self {
        Self { translations }
    }
}

impl Translator for PostgresTranslator {
    fn translations(&self) -> &TranslationTable {
        &self.translations
    }
}

impl DialectTranslator for PostgresTranslator {
    fn vendor(&self) -> Vendor {
        Vendor::Postgres
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn auto_increment_clause(&self) -> Option<&'static str> {
        Some("GENERATED BY DEFAULT AS IDENTITY")
    }

    fn allows_null(&self, column: &ColumnDefinition) -> bool {
        column.allow_null && !column.auto_increment
    }

    fn table_schema_query(&self, table: &str) -> String {
        format!(
            "SELECT column_name FROM information_schema.columns \
             WHERE table_schema = current_schema() AND table_name = {} \
             ORDER BY ordinal_position;",
            self.quote_literal(table)
        )
    }

    fn schema_name_field(&self) -> &'static str {
        "column_name"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableDefinition;

    fn translator() -> PostgresTranslator {
        PostgresTranslator::new(Arc::new(TranslationTable::builtin()))
    }

    #[test]
    fn test_render_column_identity() {
        let col = ColumnDefinition::new("id", "BIGINT").auto_increment();
        assert_eq!(
            translator().render_column(&col).unwrap(),
            "\"id\" BIGINT GENERATED BY DEFAULT AS IDENTITY NOT NULL"
        );
    }

    #[test]
    fn test_render_column_types_and_defaults() {
        let t = translator();
        let col = ColumnDefinition::new("payload", "JSON").not_null().default("{}");
        assert_eq!(
            t.render_column(&col).unwrap(),
            "\"payload\" JSONB NOT NULL DEFAULT '{}'"
        );

        let col = ColumnDefinition::new("seen_at", "TIMESTAMP").default("NULL");
        assert_eq!(
            t.render_column(&col).unwrap(),
            "\"seen_at\" TIMESTAMP NULL DEFAULT NULL"
        );
    }

    #[test]
    fn test_render_create() {
        let table = TableDefinition::new("users")
            .column(ColumnDefinition::new("id", "INTEGER").not_null().auto_increment())
            .column(ColumnDefinition::new("email", "VARCHAR").not_null())
            .primary_key(["id"])
            .index("email");

        let sql = translator().render_create(&table).unwrap();
        assert_eq!(
            sql,
            "DROP TABLE IF EXISTS \"users\";\n\
             CREATE TABLE IF NOT EXISTS \"users\" (\n    \
             \"id\" INTEGER GENERATED BY DEFAULT AS IDENTITY NOT NULL,\n    \
             \"email\" VARCHAR(255) NOT NULL,\n    \
             CONSTRAINT \"pk_users_id\" PRIMARY KEY (\"id\")\n\
             );\n\
             CREATE INDEX IF NOT EXISTS \"idx_users_email\" ON \"users\" (\"email\");"
        );
    }

    #[test]
    fn test_table_schema_query_escapes_name() {
        let sql = translator().table_schema_query("o'brien");
        assert!(sql.contains("table_name = 'o''brien'"));
        assert!(sql.ends_with("ORDER BY ordinal_position;"));
    }
}
