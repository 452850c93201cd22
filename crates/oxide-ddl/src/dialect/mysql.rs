//! MySQL dialect.
//!
//! MySQL wants column attributes in a fixed order
//! (`NULL`, `DEFAULT`, `AUTO_INCREMENT`, `UNIQUE`) and rejects nullable
//! primary key columns, so auto-increment columns are always `NOT NULL`.
//! `CREATE INDEX` has no `IF NOT EXISTS` form in MySQL, so indexes re-emitted
//! by an alter check `information_schema.statistics` first and run through a
//! prepared statement.

use std::sync::Arc;

use super::DialectTranslator;
use crate::schema::{ColumnDefinition, ConstraintKind, IndexMarker, TableDefinition};
use crate::translation::TranslationTable;
use crate::translator::Translator;
use crate::vendor::Vendor;

/// `vendor_args` keys understood as table options, with their SQL form.
const TABLE_OPTIONS: &[(&str, &str)] = &[
    ("engine", "ENGINE"),
    ("charset", "DEFAULT CHARSET"),
    ("collate", "COLLATE"),
];

/// MySQL translator.
#[derive(Debug, Clone)]
pub struct MySqlTranslator {
    translations: Arc<TranslationTable>,
}

impl MySqlTranslator {
    /// Creates a new MySQL translator.
    #[must_use]
    pub const fn new(translations: Arc<TranslationTable>) -> Self {
        Self { translations }
    }
}

impl Translator for MySqlTranslator {
    fn translations(&self) -> &TranslationTable {
        &self.translations
    }
}

impl DialectTranslator for MySqlTranslator {
    fn vendor(&self) -> Vendor {
        Vendor::MySql
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn quote_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn auto_increment_clause(&self) -> Option<&'static str> {
        Some("AUTO_INCREMENT")
    }

    fn allows_null(&self, column: &ColumnDefinition) -> bool {
        column.allow_null && !column.auto_increment
    }

    fn column_clauses(&self, column: &ColumnDefinition) -> Vec<String> {
        let mut parts = vec![
            self.safe_enclose(&column.name),
            self.resolve_type(column),
            self.null_clause(column).to_string(),
        ];
        if let Some(default) = self.default_clause(column) {
            parts.push(default);
        }
        if column.auto_increment {
            parts.extend(self.auto_increment_clause().map(str::to_string));
        }
        if column.index == IndexMarker::Unique {
            parts.push("UNIQUE".to_string());
        }
        parts
    }

    fn table_options(&self, table: &TableDefinition) -> String {
        TABLE_OPTIONS
            .iter()
            .filter_map(|(key, clause)| {
                table
                    .vendor_args
                    .get(*key)
                    .map(|value| format!(" {clause}={value}"))
            })
            .collect()
    }

    fn index_guard(&self) -> &'static str {
        ""
    }

    fn alter_index(&self, table: &str, column: &str) -> String {
        let name = self.name_constraint(table, column, ConstraintKind::Index);
        let create = self.create_index(table, column);
        format!(
            "SET @ddl = IF((SELECT COUNT(*) FROM information_schema.statistics \
             WHERE table_schema = DATABASE() AND table_name = {} AND index_name = {}) = 0, {}, 'DO 0');\n\
             PREPARE ddl FROM @ddl;\n\
             EXECUTE ddl;\n\
             DEALLOCATE PREPARE ddl;",
            self.quote_literal(table),
            self.quote_literal(&name),
            self.quote_literal(create.trim_end_matches(';'))
        )
    }

    fn table_schema_query(&self, table: &str) -> String {
        format!("SHOW COLUMNS FROM {};", self.safe_enclose(table))
    }

    fn schema_name_field(&self) -> &'static str {
        "Field"
    }
}
