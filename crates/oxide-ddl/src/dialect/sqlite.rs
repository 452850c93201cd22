//! SQLite dialect.
//!
//! SQLite has no inline auto-increment clause here: an `INTEGER` column
//! that forms the whole primary key becomes an alias of the rowid and is
//! filled in automatically, so auto-increment columns are only declared
//! nullable.

use std::sync::Arc;

use super::DialectTranslator;
use crate::translation::TranslationTable;
use crate::translator::Translator;
use crate::vendor::Vendor;

/// SQLite translator.
#[derive(Debug, Clone)]
pub struct SqliteTranslator {
    translations: Arc<TranslationTable>,
}

impl SqliteTranslator {
    /// Creates a new SQLite translator.
    #[must_use]
    pub const fn new(translations: Arc<TranslationTable>) -> Self {
        Self { translations }
    }
}

impl Translator for SqliteTranslator {
    fn translations(&self) -> &TranslationTable {
        &self.translations
    }
}

impl DialectTranslator for SqliteTranslator {
    fn vendor(&self) -> Vendor {
        Vendor::Sqlite
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn auto_increment_clause(&self) -> Option<&'static str> {
        None
    }

    fn table_schema_query(&self, table: &str) -> String {
        format!("PRAGMA table_info({});", self.safe_enclose(table))
    }

    fn schema_name_field(&self) -> &'static str {
        "name"
    }
}
