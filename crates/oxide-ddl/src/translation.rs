//! Keyword translation table.
//!
//! Maps an abstract keyword (a portable type name, default-value expression
//! or function name) to the replacement token used by one vendor. The table
//! is built once, then shared read-only between translators.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TranslateError};
use crate::vendor::Vendor;

/// What a translated keyword stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationKind {
    /// A column data type.
    Type,
    /// A built-in function.
    Function,
    /// A default-value expression.
    Default,
}

/// One `(keyword, vendor) -> replacement` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// Abstract keyword.
    pub keyword: String,
    /// Vendor the replacement applies to.
    pub vendor: Vendor,
    /// Kind of keyword.
    pub kind: TranslationKind,
    /// Vendor-specific token.
    pub replacement: String,
}

impl TranslationEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(
        keyword: impl Into<String>,
        vendor: Vendor,
        kind: TranslationKind,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            vendor,
            kind,
            replacement: replacement.into(),
        }
    }
}

/// In-memory translation lookup keyed by `(keyword, vendor)`.
///
/// Keywords are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<(String, Vendor), TranslationEntry>,
}

fn normalise_keyword(keyword: &str) -> String {
    keyword.trim().to_ascii_uppercase()
}

impl TranslationTable {
    /// Creates an empty table. Every lookup misses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from entries, rejecting duplicate keys.
    pub fn from_entries(entries: impl IntoIterator<Item = TranslationEntry>) -> Result<Self> {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry)?;
        }
        Ok(table)
    }

    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::DuplicateTranslation`] if the keyword is
    /// already mapped for the entry's vendor.
    pub fn insert(&mut self, entry: TranslationEntry) -> Result<()> {
        let key = (normalise_keyword(&entry.keyword), entry.vendor);
        if self.entries.contains_key(&key) {
            return Err(TranslateError::DuplicateTranslation {
                keyword: entry.keyword,
                vendor: entry.vendor.to_string(),
            });
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Looks up the entry for a keyword, `None` meaning "use it literally".
    #[must_use]
    pub fn lookup(&self, keyword: &str, vendor: Vendor) -> Option<&TranslationEntry> {
        self.entries.get(&(normalise_keyword(keyword), vendor))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a JSON array of [`TranslationEntry`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<TranslationEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Loads a JSON translation file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_json_str(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), entries = table.len(), "Loaded translation table");
        Ok(table)
    }

    /// The stock translations shipped with the tool.
    #[must_use]
    pub fn builtin() -> Self {
        use TranslationKind::{Default, Function, Type};

        // keyword, kind, sqlite, mysql, postgres
        const BUILTIN: &[(&str, TranslationKind, &str, &str, &str)] = &[
            ("INT", Type, "INTEGER", "INT", "INTEGER"),
            ("INTEGER", Type, "INTEGER", "INT", "INTEGER"),
            ("SMALLINT", Type, "INTEGER", "SMALLINT", "SMALLINT"),
            ("BIGINT", Type, "INTEGER", "BIGINT", "BIGINT"),
            ("STRING", Type, "TEXT", "VARCHAR(255)", "VARCHAR(255)"),
            ("VARCHAR", Type, "TEXT", "VARCHAR(255)", "VARCHAR(255)"),
            ("TEXT", Type, "TEXT", "TEXT", "TEXT"),
            ("BOOLEAN", Type, "INTEGER", "TINYINT(1)", "BOOLEAN"),
            ("BOOL", Type, "INTEGER", "TINYINT(1)", "BOOLEAN"),
            ("DATETIME", Type, "TEXT", "DATETIME", "TIMESTAMP"),
            ("TIMESTAMP", Type, "TEXT", "TIMESTAMP", "TIMESTAMP"),
            ("DATE", Type, "TEXT", "DATE", "DATE"),
            ("TIME", Type, "TEXT", "TIME", "TIME"),
            ("DECIMAL", Type, "NUMERIC", "DECIMAL(19, 4)", "NUMERIC(19, 4)"),
            ("FLOAT", Type, "REAL", "FLOAT", "REAL"),
            ("DOUBLE", Type, "REAL", "DOUBLE", "DOUBLE PRECISION"),
            ("BLOB", Type, "BLOB", "LONGBLOB", "BYTEA"),
            ("UUID", Type, "TEXT", "CHAR(36)", "UUID"),
            ("JSON", Type, "TEXT", "JSON", "JSONB"),
            ("CURRENT_TIMESTAMP", Default, "CURRENT_TIMESTAMP", "CURRENT_TIMESTAMP", "CURRENT_TIMESTAMP"),
            ("CURRENT_DATE", Default, "CURRENT_DATE", "(CURRENT_DATE)", "CURRENT_DATE"),
            ("CURRENT_TIME", Default, "CURRENT_TIME", "(CURRENT_TIME)", "CURRENT_TIME"),
            ("NULL", Default, "NULL", "NULL", "NULL"),
            ("TRUE", Default, "1", "1", "TRUE"),
            ("FALSE", Default, "0", "0", "FALSE"),
            ("NOW", Function, "datetime('now')", "NOW()", "NOW()"),
            ("RANDOM", Function, "random()", "RAND()", "random()"),
            ("GEN_UUID", Function, "lower(hex(randomblob(16)))", "UUID()", "gen_random_uuid()"),
        ];

        let mut table = Self::new();
        for (keyword, kind, sqlite, mysql, postgres) in BUILTIN {
            for (vendor, replacement) in [
                (Vendor::Sqlite, sqlite),
                (Vendor::MySql, mysql),
                (Vendor::Postgres, postgres),
            ] {
                table.entries.insert(
                    (normalise_keyword(keyword), vendor),
                    TranslationEntry::new(*keyword, vendor, *kind, *replacement),
                );
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = TranslationTable::builtin();
        let entry = table.lookup("datetime", Vendor::Postgres).unwrap();
        assert_eq!(entry.replacement, "TIMESTAMP");
        assert_eq!(entry.kind, TranslationKind::Type);
    }

    #[test]
    fn test_lookup_miss() {
        let table = TranslationTable::builtin();
        assert!(table.lookup("GEOMETRY", Vendor::Sqlite).is_none());
        assert!(TranslationTable::new().lookup("INT", Vendor::Sqlite).is_none());
    }

    #[test]
    fn test_builtin_covers_every_vendor() {
        let table = TranslationTable::builtin();
        assert_eq!(table.len() % Vendor::ALL.len(), 0);
        for vendor in Vendor::ALL {
            assert!(table.lookup("STRING", vendor).is_some());
        }
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = TranslationTable::from_entries([
            TranslationEntry::new("INT", Vendor::Sqlite, TranslationKind::Type, "INTEGER"),
            TranslationEntry::new("int", Vendor::Sqlite, TranslationKind::Type, "BIGINT"),
        ]);
        assert!(matches!(
            result,
            Err(TranslateError::DuplicateTranslation { keyword, .. }) if keyword == "int"
        ));
    }

    #[test]
    fn test_same_keyword_for_other_vendor_is_not_duplicate() {
        let table = TranslationTable::from_entries([
            TranslationEntry::new("INT", Vendor::Sqlite, TranslationKind::Type, "INTEGER"),
            TranslationEntry::new("INT", Vendor::MySql, TranslationKind::Type, "INT"),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"keyword": "MONEY", "vendor": "postgres", "kind": "type", "replacement": "NUMERIC(12, 2)"},
            {"keyword": "NOW", "vendor": "sqlite", "kind": "function", "replacement": "datetime('now')"}
        ]"#;
        let table = TranslationTable::from_json_str(json).unwrap();
        assert_eq!(
            table.lookup("money", Vendor::Postgres).unwrap().replacement,
            "NUMERIC(12, 2)"
        );
        assert_eq!(
            table.lookup("NOW", Vendor::Sqlite).unwrap().kind,
            TranslationKind::Function
        );
    }

    #[test]
    fn test_from_json_str_rejects_unknown_kind() {
        let json = r#"[{"keyword": "X", "vendor": "sqlite", "kind": "macro", "replacement": "Y"}]"#;
        assert!(matches!(
            TranslationTable::from_json_str(json),
            Err(TranslateError::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"keyword": "STRING", "vendor": "mysql", "kind": "type", "replacement": "VARCHAR(64)"}}]"#
        )
        .unwrap();

        let table = TranslationTable::from_path(file.path()).unwrap();
        assert_eq!(
            table.lookup("string", Vendor::MySql).unwrap().replacement,
            "VARCHAR(64)"
        );
    }

    #[test]
    fn test_from_missing_path() {
        let result = TranslationTable::from_path("/nonexistent/translations.json");
        assert!(matches!(result, Err(TranslateError::Io(_))));
    }
}
