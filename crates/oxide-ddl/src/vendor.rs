//! Supported database vendors.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dialect::{DialectTranslator, MySqlTranslator, PostgresTranslator, SqliteTranslator};
use crate::error::TranslateError;
use crate::translation::TranslationTable;

/// A target database dialect.
///
/// Every translation lookup takes the vendor explicitly; there is no
/// implicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// SQLite 3.
    Sqlite,
    /// MySQL 8 (and compatible servers).
    #[serde(rename = "mysql")]
    MySql,
    /// PostgreSQL.
    #[serde(alias = "postgresql")]
    Postgres,
}

impl Vendor {
    /// All supported vendors.
    pub const ALL: [Self; 3] = [Self::Sqlite, Self::MySql, Self::Postgres];

    /// Returns the lowercase vendor name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
        }
    }

    /// Returns the dialect translator for this vendor.
    #[must_use]
    pub fn translator(self, translations: Arc<TranslationTable>) -> Box<dyn DialectTranslator> {
        match self {
            Self::Sqlite => Box::new(SqliteTranslator::new(translations)),
            Self::MySql => Box::new(MySqlTranslator::new(translations)),
            Self::Postgres => Box::new(PostgresTranslator::new(translations)),
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Vendor {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "mysql" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(TranslateError::UnknownVendor(s.to_string())),
        }
    }
}
