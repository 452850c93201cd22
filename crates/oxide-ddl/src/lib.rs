//! # oxide-ddl
//!
//! Dialect-aware DDL generation for additive schema rollout.
//!
//! Given a vendor-neutral [`TableDefinition`], a [`DialectTranslator`]
//! renders:
//! - an idempotent drop-then-create sequence ([`DialectTranslator::render_create`])
//! - additive `ALTER TABLE ... ADD COLUMN` statements for columns that are
//!   not yet in the database ([`DialectTranslator::render_alter`])
//! - single-row `INSERT` templates ([`DialectTranslator::render_insert`])
//!
//! Abstract keywords (types such as `STRING`, defaults such as
//! `CURRENT_TIMESTAMP`) are resolved through a [`TranslationTable`]; a
//! keyword with no entry is used as written.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_ddl::prelude::*;
//!
//! let translator = Vendor::Sqlite.translator(Arc::new(TranslationTable::builtin()));
//!
//! let users = TableDefinition::new("users")
//!     .column(ColumnDefinition::new("id", "INT").not_null().auto_increment())
//!     .column(ColumnDefinition::new("email", "STRING").not_null())
//!     .primary_key(["id"])
//!     .index("email");
//!
//! let sql = translator.render_create(&users).unwrap();
//! assert!(sql.contains("CONSTRAINT \"pk_users_id\" PRIMARY KEY (\"id\")"));
//! ```
//!
//! Nothing here talks to a database. Which columns already exist is the
//! caller's input (see [`ColumnDefinition::exists`]), and the rendered
//! text is returned for the caller to run.

pub mod dialect;
pub mod error;
pub mod schema;
pub mod translation;
pub mod translator;
pub mod vendor;

pub use dialect::{DialectTranslator, MySqlTranslator, PostgresTranslator, SchemaRow, SqliteTranslator};
pub use error::{Result, TranslateError};
pub use schema::{ColumnDefinition, ConstraintKind, IndexMarker, TableDefinition};
pub use translation::{TranslationEntry, TranslationKind, TranslationTable};
pub use translator::Translator;
pub use vendor::Vendor;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dialect::{
        DialectTranslator, MySqlTranslator, PostgresTranslator, SchemaRow, SqliteTranslator,
    };
    pub use crate::error::{Result, TranslateError};
    pub use crate::schema::{ColumnDefinition, ConstraintKind, IndexMarker, TableDefinition};
    pub use crate::translation::{TranslationEntry, TranslationKind, TranslationTable};
    pub use crate::translator::Translator;
    pub use crate::vendor::Vendor;
}
