//! Additive schema rollout for SQLite.
//!
//! `oxide-roll` drives [`oxide_ddl`] against a live database:
//!
//! - **Config** - Reads table definitions and translation tables from JSON
//! - **Roller** - Introspects each table, marks existing columns, then
//!   creates the table or adds the missing columns
//!
//! Existing columns are never dropped or redefined.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use oxide_roll::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let pool = SqlitePoolOptions::new().connect("sqlite:app.db").await?;
//! let roller = Roller::new(pool, Arc::new(TranslationTable::builtin()));
//!
//! let users = TableDefinition::new("users")
//!     .column(ColumnDefinition::new("id", "INT").auto_increment())
//!     .column(ColumnDefinition::new("email", "STRING").not_null())
//!     .primary_key(["id"]);
//!
//! match roller.roll(&users).await? {
//!     RollPlan::Create { .. } => println!("created"),
//!     RollPlan::Alter { added, .. } => println!("added {added} columns"),
//!     RollPlan::Unchanged => println!("up to date"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Print the creation SQL for MySQL
//! oxide-roll --dialect mysql create tables.json
//!
//! # Print additive SQL given the columns that already exist
//! oxide-roll alter tables.json --existing id,email
//!
//! # Apply to a SQLite database
//! oxide-roll roll tables.json --database sqlite:app.db
//! ```

pub mod config;
pub mod error;
pub mod roller;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{load_tables, load_translations};
    pub use crate::error::{Result, RollError};
    pub use crate::roller::{RollPlan, Roller};
    pub use oxide_ddl::prelude::{ColumnDefinition, TableDefinition, TranslationTable, Vendor};
    pub use sqlx::sqlite::SqlitePoolOptions;
}
