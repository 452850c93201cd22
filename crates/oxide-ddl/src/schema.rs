//! Vendor-neutral table descriptions.
//!
//! These are transient value objects built by the caller for each render
//! call. The `exists` and `drop` flags on a column are decided outside this
//! crate (by schema introspection or a diff step) and trusted as given.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslateError};

/// Per-column index marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMarker {
    /// No index.
    #[default]
    None,
    /// Inline `UNIQUE` constraint.
    Unique,
    /// Primary key member. Primary keys are taken from
    /// [`TableDefinition::primary_keys`]; this marker is informational.
    Primary,
    /// Plain index. Indexes are taken from [`TableDefinition::indexes`];
    /// this marker is informational.
    Index,
}

/// Kind of named schema object, used for constraint naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Primary key constraint.
    PrimaryKey,
    /// Unique constraint.
    Unique,
    /// Single-column index.
    Index,
}

impl ConstraintKind {
    /// Returns the name prefix for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::PrimaryKey => "pk",
            Self::Unique => "uq",
            Self::Index => "idx",
        }
    }
}

const fn default_allow_null() -> bool {
    true
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Abstract type keyword or a vendor-native type.
    #[serde(rename = "type")]
    pub sql_type: String,
    /// Index marker.
    #[serde(default)]
    pub index: IndexMarker,
    /// Whether the column accepts NULL.
    #[serde(default = "default_allow_null")]
    pub allow_null: bool,
    /// Whether the column auto-increments.
    #[serde(default)]
    pub auto_increment: bool,
    /// Default value: a literal or an abstract keyword.
    #[serde(default)]
    pub default: Option<String>,
    /// Column is already present in the live schema.
    #[serde(default)]
    pub exists: bool,
    /// Column is marked for removal.
    #[serde(default)]
    pub drop: bool,
}

impl ColumnDefinition {
    /// Creates a new nullable column.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            index: IndexMarker::None,
            allow_null: true,
            auto_increment: false,
            default: None,
            exists: false,
            drop: false,
        }
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.allow_null = false;
        self
    }

    /// Sets the column as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Sets the column to auto-increment.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Marks the column with an inline UNIQUE constraint.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.index = IndexMarker::Unique;
        self
    }

    /// Sets the index marker.
    #[must_use]
    pub fn index(mut self, marker: IndexMarker) -> Self {
        self.index = marker;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the column as already present in the database.
    #[must_use]
    pub fn existing(mut self) -> Self {
        self.exists = true;
        self
    }

    /// Marks the column for removal.
    #[must_use]
    pub fn dropped(mut self) -> Self {
        self.drop = true;
        self
    }

    /// Returns the default value if it is set and non-empty.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref().filter(|value| !value.is_empty())
    }

    /// Checks that `name` and `sql_type` are set.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Validation`] naming the first empty field.
    pub fn validate(&self, table: &str) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TranslateError::required(table, "name"));
        }
        if self.sql_type.trim().is_empty() {
            return Err(TranslateError::Validation {
                table: table.to_string(),
                field: "type",
                message: format!("is required (column '{}')", self.name),
            });
        }
        Ok(())
    }
}

/// A table to create or alter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name.
    pub name: String,
    /// Columns, in output order.
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    /// Primary key columns, in key order. Applied at creation only.
    #[serde(default)]
    pub primary_keys: Vec<String>,
    /// Columns that each get a unique constraint. Applied at creation only.
    #[serde(default)]
    pub unique_keys: Vec<String>,
    /// Columns that each get a single-column index.
    #[serde(default)]
    pub indexes: Vec<String>,
    /// Dialect-specific table options.
    #[serde(default)]
    pub vendor_args: BTreeMap<String, String>,
}

impl TableDefinition {
    /// Creates an empty table definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_keys: Vec::new(),
            unique_keys: Vec::new(),
            indexes: Vec::new(),
            vendor_args: BTreeMap::new(),
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the primary key columns.
    #[must_use]
    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_keys = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a unique key column.
    #[must_use]
    pub fn unique_key(mut self, column: impl Into<String>) -> Self {
        self.unique_keys.push(column.into());
        self
    }

    /// Adds an index column.
    #[must_use]
    pub fn index(mut self, column: impl Into<String>) -> Self {
        self.indexes.push(column.into());
        self
    }

    /// Sets a vendor-specific option.
    #[must_use]
    pub fn vendor_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vendor_args.insert(key.into(), value.into());
        self
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Gets a mutable column by name.
    #[must_use]
    pub fn get_column_mut(&mut self, name: &str) -> Option<&mut ColumnDefinition> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Returns column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Sets `exists` on every column whose name appears in `existing`.
    ///
    /// Returns how many columns were marked.
    pub fn mark_existing<S: AsRef<str>>(&mut self, existing: &[S]) -> usize {
        let mut marked = 0;
        for column in &mut self.columns {
            if existing.iter().any(|name| name.as_ref() == column.name) {
                column.exists = true;
                marked += 1;
            }
        }
        marked
    }

    /// Key or index columns that are not declared in `columns`.
    ///
    /// Rendering does not check this; callers that want the guarantee
    /// should call it first.
    #[must_use]
    pub fn unknown_key_columns(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = Vec::new();
        for name in self
            .primary_keys
            .iter()
            .chain(&self.unique_keys)
            .chain(&self.indexes)
        {
            if self.get_column(name).is_none() && !unknown.contains(&name.as_str()) {
                unknown.push(name);
            }
        }
        unknown
    }

    pub(crate) fn validate_name(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TranslateError::required("", "table name"));
        }
        Ok(())
    }
}
