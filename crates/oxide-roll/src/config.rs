//! Input files: table definitions and translation tables.

use std::fs;
use std::path::Path;

use oxide_ddl::{TableDefinition, TranslationTable};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, RollError};

/// A definition file holds either one table or a list of tables.
#[derive(Deserialize)]
#[serde(untagged)]
enum TableFile {
    One(TableDefinition),
    Many(Vec<TableDefinition>),
}

/// Reads the table definitions in a JSON file, in file order.
pub fn load_tables(path: &Path) -> Result<Vec<TableDefinition>> {
    let contents = fs::read_to_string(path).map_err(|source| RollError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: TableFile = serde_json::from_str(&contents).map_err(|source| RollError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let tables = match file {
        TableFile::One(table) => vec![table],
        TableFile::Many(tables) => tables,
    };
    debug!(path = %path.display(), tables = tables.len(), "Loaded table definitions");
    Ok(tables)
}

/// Loads a translation file, or the builtin table when no path is given.
pub fn load_translations(path: Option<&Path>) -> Result<TranslationTable> {
    match path {
        Some(path) => Ok(TranslationTable::from_path(path)?),
        None => Ok(TranslationTable::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_json(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_single_table() {
        let file = write_json(
            r#"{"name": "users", "columns": [{"name": "id", "type": "INT"}], "primary_keys": ["id"]}"#,
        );
        let tables = load_tables(file.path()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "users");
        assert_eq!(tables[0].primary_keys, ["id"]);
    }

    #[test]
    fn test_load_table_list() {
        let file = write_json(
            r#"[
                {"name": "users", "columns": [{"name": "id", "type": "INT"}]},
                {"name": "posts", "columns": [{"name": "id", "type": "INT"}]}
            ]"#,
        );
        let names: Vec<String> = load_tables(file.path())
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["users", "posts"]);
    }

    #[test]
    fn test_load_tables_reports_path() {
        let file = write_json(r#"{"columns": []}"#);
        let err = load_tables(file.path()).unwrap_err();
        assert!(matches!(&err, RollError::Parse { path, .. } if path == file.path()));

        let err = load_tables(Path::new("/nonexistent/tables.json")).unwrap_err();
        assert!(matches!(err, RollError::Io { .. }));
    }

    #[test]
    fn test_load_translations() {
        assert!(!load_translations(None).unwrap().is_empty());

        let file = write_json(
            r#"[{"keyword": "MONEY", "vendor": "sqlite", "kind": "type", "replacement": "NUMERIC"}]"#,
        );
        let table = load_translations(Some(file.path())).unwrap();
        assert_eq!(table.len(), 1);
    }
}
