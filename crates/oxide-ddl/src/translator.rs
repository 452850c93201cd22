//! The translation contract shared by every dialect.

use sha2::{Digest, Sha256};

use crate::schema::ConstraintKind;
use crate::translation::{TranslationKind, TranslationTable};
use crate::vendor::Vendor;

/// Longest identifier emitted by [`Translator::name_constraint`].
///
/// PostgreSQL truncates identifiers at 63 bytes and MySQL rejects names
/// longer than 64.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Hex digits of the digest appended to shortened names.
const DIGEST_SUFFIX_LEN: usize = 8;

/// Keyword translation and constraint naming.
///
/// Implementors only supply the translation table; everything else is
/// shared. When a value might be an abstract keyword, callers must try
/// [`Translator::translate`] first and only fall back to the literal value
/// when it returns `None`.
pub trait Translator: Send + Sync {
    /// Returns the translation table backing this translator.
    fn translations(&self) -> &TranslationTable;

    /// Returns the vendor replacement for an abstract keyword of any kind.
    fn translate(&self, keyword: &str, vendor: Vendor) -> Option<&str> {
        self.translations()
            .lookup(keyword, vendor)
            .map(|entry| entry.replacement.as_str())
    }

    /// Returns the vendor's built-in function name if `keyword` is one.
    fn is_function(&self, keyword: &str, vendor: Vendor) -> Option<&str> {
        self.translations()
            .lookup(keyword, vendor)
            .filter(|entry| entry.kind == TranslationKind::Function)
            .map(|entry| entry.replacement.as_str())
    }

    /// Builds the name of a constraint or index.
    ///
    /// The result is `{prefix}_{table}_{label}` and only depends on its
    /// inputs, so re-rendering a table yields the same names. Tables whose
    /// name contains `_` and names longer than [`MAX_IDENTIFIER_LEN`] get a
    /// digest suffix, since `user` + `profile_id` and `user_profile` + `id`
    /// would otherwise both read `idx_user_profile_id`.
    fn name_constraint(&self, table: &str, label: &str, kind: ConstraintKind) -> String {
        constraint_name(table, label, kind)
    }
}

/// Free-standing form of [`Translator::name_constraint`].
#[must_use]
pub fn constraint_name(table: &str, label: &str, kind: ConstraintKind) -> String {
    let name = format!("{}_{}_{}", kind.prefix(), table, label);
    // Without `_` in the table name, the first `_` after the prefix ends it.
    if !table.contains('_') && name.len() <= MAX_IDENTIFIER_LEN {
        return name;
    }

    let digest = triple_digest(table, label, kind);
    let mut cut = name.len().min(MAX_IDENTIFIER_LEN - DIGEST_SUFFIX_LEN - 1);
    while !name.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}_{}", &name[..cut], &digest[..DIGEST_SUFFIX_LEN])
}

/// Hex SHA-256 over the parts, NUL-separated so no two triples hash the
/// same input.
fn triple_digest(table: &str, label: &str, kind: ConstraintKind) -> String {
    let mut hasher = Sha256::new();
    hasher.update(kind.prefix().as_bytes());
    hasher.update([0u8]);
    hasher.update(table.as_bytes());
    hasher.update([0u8]);
    hasher.update(label.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::translation::TranslationEntry;

    struct TableOnly(TranslationTable);

    impl Translator for TableOnly {
        fn translations(&self) -> &TranslationTable {
            &self.0
        }
    }

    fn translator() -> TableOnly {
        TableOnly(TranslationTable::builtin())
    }

    #[test]
    fn test_translate_hit_and_miss() {
        let t = translator();
        assert_eq!(t.translate("STRING", Vendor::Sqlite), Some("TEXT"));
        assert_eq!(t.translate("STRING", Vendor::MySql), Some("VARCHAR(255)"));
        assert_eq!(t.translate("GEOMETRY", Vendor::Sqlite), None);
    }

    #[test]
    fn test_translate_keeps_empty_replacement_distinct_from_miss() {
        let t = TableOnly(
            TranslationTable::from_entries([TranslationEntry::new(
                "NOTHING",
                Vendor::Sqlite,
                TranslationKind::Default,
                "",
            )])
            .unwrap(),
        );
        assert_eq!(t.translate("NOTHING", Vendor::Sqlite), Some(""));
        assert_eq!(t.translate("NOTHING", Vendor::Postgres), None);
    }

    #[test]
    fn test_is_function() {
        let t = translator();
        assert_eq!(t.is_function("now", Vendor::MySql), Some("NOW()"));
        assert_eq!(t.is_function("NOW", Vendor::Sqlite), Some("datetime('now')"));
        // A known keyword of another kind is not a function.
        assert_eq!(t.is_function("STRING", Vendor::Sqlite), None);
        assert_eq!(t.is_function("no_such_fn", Vendor::Postgres), None);
    }

    #[test]
    fn test_name_constraint_is_stable() {
        let t = translator();
        let first = t.name_constraint("users", "email", ConstraintKind::Index);
        let second = t.name_constraint("users", "email", ConstraintKind::Index);
        assert_eq!(first, "idx_users_email");
        assert_eq!(first, second);
        assert_eq!(
            t.name_constraint("users", "id", ConstraintKind::PrimaryKey),
            "pk_users_id"
        );
    }

    #[test]
    fn test_name_constraint_no_collisions_in_schema() {
        let tables = ["users", "posts", "comments", "user_profiles"];
        let columns = ["id", "email", "user_id", "created_at", "title"];
        let kinds = [
            ConstraintKind::PrimaryKey,
            ConstraintKind::Unique,
            ConstraintKind::Index,
        ];

        let mut seen = HashSet::new();
        for table in tables {
            for column in columns {
                for kind in kinds {
                    assert!(seen.insert(constraint_name(table, column, kind)));
                }
            }
        }
        assert_eq!(seen.len(), tables.len() * columns.len() * kinds.len());
    }

    #[test]
    fn test_name_constraint_underscored_tables_do_not_collide() {
        let a = constraint_name("user", "profile_id", ConstraintKind::Index);
        let b = constraint_name("user_profile", "id", ConstraintKind::Index);

        assert_eq!(a, "idx_user_profile_id");
        assert_ne!(a, b);
        assert!(b.starts_with("idx_user_profile_id_"));
        assert_eq!(b.len(), "idx_user_profile_id_".len() + DIGEST_SUFFIX_LEN);
        assert_eq!(b, constraint_name("user_profile", "id", ConstraintKind::Index));

        // Same readable text, split differently, across two underscored tables.
        assert_ne!(
            constraint_name("a_b", "c_d", ConstraintKind::Unique),
            constraint_name("a_b_c", "d", ConstraintKind::Unique)
        );
    }

    #[test]
    fn test_long_names_are_shortened_deterministically() {
        let table = "customer_subscription_billing_history_entries";
        let a = constraint_name(table, "payment_provider_reference", ConstraintKind::Index);
        let b = constraint_name(table, "payment_provider_reference_v2", ConstraintKind::Index);

        assert!(a.len() <= MAX_IDENTIFIER_LEN);
        assert!(b.len() <= MAX_IDENTIFIER_LEN);
        assert_ne!(a, b);
        assert_eq!(
            a,
            constraint_name(table, "payment_provider_reference", ConstraintKind::Index)
        );
        assert!(a.starts_with("idx_customer_subscription"));
    }

    #[test]
    fn test_long_names_respect_char_boundaries() {
        let table = "ñandú_überlänge_tabelle_".repeat(3);
        let name = constraint_name(&table, "spalte_ümlaut_ß", ConstraintKind::Unique);
        assert!(name.len() <= MAX_IDENTIFIER_LEN);
        assert!(name.starts_with("uq_ñandú"));
    }
}
