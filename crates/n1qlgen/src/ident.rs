//! Field-name escaping.
//!
//! N1QL delimits identifiers with backticks. [`escape_field`] quotes a name
//! only when it has to: when it is not a plain identifier
//! (`[A-Za-z_][A-Za-z0-9_]*`) or when it collides with a reserved word.
//! Already-quoted names, `*`, dotted paths and function calls pass through.
//!
//! # Example
//! ```
//! use n1qlgen::ident::escape_field;
//!
//! assert_eq!(escape_field("status"), "status");
//! assert_eq!(escape_field("value"), "`value`");
//! assert_eq!(escape_field("first name"), "`first name`");
//! assert_eq!(escape_field("address.city"), "address.city");
//! ```

use std::sync::OnceLock;

/// Identifier delimiter.
pub const DELIMITER: char = '`';

/// Words that must be quoted when used as field names (compared case-insensitively).
pub const RESERVED_WORDS: &[&str] = &[
    // statements and clauses
    "select", "from", "where", "order", "by", "group", "having", "limit", "offset", "insert",
    "upsert", "update", "delete", "set", "into", "values", "returning", "distinct", "as", "asc",
    "desc", "key", "value", "type",
    // logical and comparison operators
    "and", "or", "not", "in", "like", "between", "is",
    // collection predicates
    "any", "satisfies", "end",
    // literals
    "null", "missing", "true", "false",
];

/// Returns `true` if `name` is a reserved word in any letter case.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(name))
}

/// Returns `true` if `name` is a plain identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_plain_identifier(name: &str) -> bool {
    static IDENT_RE: OnceLock<regex::Regex> = OnceLock::new();
    IDENT_RE
        .get_or_init(|| {
            regex::Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("invalid built-in identifier regex")
        })
        .is_match(name)
}

/// Wrap `name` in delimiters unconditionally.
pub fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push(DELIMITER);
    out.push_str(name);
    out.push(DELIMITER);
    out
}

/// Escape a field name for use in any clause.
///
/// The input is trimmed first. Blank input renders as an empty string.
pub fn escape_field(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() || passes_through(name) {
        return name.to_string();
    }
    if needs_quoting(name) {
        return quote(name);
    }
    name.to_string()
}

/// Escape each non-blank field and join with `, `.
pub fn escape_field_list<'a>(fields: impl IntoIterator<Item = &'a String>) -> String {
    fields
        .into_iter()
        .filter(|f| !f.trim().is_empty())
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(", ")
}

fn passes_through(name: &str) -> bool {
    name.starts_with(DELIMITER)
        || name == "*"
        || name.contains('.')
        || (name.contains('(') && name.contains(')'))
}

fn needs_quoting(name: &str) -> bool {
    !is_plain_identifier(name) || is_reserved(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_identifiers_unchanged() {
        assert_eq!(escape_field("status"), "status");
        assert_eq!(escape_field("_id"), "_id");
        assert_eq!(escape_field("created_at2"), "created_at2");
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(escape_field("  status "), "status");
        assert_eq!(escape_field(" key "), "`key`");
    }

    #[test]
    fn reserved_words_quoted_any_case() {
        assert_eq!(escape_field("select"), "`select`");
        assert_eq!(escape_field("WHERE"), "`WHERE`");
        assert_eq!(escape_field("Key"), "`Key`");
        assert_eq!(escape_field("Value"), "`Value`");
    }

    #[test]
    fn special_characters_quoted() {
        assert_eq!(escape_field("first-name"), "`first-name`");
        assert_eq!(escape_field("1st"), "`1st`");
        assert_eq!(escape_field("a b"), "`a b`");
    }

    #[test]
    fn pass_through_forms() {
        assert_eq!(escape_field("`already quoted`"), "`already quoted`");
        assert_eq!(escape_field("*"), "*");
        assert_eq!(escape_field("address.city"), "address.city");
        assert_eq!(escape_field("META().id"), "META().id");
        assert_eq!(escape_field("LOWER(name)"), "LOWER(name)");
    }

    #[test]
    fn blank_is_empty() {
        assert_eq!(escape_field("   "), "");
    }

    #[test]
    fn field_list_skips_blanks() {
        let fields = vec!["id".to_string(), " ".to_string(), "type".to_string()];
        assert_eq!(escape_field_list(&fields), "id, `type`");
    }

    proptest! {
        #[test]
        fn non_reserved_identifiers_are_identity(name in "[a-zA-Z_][a-zA-Z0-9_]{0,20}") {
            prop_assume!(!is_reserved(&name));
            prop_assert_eq!(escape_field(&name), name);
        }

        #[test]
        fn reserved_words_always_quoted(
            idx in 0..RESERVED_WORDS.len(),
            upper in proptest::collection::vec(any::<bool>(), 16),
        ) {
            let word: String = RESERVED_WORDS[idx]
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(escape_field(&word), format!("`{word}`"));
        }
    }
}
