//! Literal inference for user-typed values.
//!
//! A value typed into a form is a raw string. [`format_value`] guesses its
//! literal shape and renders it: numbers, booleans and `NULL` pass through,
//! embedded JSON and function calls are left untouched, and everything else
//! becomes a double-quoted, escaped string.

use std::sync::OnceLock;

/// NULL literal.
pub const NULL: &str = "NULL";

fn is_numeric(value: &str) -> bool {
    static NUMBER_RE: OnceLock<regex::Regex> = OnceLock::new();
    NUMBER_RE
        .get_or_init(|| regex::Regex::new(r"^-?\d+(\.\d+)?$").expect("invalid built-in number regex"))
        .is_match(value)
}

fn is_embedded_json(value: &str) -> bool {
    (value.starts_with('{') && value.ends_with('}')) || (value.starts_with('[') && value.ends_with(']'))
}

fn is_expression(value: &str) -> bool {
    value.contains('(') && value.contains(')')
}

/// Render a raw value as a literal.
///
/// Checks run in order; the first match wins:
/// 1. blank → `NULL`
/// 2. `-?\d+(\.\d+)?` → unchanged
/// 3. `true`/`false` (any case) → lower-cased
/// 4. `null` (any case) → `NULL`
/// 5. `{...}` or `[...]` → unchanged
/// 6. contains `(` and `)` → unchanged
/// 7. otherwise a quoted string, see [`quote_string`]
pub fn format_value(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return NULL.to_string();
    }
    if is_numeric(value) {
        return value.to_string();
    }
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        return value.to_ascii_lowercase();
    }
    if value.eq_ignore_ascii_case("null") {
        return NULL.to_string();
    }
    if is_embedded_json(value) || is_expression(value) {
        return value.to_string();
    }
    quote_string(value)
}

/// Render a comma-separated list as an array literal.
///
/// Input that is already bracketed is returned verbatim (trimmed). Blank input
/// becomes `[]`.
pub fn format_in_list(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return "[]".to_string();
    }
    if value.starts_with('[') && value.ends_with(']') {
        return value.to_string();
    }

    let items: Vec<String> = value.split(',').map(format_value).collect();
    format!("[{}]", items.join(", "))
}

/// Escape string content for a double-quoted literal.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Escape and wrap in double quotes.
pub fn quote_string(value: &str) -> String {
    format!("\"{}\"", escape_string(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numbers_unchanged() {
        assert_eq!(format_value("42"), "42");
        assert_eq!(format_value("-7"), "-7");
        assert_eq!(format_value("3.14"), "3.14");
        assert_eq!(format_value(" 10 "), "10");
    }

    #[test]
    fn almost_numbers_are_strings() {
        assert_eq!(format_value("1."), "\"1.\"");
        assert_eq!(format_value("1e5"), "\"1e5\"");
        assert_eq!(format_value("+1"), "\"+1\"");
    }

    #[test]
    fn booleans_lowercased() {
        assert_eq!(format_value("TRUE"), "true");
        assert_eq!(format_value("False"), "false");
    }

    #[test]
    fn null_and_blank() {
        assert_eq!(format_value(""), "NULL");
        assert_eq!(format_value("   "), "NULL");
        assert_eq!(format_value("null"), "NULL");
        assert_eq!(format_value("NuLl"), "NULL");
    }

    #[test]
    fn json_and_expressions_unchanged() {
        assert_eq!(format_value(r#"{"a":1}"#), r#"{"a":1}"#);
        assert_eq!(format_value("[1, 2]"), "[1, 2]");
        assert_eq!(format_value("NOW_STR()"), "NOW_STR()");
        assert_eq!(format_value("LOWER(name)"), "LOWER(name)");
    }

    #[test]
    fn strings_quoted_and_escaped() {
        assert_eq!(format_value("hello"), "\"hello\"");
        assert_eq!(format_value(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(format_value("a\\b"), r#""a\\b""#);
        assert_eq!(format_value("line1\nline2\tend"), r#""line1\nline2\tend""#);
        assert_eq!(escape_string("a\rb"), "a\\rb");
    }

    #[test]
    fn in_list_from_csv() {
        assert_eq!(format_in_list("a, b, 3"), r#"["a", "b", 3]"#);
        assert_eq!(format_in_list("true,NULL"), "[true, NULL]");
    }

    #[test]
    fn in_list_bracketed_verbatim() {
        assert_eq!(format_in_list(" [1,2,3] "), "[1,2,3]");
    }

    #[test]
    fn in_list_blank() {
        assert_eq!(format_in_list(""), "[]");
        assert_eq!(format_in_list("  "), "[]");
    }

    proptest! {
        #[test]
        fn numeric_literals_idempotent(n in any::<i64>(), frac in proptest::option::of(0u32..100000)) {
            let raw = match frac {
                Some(f) => format!("{n}.{f}"),
                None => n.to_string(),
            };
            let once = format_value(&raw);
            prop_assert_eq!(&once, &raw);
            prop_assert_eq!(format_value(&once), once);
        }

        #[test]
        fn keyword_literals_idempotent(raw in "[tT][rR][uU][eE]|[fF][aA][lL][sS][eE]|[nN][uU][lL][lL]") {
            let once = format_value(&raw);
            prop_assert_eq!(format_value(&once), once);
        }
    }
}
