//! Clause renderers shared by the per-operation assemblers.
//!
//! Each function returns `None` (or an empty list) when the clause has no
//! valid entries, so callers never emit bare keywords.

use crate::condition::join_conditions;
use crate::ident::{escape_field, escape_field_list};
use crate::model::{OrderByClause, QueryModel, SetClause, WhereCondition};
use crate::value::format_value;

fn non_blank(fields: &[String]) -> impl Iterator<Item = &String> {
    fields.iter().filter(|f| !f.trim().is_empty())
}

#[cfg(feature = "tracing")]
fn trace_dropped(kind: &'static str, total: usize, kept: usize) {
    if kept < total {
        tracing::trace!(
            target: "n1qlgen.query",
            clause = kind,
            dropped = total - kept,
            "skipping invalid entries"
        );
    }
}

/// `WHERE c1 AND c2 ...`
pub fn where_clause(conditions: &[WhereCondition]) -> Option<String> {
    join_conditions(conditions).map(|joined| format!("WHERE {joined}"))
}

/// `HAVING c1 AND c2 ...`
pub fn having_clause(conditions: &[WhereCondition]) -> Option<String> {
    join_conditions(conditions).map(|joined| format!("HAVING {joined}"))
}

/// `GROUP BY f1, f2`
pub fn group_by_clause(fields: &[String]) -> Option<String> {
    let list = escape_field_list(non_blank(fields));
    (!list.is_empty()).then(|| format!("GROUP BY {list}"))
}

/// `ORDER BY f1 ASC, f2 DESC`
pub fn order_by_clause(clauses: &[OrderByClause]) -> Option<String> {
    let parts: Vec<String> = clauses
        .iter()
        .filter(|c| c.is_valid())
        .map(|c| format!("{} {}", escape_field(&c.field), c.sort_order.sql()))
        .collect();

    #[cfg(feature = "tracing")]
    trace_dropped("ORDER BY", clauses.len(), parts.len());

    (!parts.is_empty()).then(|| format!("ORDER BY {}", parts.join(", ")))
}

/// LIMIT/OFFSET clauses.
///
/// Only positive values are emitted. With both present they share one clause
/// (`LIMIT n OFFSET m`); a lone OFFSET takes its own clause position.
pub fn limit_offset_clauses(limit: Option<u64>, offset: Option<u64>) -> Vec<String> {
    let limit = limit.filter(|n| *n > 0);
    let offset = offset.filter(|n| *n > 0);
    match (limit, offset) {
        (Some(l), Some(o)) => vec![format!("LIMIT {l} OFFSET {o}")],
        (Some(l), None) => vec![format!("LIMIT {l}")],
        (None, Some(o)) => vec![format!("OFFSET {o}")],
        (None, None) => Vec::new(),
    }
}

/// `SET f1 = v1, f2 = v2`
///
/// Literal values go through [`format_value`]; expression values are copied
/// verbatim.
pub fn set_clause(clauses: &[SetClause]) -> Option<String> {
    let parts: Vec<String> = clauses
        .iter()
        .filter(|c| c.is_valid())
        .map(|c| {
            let value = if c.is_expression {
                c.value.clone()
            } else {
                format_value(&c.value)
            };
            format!("{} = {value}", escape_field(&c.field))
        })
        .collect();

    #[cfg(feature = "tracing")]
    trace_dropped("SET", clauses.len(), parts.len());

    (!parts.is_empty()).then(|| format!("SET {}", parts.join(", ")))
}

/// `RETURNING *` or `RETURNING f1, f2`.
pub fn returning_clause(model: &QueryModel) -> Option<String> {
    if model.returning_all {
        return Some("RETURNING *".to_string());
    }
    let list = escape_field_list(non_blank(&model.returning_fields));
    (!list.is_empty()).then(|| format!("RETURNING {list}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WhereOperator;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn where_omitted_when_nothing_valid() {
        let conditions = vec![WhereCondition::new("", WhereOperator::Equals, "1")];
        assert_eq!(where_clause(&conditions), None);
        assert_eq!(where_clause(&[]), None);
    }

    #[test]
    fn group_by_escapes_and_skips_blanks() {
        assert_eq!(
            group_by_clause(&strings(&["status", "", "type"])).unwrap(),
            "GROUP BY status, `type`"
        );
        assert_eq!(group_by_clause(&strings(&["  "])), None);
    }

    #[test]
    fn order_by_skips_blank_fields() {
        let clauses = vec![
            OrderByClause::desc("created_at"),
            OrderByClause::asc(""),
            OrderByClause::asc("name"),
        ];
        assert_eq!(
            order_by_clause(&clauses).unwrap(),
            "ORDER BY created_at DESC, name ASC"
        );
        assert_eq!(order_by_clause(&[OrderByClause::asc(" ")]), None);
    }

    #[test]
    fn limit_offset_combinations() {
        assert_eq!(limit_offset_clauses(Some(10), Some(20)), vec!["LIMIT 10 OFFSET 20"]);
        assert_eq!(limit_offset_clauses(Some(10), None), vec!["LIMIT 10"]);
        assert_eq!(limit_offset_clauses(None, Some(5)), vec!["OFFSET 5"]);
        assert_eq!(limit_offset_clauses(Some(0), Some(5)), vec!["OFFSET 5"]);
        assert_eq!(limit_offset_clauses(Some(7), Some(0)), vec!["LIMIT 7"]);
        assert!(limit_offset_clauses(None, None).is_empty());
    }

    #[test]
    fn set_literal_and_expression() {
        let clauses = vec![
            SetClause::literal("status", "active"),
            SetClause::expression("updated_at", "NOW_STR()"),
            SetClause::literal("count", "3"),
            SetClause::literal("", "x"),
            SetClause::literal("note", " "),
        ];
        assert_eq!(
            set_clause(&clauses).unwrap(),
            "SET status = \"active\", updated_at = NOW_STR(), count = 3"
        );
    }

    #[test]
    fn set_expression_is_verbatim() {
        let clauses = vec![SetClause::expression("total", "total + 1")];
        assert_eq!(set_clause(&clauses).unwrap(), "SET total = total + 1");
    }

    #[test]
    fn set_omitted_when_nothing_valid() {
        assert_eq!(set_clause(&[SetClause::literal("a", "")]), None);
    }

    #[test]
    fn returning_variants() {
        let mut model = QueryModel::new();
        assert_eq!(returning_clause(&model), None);

        model.returning_fields = strings(&["id", "key"]);
        assert_eq!(returning_clause(&model).unwrap(), "RETURNING id, `key`");

        model.returning_all = true;
        assert_eq!(returning_clause(&model).unwrap(), "RETURNING *");
    }
}
