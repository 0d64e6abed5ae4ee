//! Condition rendering for WHERE/HAVING clauses.
//!
//! A [`WhereCondition`] renders according to its operator family:
//!
//! | family                     | rendering                                   |
//! |----------------------------|---------------------------------------------|
//! | `IS NULL` / `IS NOT NULL`  | `field OP`                                  |
//! | `BETWEEN`                  | `field BETWEEN v1 AND v2`                   |
//! | `IN` / `NOT IN`            | `field OP (subquery)` or `field OP [list]`  |
//! | `LIKE` / `NOT LIKE`        | `field OP "pattern"`                        |
//! | `ARRAY_CONTAINS`           | `ANY v IN field SATISFIES v = value END`    |
//! | `CONTAINS`                 | `CONTAINS(field, "value")`                  |
//! | comparisons                | `field OP value` or `field OP (subquery)`   |
//!
//! Conditions whose required parts are blank are invalid and are filtered out
//! by [`join_conditions`] before joining.

use crate::ident::escape_field;
use crate::model::{WhereCondition, WhereOperator};
use crate::value::{format_in_list, format_value, quote_string};

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl WhereCondition {
    /// Whether the right-hand side is taken from the subquery text.
    pub fn uses_subquery(&self) -> bool {
        self.is_subquery && self.operator.accepts_subquery()
    }

    /// A condition is valid when its field is set and the operator's operand
    /// requirement holds.
    pub fn is_valid(&self) -> bool {
        if is_blank(&self.field) {
            return false;
        }
        if !self.operator.requires_value() {
            return true;
        }
        if self.uses_subquery() {
            return !is_blank(&self.subquery);
        }
        match self.operator {
            WhereOperator::Between => !is_blank(&self.value) && !is_blank(&self.second_value),
            _ => !is_blank(&self.value),
        }
    }

    /// Render this condition. Does not check validity.
    pub fn to_n1ql(&self) -> String {
        let field = escape_field(&self.field);
        let op = self.operator;

        match op {
            WhereOperator::IsNull | WhereOperator::IsNotNull => format!("{field} {}", op.sql()),
            WhereOperator::Between => format!(
                "{field} BETWEEN {} AND {}",
                format_value(&self.value),
                format_value(&self.second_value)
            ),
            WhereOperator::In | WhereOperator::NotIn => {
                if self.uses_subquery() {
                    format!("{field} {} ({})", op.sql(), self.subquery.trim())
                } else {
                    format!("{field} {} {}", op.sql(), format_in_list(&self.value))
                }
            }
            WhereOperator::Like | WhereOperator::NotLike => {
                format!("{field} {} {}", op.sql(), quote_string(&self.value))
            }
            WhereOperator::ArrayContains => format!(
                "ANY v IN {field} SATISFIES v = {} END",
                format_value(&self.value)
            ),
            WhereOperator::Contains => {
                format!("CONTAINS({field}, {})", quote_string(&self.value))
            }
            WhereOperator::Equals
            | WhereOperator::NotEquals
            | WhereOperator::GreaterThan
            | WhereOperator::LessThan
            | WhereOperator::GreaterThanOrEquals
            | WhereOperator::LessThanOrEquals => {
                if self.uses_subquery() {
                    format!("{field} {} ({})", op.sql(), self.subquery.trim())
                } else {
                    format!("{field} {} {}", op.sql(), format_value(&self.value))
                }
            }
        }
    }
}

/// Render and join the valid conditions of `conditions`.
///
/// The separator between two consecutive valid conditions is the *earlier*
/// condition's logical operator; the last condition's joiner is unused.
/// Returns `None` when no condition is valid.
pub fn join_conditions(conditions: &[WhereCondition]) -> Option<String> {
    let valid: Vec<&WhereCondition> = conditions.iter().filter(|c| c.is_valid()).collect();

    #[cfg(feature = "tracing")]
    if valid.len() < conditions.len() {
        tracing::trace!(
            target: "n1qlgen.query",
            dropped = conditions.len() - valid.len(),
            "skipping invalid conditions"
        );
    }

    let (first, rest) = valid.split_first()?;
    let mut out = first.to_n1ql();
    let mut prev = *first;
    for cond in rest {
        out.push(' ');
        out.push_str(prev.logical_operator.sql());
        out.push(' ');
        out.push_str(&cond.to_n1ql());
        prev = *cond;
    }
    Some(out)
}
