use super::clauses::{
    group_by_clause, having_clause, limit_offset_clauses, order_by_clause, where_clause,
};
use super::traits::ClauseAssembler;
use crate::ident::{escape_field, escape_field_list};
use crate::model::QueryModel;

/// SELECT statement assembler.
///
/// Clause order: `SELECT`, `FROM`, `WHERE`, `GROUP BY`, `HAVING`, `ORDER BY`,
/// `LIMIT`/`OFFSET`.
#[derive(Debug, Clone, Copy)]
pub struct SelectAssembler<'a> {
    model: &'a QueryModel,
}

impl<'a> SelectAssembler<'a> {
    pub fn new(model: &'a QueryModel) -> Self {
        Self { model }
    }

    /// Resolve the SELECT list.
    ///
    /// With aggregation active the list is the group-by fields followed by the
    /// valid aggregate expressions. Otherwise `*` when `select_all` is set or
    /// no field is given, else the escaped field list.
    pub fn select_list(&self) -> String {
        let model = self.model;

        if model.has_aggregation() {
            let mut parts: Vec<String> = model
                .group_by_fields
                .iter()
                .filter(|f| !f.trim().is_empty())
                .map(|f| escape_field(f))
                .collect();
            parts.extend(
                model
                    .aggregations
                    .iter()
                    .filter(|a| a.is_valid())
                    .map(|a| a.to_n1ql()),
            );
            if !parts.is_empty() {
                return parts.join(", ");
            }
        }

        if model.select_all {
            return "*".to_string();
        }
        let list = escape_field_list(&model.select_fields);
        if list.is_empty() { "*".to_string() } else { list }
    }
}

impl ClauseAssembler for SelectAssembler<'_> {
    fn clauses(&self) -> Vec<String> {
        let model = self.model;
        let mut clauses = Vec::with_capacity(8);

        let distinct = if model.distinct { "DISTINCT " } else { "" };
        clauses.push(format!("SELECT {distinct}{}", self.select_list()));
        clauses.push(format!("FROM {}", model.keyspace()));

        clauses.extend(where_clause(&model.where_conditions));
        clauses.extend(group_by_clause(&model.group_by_fields));
        clauses.extend(having_clause(&model.having_conditions));
        clauses.extend(order_by_clause(&model.order_by_clauses));
        clauses.extend(limit_offset_clauses(model.limit, model.offset));

        clauses
    }
}
