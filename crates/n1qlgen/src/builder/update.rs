use super::clauses::{returning_clause, set_clause, where_clause};
use super::traits::ClauseAssembler;
use crate::model::QueryModel;

/// UPDATE statement assembler.
///
/// Clause order: `UPDATE`, `SET`, `WHERE`, `RETURNING`. The SET clause is
/// omitted when no assignment is valid.
#[derive(Debug, Clone, Copy)]
pub struct UpdateAssembler<'a> {
    model: &'a QueryModel,
}

impl<'a> UpdateAssembler<'a> {
    pub fn new(model: &'a QueryModel) -> Self {
        Self { model }
    }
}

impl ClauseAssembler for UpdateAssembler<'_> {
    fn clauses(&self) -> Vec<String> {
        let model = self.model;
        let mut clauses = vec![format!("UPDATE {}", model.keyspace())];
        clauses.extend(set_clause(&model.set_clauses));
        clauses.extend(where_clause(&model.where_conditions));
        clauses.extend(returning_clause(model));
        clauses
    }
}
