use super::clauses::{returning_clause, where_clause};
use super::traits::ClauseAssembler;
use crate::model::QueryModel;

/// DELETE statement assembler.
///
/// A model without valid conditions renders a bare `DELETE FROM`; guarding
/// against that is left to the caller.
#[derive(Debug, Clone, Copy)]
pub struct DeleteAssembler<'a> {
    model: &'a QueryModel,
}

impl<'a> DeleteAssembler<'a> {
    pub fn new(model: &'a QueryModel) -> Self {
        Self { model }
    }
}

impl ClauseAssembler for DeleteAssembler<'_> {
    fn clauses(&self) -> Vec<String> {
        let model = self.model;
        let mut clauses = vec![format!("DELETE FROM {}", model.keyspace())];
        clauses.extend(where_clause(&model.where_conditions));
        clauses.extend(returning_clause(model));
        clauses
    }
}
