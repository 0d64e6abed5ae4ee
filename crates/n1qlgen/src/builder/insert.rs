use super::clauses::returning_clause;
use super::traits::ClauseAssembler;
use crate::model::QueryModel;
use crate::value::quote_string;

/// Key expression used when the model has no document key.
pub const GENERATED_KEY: &str = "UUID()";

/// Document body used when the model has no document value.
pub const EMPTY_DOCUMENT: &str = "{}";

/// Statement keyword for document writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertVerb {
    Insert,
    Upsert,
}

impl InsertVerb {
    pub fn keyword(self) -> &'static str {
        match self {
            InsertVerb::Insert => "INSERT",
            InsertVerb::Upsert => "UPSERT",
        }
    }
}

/// INSERT / UPSERT statement assembler.
///
/// Clause order: `INSERT|UPSERT INTO`, `(KEY, VALUE)`, `VALUES (...)`,
/// `RETURNING`.
#[derive(Debug, Clone, Copy)]
pub struct InsertAssembler<'a> {
    model: &'a QueryModel,
    verb: InsertVerb,
}

impl<'a> InsertAssembler<'a> {
    pub fn new(model: &'a QueryModel, verb: InsertVerb) -> Self {
        Self { model, verb }
    }

    /// Quoted document key, or `UUID()` when blank.
    pub fn key_literal(&self) -> String {
        match self.model.document_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => quote_string(key),
            _ => GENERATED_KEY.to_string(),
        }
    }

    /// Raw document text, or `{}` when blank.
    pub fn document_literal(&self) -> String {
        match self.model.document_value.trim() {
            "" => EMPTY_DOCUMENT.to_string(),
            doc => doc.to_string(),
        }
    }
}

impl ClauseAssembler for InsertAssembler<'_> {
    fn clauses(&self) -> Vec<String> {
        let mut clauses = vec![
            format!("{} INTO {}", self.verb.keyword(), self.model.keyspace()),
            "(KEY, VALUE)".to_string(),
            format!("VALUES ({}, {})", self.key_literal(), self.document_literal()),
        ];
        clauses.extend(returning_clause(self.model));
        clauses
    }
}
