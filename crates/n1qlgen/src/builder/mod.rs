//! Query text builder.
//!
//! Turns a [`QueryModel`] snapshot into N1QL text.
//!
//! ## Design
//!
//! - One assembler per operation produces an ordered list of clause strings.
//! - Clauses are joined by the [`Layout`]: newline when formatted, a single
//!   space otherwise. Layout never changes clause content or order.
//! - Invalid entries are dropped silently and an empty clause is omitted, so
//!   an incomplete model renders a partial but well-formed query.
//! - Building is pure: same model and layout, same text.
//!
//! # Example
//! ```
//! use n1qlgen::{QueryModel, Operation, WhereCondition, WhereOperator, build};
//!
//! let mut model = QueryModel::for_bucket(Operation::Delete, "orders");
//! model.add_where(WhereCondition::new("status", WhereOperator::Equals, "archived"));
//! model.returning_all = true;
//!
//! assert_eq!(
//!     build(Some(&model), true),
//!     "DELETE FROM `orders`\nWHERE status = \"archived\"\nRETURNING *"
//! );
//! ```

pub mod clauses;
pub mod delete;
pub mod insert;
pub mod select;
pub mod traits;
pub mod update;

pub use delete::DeleteAssembler;
pub use insert::{InsertAssembler, InsertVerb};
pub use select::SelectAssembler;
pub use traits::ClauseAssembler;
pub use update::UpdateAssembler;

use crate::model::{Operation, QueryModel};

/// Text returned when there is no model to render.
pub const NO_MODEL: &str = "-- No query model provided";

/// Inter-clause whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One clause per line.
    #[default]
    Formatted,
    /// Single line, clauses separated by one space.
    Compact,
}

impl Layout {
    pub fn separator(self) -> &'static str {
        match self {
            Layout::Formatted => "\n",
            Layout::Compact => " ",
        }
    }

    /// Join clauses with this layout's separator.
    pub fn join(self, clauses: &[String]) -> String {
        clauses.join(self.separator())
    }
}

impl From<bool> for Layout {
    fn from(formatted: bool) -> Self {
        if formatted { Layout::Formatted } else { Layout::Compact }
    }
}

/// Top-level builder: dispatches on the model's operation.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    model: Option<&'a QueryModel>,
    layout: Layout,
}

impl<'a> QueryBuilder<'a> {
    /// Create a builder over `model` with the formatted layout.
    pub fn new(model: &'a QueryModel) -> Self {
        Self {
            model: Some(model),
            layout: Layout::Formatted,
        }
    }

    /// Create a builder that may have no model.
    pub fn from_option(model: Option<&'a QueryModel>) -> Self {
        Self {
            model,
            layout: Layout::Formatted,
        }
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Toggle between formatted and compact layout.
    pub fn formatted(self, formatted: bool) -> Self {
        self.layout(formatted.into())
    }

    /// Ordered clause list for the model's operation (empty without a model).
    pub fn clauses(&self) -> Vec<String> {
        let Some(model) = self.model else {
            return Vec::new();
        };
        match model.operation {
            Operation::Select => SelectAssembler::new(model).clauses(),
            Operation::Insert => InsertAssembler::new(model, InsertVerb::Insert).clauses(),
            Operation::Upsert => InsertAssembler::new(model, InsertVerb::Upsert).clauses(),
            Operation::Update => UpdateAssembler::new(model).clauses(),
            Operation::Delete => DeleteAssembler::new(model).clauses(),
        }
    }

    /// Render the query text.
    pub fn build(&self) -> String {
        let Some(model) = self.model else {
            return NO_MODEL.to_string();
        };
        let clauses = self.clauses();
        let query = self.layout.join(&clauses);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "n1qlgen.query",
            operation = %model.operation,
            formatted = self.layout == Layout::Formatted,
            clauses = clauses.len(),
            query = %query,
            "rendered query"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = model;

        query
    }
}

/// Render `model` as query text.
///
/// `None` yields the [`NO_MODEL`] comment. `formatted` puts each clause on its
/// own line; otherwise clauses are separated by a single space.
pub fn build(model: Option<&QueryModel>, formatted: bool) -> String {
    QueryBuilder::from_option(model).formatted(formatted).build()
}

#[cfg(test)]
mod tests;
