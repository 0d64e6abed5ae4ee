//! # n1qlgen
//!
//! Structured N1QL query text generation for Couchbase.
//!
//! ## Features
//!
//! - **Pure rendering**: [`build`] turns a [`QueryModel`] snapshot into query text and never fails
//! - **Minimal quoting**: field names are backtick-quoted only when they are not plain identifiers or collide with a reserved word
//! - **Literal inference**: numbers, booleans, `NULL`, embedded JSON and function calls pass through; everything else becomes a string literal
//! - **Forgiving input**: incomplete entries are dropped and empty clauses omitted, so a half-filled form still renders a well-formed query
//! - **Collaborators**: sample-document field extraction, query history and a template library live beside the core
//!
//! ## Example
//!
//! ```
//! use n1qlgen::{build, Operation, OrderByClause, QueryModel, WhereCondition, WhereOperator};
//!
//! let mut model = QueryModel::for_bucket(Operation::Select, "travel-sample");
//! model
//!     .add_where(WhereCondition::new("type", WhereOperator::Equals, "airline"))
//!     .add_order_by(OrderByClause::asc("name"));
//! model.limit = Some(10);
//!
//! assert_eq!(
//!     build(Some(&model), false),
//!     "SELECT * FROM `travel-sample` WHERE `type` = \"airline\" ORDER BY name ASC LIMIT 10"
//! );
//! ```
//!
//! ## Logging
//!
//! With the `tracing` feature enabled every render emits a `debug` event on
//! the `n1qlgen.query` target, and dropped entries are reported at `trace`.

pub mod builder;
pub mod condition;
pub mod error;
pub mod fields;
pub mod history;
pub mod ident;
pub mod model;
pub mod template;
pub mod value;

pub use builder::{ClauseAssembler, Layout, NO_MODEL, QueryBuilder, build};
pub use condition::join_conditions;
pub use error::{GenError, GenResult};
pub use history::{HistoryEntry, HistoryStore, InMemoryHistory};
pub use ident::escape_field;
pub use model::{
    AggregateFunction, AggregationClause, Keyspace, LogicalOperator, Operation, OrderByClause,
    QueryModel, SetClause, SortOrder, WhereCondition, WhereOperator,
};
pub use template::{InMemoryTemplates, QueryTemplate, TemplateDraft, TemplateStore};
pub use value::{format_in_list, format_value};
