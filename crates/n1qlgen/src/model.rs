//! Query model types.
//!
//! [`QueryModel`] is the complete, form-editable description of one query. The
//! editing surface owns a mutable working copy and hands a shared reference to
//! [`crate::build`] at render time; nothing in the renderer mutates it.
//!
//! Every list keeps insertion order, and that order is preserved in output.
//! Field names are free text: entries whose required parts are blank are
//! simply skipped when rendering.

use crate::error::GenResult;
use crate::ident;
use serde::{Deserialize, Deserializer, Serialize};

/// Bucket name used when the model has none.
pub const DEFAULT_BUCKET: &str = "bucket";

/// Scope implied when only a collection is given.
pub const DEFAULT_SCOPE: &str = "_default";

/// Query operation; determines which clauses are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    #[default]
    Select,
    Insert,
    Update,
    Delete,
    Upsert,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Select,
        Operation::Insert,
        Operation::Update,
        Operation::Delete,
        Operation::Upsert,
    ];

    /// Leading keyword of the statement.
    pub fn keyword(self) -> &'static str {
        match self {
            Operation::Select => "SELECT",
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Upsert => "UPSERT",
        }
    }

    /// Whether the operation writes documents (and so accepts RETURNING).
    pub fn is_mutation(self) -> bool {
        !matches!(self, Operation::Select)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Filter operator for WHERE/HAVING conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WhereOperator {
    #[default]
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEquals,
    LessThanOrEquals,
    Like,
    NotLike,
    In,
    NotIn,
    IsNull,
    IsNotNull,
    Between,
    Contains,
    ArrayContains,
}

impl WhereOperator {
    pub const ALL: [WhereOperator; 15] = [
        WhereOperator::Equals,
        WhereOperator::NotEquals,
        WhereOperator::GreaterThan,
        WhereOperator::LessThan,
        WhereOperator::GreaterThanOrEquals,
        WhereOperator::LessThanOrEquals,
        WhereOperator::Like,
        WhereOperator::NotLike,
        WhereOperator::In,
        WhereOperator::NotIn,
        WhereOperator::IsNull,
        WhereOperator::IsNotNull,
        WhereOperator::Between,
        WhereOperator::Contains,
        WhereOperator::ArrayContains,
    ];

    /// Operator text as it appears in the query.
    pub fn sql(self) -> &'static str {
        match self {
            WhereOperator::Equals => "=",
            WhereOperator::NotEquals => "!=",
            WhereOperator::GreaterThan => ">",
            WhereOperator::LessThan => "<",
            WhereOperator::GreaterThanOrEquals => ">=",
            WhereOperator::LessThanOrEquals => "<=",
            WhereOperator::Like => "LIKE",
            WhereOperator::NotLike => "NOT LIKE",
            WhereOperator::In => "IN",
            WhereOperator::NotIn => "NOT IN",
            WhereOperator::IsNull => "IS NULL",
            WhereOperator::IsNotNull => "IS NOT NULL",
            WhereOperator::Between => "BETWEEN",
            WhereOperator::Contains => "CONTAINS",
            WhereOperator::ArrayContains => "ANY ... IN ... SATISFIES",
        }
    }

    /// Human-readable label for pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            WhereOperator::Equals => "Equals",
            WhereOperator::NotEquals => "Not Equals",
            WhereOperator::GreaterThan => "Greater Than",
            WhereOperator::LessThan => "Less Than",
            WhereOperator::GreaterThanOrEquals => "Greater Than or Equals",
            WhereOperator::LessThanOrEquals => "Less Than or Equals",
            WhereOperator::Like => "Like (Pattern)",
            WhereOperator::NotLike => "Not Like",
            WhereOperator::In => "In (List)",
            WhereOperator::NotIn => "Not In",
            WhereOperator::IsNull => "Is Null",
            WhereOperator::IsNotNull => "Is Not Null",
            WhereOperator::Between => "Between",
            WhereOperator::Contains => "Contains",
            WhereOperator::ArrayContains => "Array Contains",
        }
    }

    /// `false` only for the unary null checks.
    pub fn requires_value(self) -> bool {
        !matches!(self, WhereOperator::IsNull | WhereOperator::IsNotNull)
    }

    /// Operators whose right-hand side may be a parenthesized subquery.
    pub fn accepts_subquery(self) -> bool {
        matches!(
            self,
            WhereOperator::Equals
                | WhereOperator::NotEquals
                | WhereOperator::GreaterThan
                | WhereOperator::LessThan
                | WhereOperator::GreaterThanOrEquals
                | WhereOperator::LessThanOrEquals
                | WhereOperator::In
                | WhereOperator::NotIn
        )
    }
}

impl std::fmt::Display for WhereOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Joiner between a condition and the one after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn sql(self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

/// ORDER BY direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SortOrder::Asc => "Ascending",
            SortOrder::Desc => "Descending",
        }
    }
}

/// Aggregate function for the SELECT list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregateFunction {
    #[default]
    Count,
    CountDistinct,
    Sum,
    Avg,
    Min,
    Max,
    ArrayAgg,
    ArrayAggDistinct,
}

impl AggregateFunction {
    pub const ALL: [AggregateFunction; 8] = [
        AggregateFunction::Count,
        AggregateFunction::CountDistinct,
        AggregateFunction::Sum,
        AggregateFunction::Avg,
        AggregateFunction::Min,
        AggregateFunction::Max,
        AggregateFunction::ArrayAgg,
        AggregateFunction::ArrayAggDistinct,
    ];

    pub fn sql(self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::CountDistinct => "COUNT(DISTINCT)",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
            AggregateFunction::ArrayAgg => "ARRAY_AGG",
            AggregateFunction::ArrayAggDistinct => "ARRAY_AGG(DISTINCT)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AggregateFunction::Count => "Count of items",
            AggregateFunction::CountDistinct => "Count of distinct items",
            AggregateFunction::Sum => "Sum of values",
            AggregateFunction::Avg => "Average of values",
            AggregateFunction::Min => "Minimum value",
            AggregateFunction::Max => "Maximum value",
            AggregateFunction::ArrayAgg => "Aggregate into array",
            AggregateFunction::ArrayAggDistinct => "Aggregate distinct values into array",
        }
    }

    /// Render the call over `field`.
    ///
    /// `COUNT` over an empty field or `*` becomes `COUNT(*)`.
    pub fn format(self, field: &str) -> String {
        let field = field.trim();
        match self {
            AggregateFunction::Count if field.is_empty() || field == "*" => "COUNT(*)".to_string(),
            AggregateFunction::CountDistinct => format!("COUNT(DISTINCT {field})"),
            AggregateFunction::ArrayAggDistinct => format!("ARRAY_AGG(DISTINCT {field})"),
            AggregateFunction::Count
            | AggregateFunction::Sum
            | AggregateFunction::Avg
            | AggregateFunction::Min
            | AggregateFunction::Max
            | AggregateFunction::ArrayAgg => {
                let field = if field.is_empty() { "*" } else { field };
                format!("{}({field})", self.sql())
            }
        }
    }
}

/// Addressable source/target of a query: `bucket[.scope[.collection]]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Keyspace {
    pub bucket: String,
    pub scope: String,
    pub collection: String,
}

impl Keyspace {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Render the keyspace path.
    ///
    /// Exactly one of `` `b` ``, `` `b`.`s` ``, `` `b`.`s`.`c` `` or
    /// `` `b`.`_default`.`c` ``, chosen by which of scope/collection are set.
    pub fn to_n1ql(&self) -> String {
        let bucket = match self.bucket.trim() {
            "" => DEFAULT_BUCKET,
            b => b,
        };
        let scope = self.scope.trim();
        let collection = self.collection.trim();

        let mut out = ident::quote(bucket);
        match (scope.is_empty(), collection.is_empty()) {
            (true, true) => {}
            (false, true) => {
                out.push('.');
                out.push_str(&ident::quote(scope));
            }
            (false, false) => {
                out.push('.');
                out.push_str(&ident::quote(scope));
                out.push('.');
                out.push_str(&ident::quote(collection));
            }
            (true, false) => {
                out.push('.');
                out.push_str(&ident::quote(DEFAULT_SCOPE));
                out.push('.');
                out.push_str(&ident::quote(collection));
            }
        }
        out
    }
}

impl std::fmt::Display for Keyspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_n1ql())
    }
}

/// One WHERE (or HAVING) condition.
///
/// `logical_operator` joins this condition to the *next* valid one; the last
/// condition's joiner is never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WhereCondition {
    pub field: String,
    pub operator: WhereOperator,
    pub value: String,
    /// Upper bound for BETWEEN.
    pub second_value: String,
    pub logical_operator: LogicalOperator,
    pub is_subquery: bool,
    pub subquery: String,
}

impl WhereCondition {
    pub fn new(field: impl Into<String>, operator: WhereOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
            ..Self::default()
        }
    }

    /// Unary condition (`IS NULL` / `IS NOT NULL`).
    pub fn unary(field: impl Into<String>, operator: WhereOperator) -> Self {
        Self::new(field, operator, "")
    }

    /// `field BETWEEN low AND high`.
    pub fn between(field: impl Into<String>, low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            second_value: high.into(),
            ..Self::new(field, WhereOperator::Between, low)
        }
    }

    /// Compare against a subquery instead of a literal.
    pub fn with_subquery(mut self, subquery: impl Into<String>) -> Self {
        self.subquery = subquery.into();
        self.is_subquery = !self.subquery.is_empty();
        self
    }

    pub fn with_second_value(mut self, value: impl Into<String>) -> Self {
        self.second_value = value.into();
        self
    }

    /// Join to the next condition with OR.
    pub fn or(mut self) -> Self {
        self.logical_operator = LogicalOperator::Or;
        self
    }

    /// Join to the next condition with AND.
    pub fn and(mut self) -> Self {
        self.logical_operator = LogicalOperator::And;
        self
    }
}

/// ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderByClause {
    pub field: String,
    pub sort_order: SortOrder,
}

impl OrderByClause {
    pub fn new(field: impl Into<String>, sort_order: SortOrder) -> Self {
        Self {
            field: field.into(),
            sort_order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    pub fn is_valid(&self) -> bool {
        !self.field.trim().is_empty()
    }
}

/// Aggregate entry of the SELECT list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationClause {
    pub function: AggregateFunction,
    pub field: String,
    pub alias: Option<String>,
}

impl AggregationClause {
    pub fn new(function: AggregateFunction, field: impl Into<String>) -> Self {
        Self {
            function,
            field: field.into(),
            alias: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// COUNT is always renderable; every other function needs a field.
    pub fn is_valid(&self) -> bool {
        self.function == AggregateFunction::Count || !self.field.trim().is_empty()
    }

    /// `FUNC(field) [AS alias]`.
    pub fn to_n1ql(&self) -> String {
        let mut out = self.function.format(&self.field);
        if let Some(alias) = self.alias.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            out.push_str(" AS ");
            out.push_str(alias);
        }
        out
    }
}

/// `field = value` assignment of an UPDATE.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetClause {
    pub field: String,
    pub value: String,
    /// Raw expression (passed through verbatim) rather than a literal.
    pub is_expression: bool,
}

impl SetClause {
    pub fn literal(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            is_expression: false,
        }
    }

    pub fn expression(field: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: expr.into(),
            is_expression: true,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.field.trim().is_empty() && !self.value.trim().is_empty()
    }
}

/// Complete description of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryModel {
    pub operation: Operation,
    #[serde(flatten)]
    pub keyspace: Keyspace,

    // SELECT
    pub select_fields: Vec<String>,
    pub select_all: bool,
    pub distinct: bool,
    pub aggregations: Vec<AggregationClause>,
    pub group_by_fields: Vec<String>,
    pub having_conditions: Vec<WhereCondition>,

    pub where_conditions: Vec<WhereCondition>,
    pub order_by_clauses: Vec<OrderByClause>,
    #[serde(deserialize_with = "lenient_count")]
    pub limit: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub offset: Option<u64>,

    // INSERT / UPSERT
    pub document_key: Option<String>,
    pub document_value: String,

    // UPDATE
    pub set_clauses: Vec<SetClause>,

    // RETURNING
    pub returning_all: bool,
    pub returning_fields: Vec<String>,
}

impl Default for QueryModel {
    fn default() -> Self {
        Self {
            operation: Operation::Select,
            keyspace: Keyspace::default(),
            select_fields: Vec::new(),
            select_all: true,
            distinct: false,
            aggregations: Vec::new(),
            group_by_fields: Vec::new(),
            having_conditions: Vec::new(),
            where_conditions: Vec::new(),
            order_by_clauses: Vec::new(),
            limit: None,
            offset: None,
            document_key: None,
            document_value: String::new(),
            set_clauses: Vec::new(),
            returning_all: false,
            returning_fields: Vec::new(),
        }
    }
}

impl QueryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// New model for `operation` on `bucket`.
    pub fn for_bucket(operation: Operation, bucket: impl Into<String>) -> Self {
        Self {
            operation,
            keyspace: Keyspace::new(bucket),
            ..Self::default()
        }
    }

    /// Parse a model snapshot from JSON.
    pub fn from_json(json: &str) -> GenResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the model snapshot as pretty JSON.
    pub fn to_json(&self) -> GenResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore every field to its default, in place.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rendered keyspace path.
    pub fn keyspace(&self) -> String {
        self.keyspace.to_n1ql()
    }

    /// Bucket name as typed (may be blank).
    pub fn bucket(&self) -> &str {
        &self.keyspace.bucket
    }

    pub fn has_aggregation(&self) -> bool {
        !self.aggregations.is_empty() || !self.group_by_fields.is_empty()
    }

    /// Set LIMIT from user text; malformed input clears it.
    pub fn set_limit_str(&mut self, raw: &str) {
        self.limit = parse_count(raw);
    }

    /// Set OFFSET from user text; malformed input clears it.
    pub fn set_offset_str(&mut self, raw: &str) {
        self.offset = parse_count(raw);
    }

    pub fn add_where(&mut self, condition: WhereCondition) -> &mut Self {
        self.where_conditions.push(condition);
        self
    }

    /// Remove a WHERE condition; out-of-range indexes are ignored.
    pub fn remove_where(&mut self, index: usize) {
        if index < self.where_conditions.len() {
            self.where_conditions.remove(index);
        }
    }

    pub fn add_having(&mut self, condition: WhereCondition) -> &mut Self {
        self.having_conditions.push(condition);
        self
    }

    pub fn add_order_by(&mut self, clause: OrderByClause) -> &mut Self {
        self.order_by_clauses.push(clause);
        self
    }

    pub fn add_aggregation(&mut self, aggregation: AggregationClause) -> &mut Self {
        self.aggregations.push(aggregation);
        self
    }

    pub fn add_set(&mut self, clause: SetClause) -> &mut Self {
        self.set_clauses.push(clause);
        self
    }
}

/// Parse a non-negative count; anything else is treated as absent.
pub fn parse_count(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => parse_count(&s),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyspace_bucket_only() {
        assert_eq!(Keyspace::new("orders").to_n1ql(), "`orders`");
    }

    #[test]
    fn keyspace_scope_only() {
        let ks = Keyspace::new("orders").with_scope("sales");
        assert_eq!(ks.to_n1ql(), "`orders`.`sales`");
    }

    #[test]
    fn keyspace_full_path() {
        let ks = Keyspace::new("orders")
            .with_scope("sales")
            .with_collection("line_items");
        assert_eq!(ks.to_n1ql(), "`orders`.`sales`.`line_items`");
    }

    #[test]
    fn keyspace_collection_implies_default_scope() {
        let ks = Keyspace::new("orders").with_collection("line_items");
        assert_eq!(ks.to_n1ql(), "`orders`.`_default`.`line_items`");
    }

    #[test]
    fn keyspace_blank_bucket_uses_placeholder() {
        assert_eq!(Keyspace::default().to_n1ql(), "`bucket`");
        assert_eq!(Keyspace::new("   ").with_scope(" ").to_n1ql(), "`bucket`");
    }

    #[test]
    fn aggregate_format() {
        assert_eq!(AggregateFunction::Count.format(""), "COUNT(*)");
        assert_eq!(AggregateFunction::Count.format("*"), "COUNT(*)");
        assert_eq!(AggregateFunction::Count.format("id"), "COUNT(id)");
        assert_eq!(AggregateFunction::CountDistinct.format("city"), "COUNT(DISTINCT city)");
        assert_eq!(AggregateFunction::ArrayAggDistinct.format("tag"), "ARRAY_AGG(DISTINCT tag)");
        assert_eq!(AggregateFunction::Sum.format("amount"), "SUM(amount)");
    }

    #[test]
    fn aggregation_validity_and_alias() {
        assert!(AggregationClause::new(AggregateFunction::Count, "").is_valid());
        assert!(!AggregationClause::new(AggregateFunction::Sum, " ").is_valid());

        let agg = AggregationClause::new(AggregateFunction::Avg, "amount").alias(" avg_amount ");
        assert_eq!(agg.to_n1ql(), "AVG(amount) AS avg_amount");

        let blank_alias = AggregationClause::new(AggregateFunction::Max, "amount").alias("  ");
        assert_eq!(blank_alias.to_n1ql(), "MAX(amount)");
    }

    #[test]
    fn operator_flags() {
        assert!(!WhereOperator::IsNull.requires_value());
        assert!(!WhereOperator::IsNotNull.requires_value());
        assert!(WhereOperator::Between.requires_value());
        assert!(WhereOperator::In.accepts_subquery());
        assert!(!WhereOperator::Like.accepts_subquery());
        assert_eq!(WhereOperator::NotIn.sql(), "NOT IN");
        assert!(!Operation::Select.is_mutation());
        assert!(Operation::Upsert.is_mutation());
        assert_eq!(SortOrder::Desc.display_name(), "Descending");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut model = QueryModel::for_bucket(Operation::Delete, "orders");
        model.distinct = true;
        model.limit = Some(10);
        model.add_where(WhereCondition::new("a", WhereOperator::Equals, "1"));
        model.reset();
        assert_eq!(model, QueryModel::default());
        assert!(model.select_all);
    }

    #[test]
    fn remove_where_ignores_out_of_range() {
        let mut model = QueryModel::new();
        model.add_where(WhereCondition::new("a", WhereOperator::Equals, "1"));
        model.remove_where(5);
        assert_eq!(model.where_conditions.len(), 1);
        model.remove_where(0);
        assert!(model.where_conditions.is_empty());
    }

    #[test]
    fn lenient_limit_strings() {
        let mut model = QueryModel::new();
        model.set_limit_str(" 25 ");
        assert_eq!(model.limit, Some(25));
        model.set_limit_str("ten");
        assert_eq!(model.limit, None);
        model.set_offset_str("-3");
        assert_eq!(model.offset, None);
    }

    #[test]
    fn json_snapshot_defaults_and_lenient_counts() {
        let model = QueryModel::from_json(
            r#"{
                "operation": "SELECT",
                "bucket": "orders",
                "collection": "line_items",
                "where_conditions": [
                    { "field": "status", "operator": "NOT_IN", "value": "a, b" }
                ],
                "limit": "20",
                "offset": "abc"
            }"#,
        )
        .unwrap();

        assert_eq!(model.keyspace(), "`orders`.`_default`.`line_items`");
        assert!(model.select_all);
        assert_eq!(model.where_conditions[0].operator, WhereOperator::NotIn);
        assert_eq!(model.where_conditions[0].logical_operator, LogicalOperator::And);
        assert_eq!(model.limit, Some(20));
        assert_eq!(model.offset, None);
    }

    #[test]
    fn json_round_trip_preserves_model() {
        let mut model = QueryModel::for_bucket(Operation::Update, "users");
        model.keyspace.scope = "app".to_string();
        model.add_set(SetClause::expression("updated_at", "NOW_STR()"));
        model.limit = Some(5);

        let json = model.to_json().unwrap();
        assert_eq!(QueryModel::from_json(&json).unwrap(), model);
    }

    #[test]
    fn from_json_rejects_unknown_operation() {
        let err = QueryModel::from_json(r#"{ "operation": "MERGE" }"#).unwrap_err();
        assert!(matches!(err, crate::GenError::Json(_)));
    }
}
