use super::*;
use crate::model::{
    AggregateFunction, AggregationClause, Keyspace, OrderByClause, SetClause, WhereCondition,
    WhereOperator,
};

fn select(bucket: &str) -> QueryModel {
    QueryModel::for_bucket(Operation::Select, bucket)
}

#[test]
fn test_missing_model_sentinel() {
    assert_eq!(build(None, true), NO_MODEL);
    assert_eq!(build(None, false), "-- No query model provided");
    assert!(QueryBuilder::from_option(None).clauses().is_empty());
}

#[test]
fn test_simple_select() {
    let model = select("users");
    assert_eq!(build(Some(&model), false), "SELECT * FROM `users`");
    assert_eq!(build(Some(&model), true), "SELECT *\nFROM `users`");
}

#[test]
fn test_default_model_uses_placeholder_bucket() {
    let model = QueryModel::new();
    assert_eq!(build(Some(&model), false), "SELECT * FROM `bucket`");
}

#[test]
fn test_select_fields_escaped() {
    let mut model = select("users");
    model.select_all = false;
    model.select_fields = vec![
        "name".to_string(),
        "type".to_string(),
        "".to_string(),
        "address.city".to_string(),
    ];
    assert_eq!(
        build(Some(&model), false),
        "SELECT name, `type`, address.city FROM `users`"
    );
}

#[test]
fn test_select_all_wins_over_fields() {
    let mut model = select("users");
    model.select_fields = vec!["name".to_string()];
    assert_eq!(build(Some(&model), false), "SELECT * FROM `users`");
}

#[test]
fn test_select_blank_field_list_falls_back_to_star() {
    let mut model = select("users");
    model.select_all = false;
    model.select_fields = vec!["  ".to_string()];
    assert_eq!(build(Some(&model), false), "SELECT * FROM `users`");
}

#[test]
fn test_select_distinct() {
    let mut model = select("users");
    model.distinct = true;
    model.select_all = false;
    model.select_fields = vec!["city".to_string()];
    assert_eq!(build(Some(&model), false), "SELECT DISTINCT city FROM `users`");
}

#[test]
fn test_select_full_clause_order() {
    let mut model = select("orders");
    model.keyspace = Keyspace::new("orders")
        .with_scope("sales")
        .with_collection("line_items");
    model
        .add_where(WhereCondition::new("status", WhereOperator::Equals, "open"))
        .add_where(WhereCondition::new("total", WhereOperator::GreaterThan, "100"))
        .add_order_by(OrderByClause::desc("created_at"));
    model.limit = Some(10);
    model.offset = Some(20);

    assert_eq!(
        build(Some(&model), true),
        "SELECT *\n\
         FROM `orders`.`sales`.`line_items`\n\
         WHERE status = \"open\" AND total > 100\n\
         ORDER BY created_at DESC\n\
         LIMIT 10 OFFSET 20"
    );
}

#[test]
fn test_aggregation_select_list() {
    let mut model = select("orders");
    model.group_by_fields = vec!["region".to_string()];
    model
        .add_aggregation(AggregationClause::new(AggregateFunction::Count, "").alias("n"))
        .add_aggregation(AggregationClause::new(AggregateFunction::Sum, "amount").alias("total"))
        .add_aggregation(AggregationClause::new(AggregateFunction::Avg, " "))
        .add_having(WhereCondition::new("COUNT(*)", WhereOperator::GreaterThan, "5"));

    assert_eq!(
        build(Some(&model), true),
        "SELECT region, COUNT(*) AS n, SUM(amount) AS total\n\
         FROM `orders`\n\
         GROUP BY region\n\
         HAVING COUNT(*) > 5"
    );
}

#[test]
fn test_aggregation_distinct_variants() {
    let mut model = select("orders");
    model
        .add_aggregation(AggregationClause::new(AggregateFunction::CountDistinct, "city"))
        .add_aggregation(AggregationClause::new(AggregateFunction::ArrayAggDistinct, "tag"));
    assert_eq!(
        build(Some(&model), false),
        "SELECT COUNT(DISTINCT city), ARRAY_AGG(DISTINCT tag) FROM `orders`"
    );
}

#[test]
fn test_aggregation_without_valid_parts_falls_back() {
    let mut model = select("orders");
    model.add_aggregation(AggregationClause::new(AggregateFunction::Max, ""));
    assert_eq!(build(Some(&model), false), "SELECT * FROM `orders`");
}

#[test]
fn test_offset_without_limit() {
    let mut model = select("orders");
    model.offset = Some(5);
    assert_eq!(build(Some(&model), true), "SELECT *\nFROM `orders`\nOFFSET 5");

    model.limit = Some(0);
    assert_eq!(build(Some(&model), false), "SELECT * FROM `orders` OFFSET 5");
}

#[test]
fn test_select_ignores_returning() {
    let mut model = select("orders");
    model.returning_all = true;
    assert_eq!(build(Some(&model), false), "SELECT * FROM `orders`");
}

#[test]
fn test_invalid_conditions_are_absent() {
    let mut model = select("orders");
    model
        .add_where(WhereCondition::new("", WhereOperator::Equals, "x"))
        .add_where(WhereCondition::between("amount", "10", ""));
    assert_eq!(build(Some(&model), false), "SELECT * FROM `orders`");
}

#[test]
fn test_insert_defaults() {
    let model = QueryModel::for_bucket(Operation::Insert, "orders");
    assert_eq!(
        build(Some(&model), false),
        "INSERT INTO `orders` (KEY, VALUE) VALUES (UUID(), {})"
    );
}

#[test]
fn test_insert_with_key_and_document() {
    let mut model = QueryModel::for_bucket(Operation::Insert, "orders");
    model.document_key = Some(" order::1 ".to_string());
    model.document_value = r#"{"total": 10}"#.to_string();
    model.returning_fields = vec!["id".to_string()];

    assert_eq!(
        build(Some(&model), true),
        "INSERT INTO `orders`\n\
         (KEY, VALUE)\n\
         VALUES (\"order::1\", {\"total\": 10})\n\
         RETURNING id"
    );
}

#[test]
fn test_insert_key_is_escaped() {
    let mut model = QueryModel::for_bucket(Operation::Insert, "orders");
    model.document_key = Some("a\"b".to_string());
    let assembler = InsertAssembler::new(&model, InsertVerb::Insert);
    assert_eq!(assembler.key_literal(), "\"a\\\"b\"");
}

#[test]
fn test_upsert() {
    let mut model = QueryModel::for_bucket(Operation::Upsert, "users");
    model.document_key = Some("  ".to_string());
    model.returning_all = true;
    assert_eq!(
        build(Some(&model), false),
        "UPSERT INTO `users` (KEY, VALUE) VALUES (UUID(), {}) RETURNING *"
    );
}

#[test]
fn test_update() {
    let mut model = QueryModel::for_bucket(Operation::Update, "users");
    model
        .add_set(SetClause::literal("status", "inactive"))
        .add_set(SetClause::expression("updated_at", "NOW_STR()"))
        .add_set(SetClause::literal("", "ignored"))
        .add_where(WhereCondition::new("last_login", WhereOperator::LessThan, "2020-01-01"));
    model.returning_fields = vec!["meta().id".to_string(), "status".to_string()];

    assert_eq!(
        build(Some(&model), true),
        "UPDATE `users`\n\
         SET status = \"inactive\", updated_at = NOW_STR()\n\
         WHERE last_login < \"2020-01-01\"\n\
         RETURNING meta().id, status"
    );
}

#[test]
fn test_update_without_valid_set() {
    let mut model = QueryModel::for_bucket(Operation::Update, "users");
    model.add_set(SetClause::literal("status", ""));
    assert_eq!(build(Some(&model), false), "UPDATE `users`");
}

#[test]
fn test_delete_three_lines() {
    let mut model = QueryModel::for_bucket(Operation::Delete, "orders");
    model.add_where(WhereCondition::new("status", WhereOperator::Equals, "archived"));
    model.returning_all = true;

    let text = build(Some(&model), true);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec!["DELETE FROM `orders`", "WHERE status = \"archived\"", "RETURNING *"]
    );
}

#[test]
fn test_delete_without_where() {
    let model = QueryModel::for_bucket(Operation::Delete, "orders");
    assert_eq!(build(Some(&model), false), "DELETE FROM `orders`");
}

#[test]
fn test_layout_only_changes_separators() {
    let mut model = select("orders");
    model.group_by_fields = vec!["region".to_string()];
    model.add_aggregation(AggregationClause::new(AggregateFunction::Count, "*"));
    model.add_where(WhereCondition::new("note", WhereOperator::Like, "a b%"));
    model.add_order_by(OrderByClause::asc("region"));
    model.limit = Some(3);

    for op in Operation::ALL {
        model.operation = op;
        let builder = QueryBuilder::new(&model);
        let clauses = builder.clauses();
        assert_eq!(builder.formatted(true).build(), clauses.join("\n"));
        assert_eq!(builder.formatted(false).build(), clauses.join(" "));
    }
}

#[test]
fn test_build_is_deterministic() {
    let mut model = QueryModel::for_bucket(Operation::Update, "users");
    model.add_set(SetClause::literal("n", "1"));
    model.add_where(WhereCondition::new("id", WhereOperator::In, "a, b").or());
    model.add_where(WhereCondition::unary("deleted", WhereOperator::IsNull));

    let snapshot = model.clone();
    let first = build(Some(&model), true);
    let second = build(Some(&model), true);
    assert_eq!(first, second);
    assert_eq!(model, snapshot);
    assert_eq!(
        first,
        "UPDATE `users`\nSET n = 1\nWHERE id IN [\"a\", \"b\"] OR deleted IS NULL"
    );
}

#[test]
fn test_subquery_condition() {
    let mut model = select("orders");
    model.add_where(
        WhereCondition::new("customer_id", WhereOperator::In, "")
            .with_subquery(" SELECT RAW id FROM `customers` WHERE vip = true "),
    );
    assert_eq!(
        build(Some(&model), false),
        "SELECT * FROM `orders` WHERE customer_id IN (SELECT RAW id FROM `customers` WHERE vip = true)"
    );
}

#[test]
fn test_builder_layout_enum() {
    let model = select("users");
    let compact = QueryBuilder::new(&model).layout(Layout::Compact).build();
    assert_eq!(compact, "SELECT * FROM `users`");
    assert_eq!(Layout::from(true), Layout::Formatted);
    assert_eq!(Layout::default().separator(), "\n");
}

#[test]
fn test_assembler_render_matches_builder() {
    let mut model = QueryModel::for_bucket(Operation::Delete, "orders");
    model.add_where(WhereCondition::unary("expired_at", WhereOperator::IsNotNull));

    let rendered = DeleteAssembler::new(&model).render(Layout::Compact);
    assert_eq!(rendered, "DELETE FROM `orders` WHERE expired_at IS NOT NULL");
    assert_eq!(rendered, build(Some(&model), false));
}
