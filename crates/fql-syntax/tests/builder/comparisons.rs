use crate::{compile_ok, only_condition};
use fql_syntax::ast::{
    AggregateFunction, AggregateOperand, AstSpec, ComparisonOperator, JoinType, Literal, Operand,
    PathOperand,
};

#[test]
fn test_binary_comparison() {
    let query = compile_ok("a=1");

    let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected binary comparison");
    };
    assert_eq!(cmp.left(), &Operand::path("a"));
    assert_eq!(cmp.operator(), ComparisonOperator::Eq);
    assert_eq!(cmp.right(), &Operand::Literal(Literal::Integer(1)));
    assert_eq!(cmp.join_type(), JoinType::Inner);
}

#[test]
fn test_every_binary_operator() {
    let cases = [
        ("x = 1", ComparisonOperator::Eq),
        ("x != 1", ComparisonOperator::Ne),
        ("x < 1", ComparisonOperator::Lt),
        ("x <= 1", ComparisonOperator::Lte),
        ("x > 1", ComparisonOperator::Gt),
        ("x >= 1", ComparisonOperator::Gte),
    ];

    for (input, expected) in cases {
        let query = compile_ok(input);
        let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
            panic!("expected binary comparison for {input}");
        };
        assert_eq!(cmp.operator(), expected, "operator mismatch for {input}");
    }
}

#[test]
fn test_left_join_attaches_to_comparison() {
    let query = compile_ok("LEFT orders.total > 100");

    let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected binary comparison");
    };
    assert_eq!(cmp.join_type(), JoinType::Left);
    assert_eq!(cmp.left(), &Operand::Path(PathOperand::new(["orders", "total"])));
}

#[test]
fn test_right_join_keyword_is_case_insensitive() {
    let query = compile_ok("right customer.name = 'Ann'");

    let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected binary comparison");
    };
    assert_eq!(cmp.join_type(), JoinType::Right);
}

#[test]
fn test_between() {
    let query = compile_ok("age BETWEEN 18 AND 65");

    let AstSpec::BetweenComparison(between) = only_condition(query.where_spec()) else {
        panic!("expected between comparison");
    };
    assert_eq!(between.left(), &Operand::path("age"));
    assert_eq!(between.from(), &Operand::literal(18i64));
    assert_eq!(between.to(), &Operand::literal(65i64));
}

#[test]
fn test_between_keeps_bound_order() {
    let query = compile_ok("age BETWEEN 65 AND 18");

    let AstSpec::BetweenComparison(between) = only_condition(query.where_spec()) else {
        panic!("expected between comparison");
    };
    assert_eq!(between.from(), &Operand::literal(65i64));
    assert_eq!(between.to(), &Operand::literal(18i64));
}

#[test]
fn test_in_list_preserves_order() {
    let query = compile_ok("status IN ('A','B')");

    let AstSpec::InComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected IN comparison");
    };
    assert_eq!(cmp.left(), &Operand::path("status"));
    assert_eq!(
        cmp.values(),
        &[Operand::literal("A"), Operand::literal("B")]
    );
}

#[test]
fn test_null_checks() {
    let query = compile_ok("deleted_at IS NULL");
    let AstSpec::UnaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected unary comparison");
    };
    assert_eq!(cmp.operator(), ComparisonOperator::IsNull);

    let query = compile_ok("deleted_at is not null");
    let AstSpec::UnaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected unary comparison");
    };
    assert_eq!(cmp.operator(), ComparisonOperator::IsNotNull);
}

#[test]
fn test_count_wildcard() {
    let query = compile_ok("COUNT(*) > 5");

    let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected binary comparison");
    };
    assert_eq!(cmp.left(), &Operand::Aggregate(AggregateOperand::count_all()));

    let Operand::Aggregate(aggregate) = cmp.left() else {
        panic!("expected aggregate");
    };
    assert_eq!(aggregate.path().identifiers(), &["*".to_string()]);
    assert!(aggregate.path().is_wildcard());
}

#[test]
fn test_aggregate_over_path() {
    let query = compile_ok("sum(orders.amount) >= 10");

    let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected binary comparison");
    };
    assert_eq!(
        cmp.left(),
        &Operand::aggregate(AggregateFunction::Sum, PathOperand::from_dotted("orders.amount"))
    );
}

#[test]
fn test_numeric_typing() {
    let query = compile_ok("rating=4.5");
    let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected binary comparison");
    };
    assert_eq!(cmp.right(), &Operand::Literal(Literal::Float(4.5)));

    let query = compile_ok("version=2");
    let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected binary comparison");
    };
    assert_eq!(cmp.right(), &Operand::Literal(Literal::Integer(2)));
}

#[test]
fn test_backslash_is_not_an_escape() {
    let query = compile_ok(r"dir = 'C:\temp'");

    let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected binary comparison");
    };
    assert_eq!(cmp.right(), &Operand::literal(r"C:\temp"));
}

#[test]
fn test_string_literal_keeps_inner_text() {
    let query = compile_ok("name = ' Alice  Smith '");

    let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected binary comparison");
    };
    assert_eq!(cmp.right(), &Operand::literal(" Alice  Smith "));
}

#[test]
fn test_path_on_both_sides() {
    let query = compile_ok("order.shipped_at > order.created_at");

    let AstSpec::BinaryComparison(cmp) = only_condition(query.where_spec()) else {
        panic!("expected binary comparison");
    };
    assert_eq!(cmp.right(), &Operand::path("order.created_at"));
}
