use crate::{compile_ok, only_condition};
use fql_syntax::ast::{AggregateOperand, AstSpec, Operand};

#[test]
fn test_group_by_and_having() {
    let query = compile_ok("SUM(amt)>100 GROUP BY dept HAVING COUNT(*)>5");

    let group_by = query.group_by().expect("group by");
    assert_eq!(group_by.items(), &[Operand::path("dept")]);

    let having = query.having_spec().expect("having");
    let AstSpec::BinaryComparison(cmp) = only_condition(having) else {
        panic!("expected binary comparison in HAVING");
    };
    assert_eq!(cmp.left(), &Operand::Aggregate(AggregateOperand::count_all()));

    assert!(matches!(
        only_condition(query.where_spec()),
        AstSpec::BinaryComparison(_)
    ));
}

#[test]
fn test_group_by_preserves_declaration_order() {
    let query = compile_ok("a = 1 GROUP BY region, customer.tier, category");

    let items = query.group_by().expect("group by").items();
    assert_eq!(
        items,
        &[
            Operand::path("region"),
            Operand::path("customer.tier"),
            Operand::path("category"),
        ]
    );
    assert!(query.having_spec().is_none());
}

#[test]
fn test_having_without_group_by() {
    let query = compile_ok("a = 1 HAVING MAX(price) < 10");

    assert!(query.group_by().is_none());
    assert!(query.having_spec().is_some());
}

#[test]
fn test_having_is_wrapped_like_where() {
    let query = compile_ok("a = 1 GROUP BY b HAVING COUNT(*) > 1 OR AVG(c) >= 2.5");

    let AstSpec::LogicalOr(or) = query.having_spec().expect("having") else {
        panic!("expected LogicalOr");
    };
    assert_eq!(or.children().len(), 2);
}
