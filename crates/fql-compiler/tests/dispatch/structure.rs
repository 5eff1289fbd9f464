use crate::{parse, recorder::Recorder};
use fql_compiler::apply;
use fql_syntax::ast::{
    AstSpec, GroupBy, JoinType, LogicalAndSpec, LogicalOrSpec, QuerySpec,
};
use tracing_test::traced_test;

fn compile_with_recorder(input: &str) -> (String, Recorder) {
    let mut backend = Recorder::default();
    let compiled = match apply(&parse(input), &mut backend) {
        Ok(compiled) => compiled,
        Err(err) => panic!("failed to compile {input:?}: {err}"),
    };
    (compiled.primary, backend)
}

fn primary(input: &str) -> String {
    compile_with_recorder(input).0
}

#[test]
#[traced_test]
fn test_single_comparison_is_unwrapped() {
    assert_eq!(primary("a=1"), "a = 1");
}

#[test]
fn test_and_folds_left_to_right() {
    assert_eq!(
        primary("a=1 AND b=2 AND c=3"),
        "and(and(a = 1, b = 2), c = 3)"
    );
}

#[test]
fn test_or_folds_left_to_right() {
    assert_eq!(primary("a=1 OR b=2 OR c=3"), "or(or(a = 1, b = 2), c = 3)");
}

#[test]
fn test_precedence_reaches_the_backend() {
    assert_eq!(
        primary("a=1 OR b=2 AND c=3"),
        "or(a = 1, and(b = 2, c = 3))"
    );
    assert_eq!(
        primary("(a=1 OR b=2) AND c=3"),
        "and(or(a = 1, b = 2), c = 3)"
    );
}

#[test]
fn test_operators_and_literals() {
    assert_eq!(primary("name != 'Bob'"), "name != 'Bob'");
    assert_eq!(primary("rating >= 4.5"), "rating >= 4.5");
    assert_eq!(primary("a.x < b.y"), "a.x < b.y");
}

#[test]
fn test_in_between_and_null() {
    assert_eq!(primary("status IN ('A','B')"), "status IN ['A', 'B']");
    assert_eq!(primary("age BETWEEN 65 AND 18"), "age BETWEEN 65 AND 18");
    assert_eq!(primary("deleted_at IS NULL"), "deleted_at IS NULL");
    assert_eq!(primary("deleted_at IS NOT NULL"), "deleted_at IS NOT NULL");
}

#[test]
fn test_join_type_reaches_field_resolution() {
    let (_, backend) = compile_with_recorder("LEFT orders.total > 1 AND customer.name = 'x'");

    assert_eq!(
        backend.resolved,
        vec![
            ("orders.total".to_string(), JoinType::Left),
            ("customer.name".to_string(), JoinType::Inner),
        ]
    );
}

#[test]
#[traced_test]
fn test_group_by_and_having() {
    let query = parse("SUM(amt)>100 GROUP BY dept HAVING COUNT(*)>5");
    let mut backend = Recorder::default();

    let compiled = apply(&query, &mut backend).unwrap();

    assert_eq!(compiled.primary, "SUM(amt) > 100");
    assert_eq!(compiled.having, "COUNT(*) > 5");
    assert_eq!(compiled.group_by, vec!["dept".to_string()]);
    assert_eq!(backend.having.as_deref(), Some("COUNT(*) > 5"));
    assert_eq!(backend.group_by, Some(vec!["dept".to_string()]));
}

#[test]
fn test_missing_having_is_identity_and_not_applied() {
    let query = parse("a = 1 GROUP BY a, b");
    let mut backend = Recorder::default();

    let compiled = apply(&query, &mut backend).unwrap();

    assert_eq!(compiled.having, "true");
    assert!(backend.having.is_none());
    assert_eq!(compiled.group_by, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_missing_group_by_is_not_applied() {
    let query = parse("a = 1 HAVING COUNT(*) > 1");
    let mut backend = Recorder::default();

    let compiled = apply(&query, &mut backend).unwrap();

    assert!(compiled.group_by.is_empty());
    assert!(backend.group_by.is_none());
    assert_eq!(compiled.having, "COUNT(*) > 1");
}

#[test]
fn test_empty_group_by_is_not_applied() {
    let query = parse("a = 1").with_group_by(Some(GroupBy::new(vec![])));
    let mut backend = Recorder::default();

    let compiled = apply(&query, &mut backend).unwrap();

    assert!(compiled.group_by.is_empty());
    assert!(backend.group_by.is_none());
}

#[test]
fn test_neutral_query_compiles_to_identity() {
    let mut backend = Recorder::default();
    let compiled = apply(&QuerySpec::neutral(), &mut backend).unwrap();

    assert_eq!(compiled.primary, "true");
    assert_eq!(compiled.having, "true");
    assert!(compiled.group_by.is_empty());
}

#[test]
fn test_empty_and_compiles_to_identity() {
    let where_spec: AstSpec =
        LogicalOrSpec::new(vec![LogicalAndSpec::new(vec![]).into()]).into();
    let query = QuerySpec::neutral().with_where(where_spec);

    let mut backend = Recorder::default();
    assert_eq!(apply(&query, &mut backend).unwrap().primary, "true");
}

#[test]
fn test_compilation_is_repeatable() {
    let query = parse("LEFT a.b = 1 AND (c IN (1, 2) OR d IS NULL) GROUP BY e HAVING MAX(f) < 3");

    let mut first = Recorder::default();
    let mut second = Recorder::default();

    assert_eq!(
        apply(&query, &mut first).unwrap(),
        apply(&query, &mut second).unwrap()
    );
    assert_eq!(first.resolved, second.resolved);
}
