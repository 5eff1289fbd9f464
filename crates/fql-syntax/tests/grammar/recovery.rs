use crate::rejected;
use fql_syntax::ParseError;

fn offsets(errors: &[ParseError]) -> Vec<usize> {
    errors.iter().map(ParseError::offset).collect()
}

#[test]
fn test_errors_in_separate_comparisons_are_all_reported() {
    let errors = rejected("a 1 AND b = AND c = 3 OR d >");

    assert_eq!(errors.len(), 3);
    let offsets = offsets(&errors);
    let mut sorted = offsets.clone();
    sorted.sort();
    assert_eq!(offsets, sorted);
}

#[test]
fn test_lex_and_syntax_errors_are_merged_in_order() {
    let errors = rejected("a ! 1 AND b @ 2");

    assert!(errors.len() >= 2);
    assert!(matches!(errors[0], ParseError::Lex(_)));
    let offsets = offsets(&errors);
    let mut sorted = offsets.clone();
    sorted.sort();
    assert_eq!(offsets, sorted);
}

#[test]
fn test_errors_after_group_by_are_reported() {
    let errors = rejected("a = 1 GROUP BY b HAVING COUNT(*) >");
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_stray_closing_paren() {
    assert_eq!(rejected("a = 1) AND b = 2").len(), 1);
}
