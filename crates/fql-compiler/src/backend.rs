//! Capabilities a query backend provides to the compiler.

use crate::error::BackendError;
use fql_syntax::ast::{AggregateFunction, ComparisonOperator, JoinType, Literal, PathOperand};

/// What an aggregate function is applied to.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateTarget<E> {
    /// `COUNT(*)`: the implicit row, no field reference.
    Wildcard,
    Field(E),
}

/// A storage or query engine the filter AST can be compiled into.
///
/// The compiler is written against this trait only. `Expr` is whatever the
/// backend uses for a value (field reference, constant, aggregate) and
/// `Condition` is its boolean predicate.
pub trait Backend {
    type Expr;
    type Condition;

    /// Resolves a dotted path into a field reference.
    ///
    /// Every segment but the last is a relation traversed with `join`.
    /// A traversal already created for the same relation under the same
    /// parent must be reused, never duplicated.
    fn resolve_field(
        &mut self,
        path: &PathOperand,
        join: JoinType,
    ) -> Result<Self::Expr, BackendError>;

    fn literal(&mut self, value: &Literal) -> Self::Expr;

    /// Binary comparison; `op` is one of `=`, `!=`, `<`, `<=`, `>`, `>=`.
    fn compare(
        &mut self,
        op: ComparisonOperator,
        left: Self::Expr,
        right: Self::Expr,
    ) -> Self::Condition;

    fn is_null(&mut self, expr: Self::Expr) -> Self::Condition;

    fn is_not_null(&mut self, expr: Self::Expr) -> Self::Condition;

    /// Inclusive range test. Bounds are passed in the order written.
    fn between(&mut self, expr: Self::Expr, low: Self::Expr, high: Self::Expr) -> Self::Condition;

    fn member_of(&mut self, expr: Self::Expr, values: Vec<Self::Expr>) -> Self::Condition;

    fn aggregate(
        &mut self,
        function: AggregateFunction,
        target: AggregateTarget<Self::Expr>,
    ) -> Result<Self::Expr, BackendError>;

    fn and(&mut self, left: Self::Condition, right: Self::Condition) -> Self::Condition;

    fn or(&mut self, left: Self::Condition, right: Self::Condition) -> Self::Condition;

    /// Condition that is always true.
    fn identity(&mut self) -> Self::Condition;

    /// Called once with every GROUP BY expression, in declaration order.
    /// Not called when the query has no GROUP BY.
    fn apply_group_by(&mut self, exprs: &[Self::Expr]);

    /// Called once with the compiled HAVING condition, if there is one.
    fn apply_having(&mut self, condition: &Self::Condition);
}
