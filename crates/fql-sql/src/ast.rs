//! Defines the SQL tree a compiled filter query is rendered from.

use fql_syntax::ast::{AggregateFunction, ComparisonOperator, JoinType, Literal};

/// A column qualified by the alias of the table it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub alias: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpr {
    Column(Column),
    /// Always rendered as a bound parameter.
    Param(Literal),
    /// `None` argument is `COUNT(*)`.
    Aggregate {
        function: AggregateFunction,
        arg: Option<Box<SqlExpr>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlCondition {
    /// `1 = 1`
    True,
    Compare {
        op: ComparisonOperator,
        left: SqlExpr,
        right: SqlExpr,
    },
    IsNull(SqlExpr),
    IsNotNull(SqlExpr),
    Between {
        expr: SqlExpr,
        low: SqlExpr,
        high: SqlExpr,
    },
    In {
        expr: SqlExpr,
        values: Vec<SqlExpr>,
    },
    And(Box<SqlCondition>, Box<SqlCondition>),
    Or(Box<SqlCondition>, Box<SqlCondition>),
}

impl SqlCondition {
    pub fn is_true(&self) -> bool {
        matches!(self, SqlCondition::True)
    }
}

/// `{kind} JOIN table AS alias ON parent_alias.local_key = alias.foreign_key`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub kind: JoinType,
    pub table: String,
    pub alias: String,
    pub parent_alias: String,
    pub local_key: String,
    pub foreign_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub alias: String,
    pub joins: Vec<JoinClause>,
    pub where_clause: Option<SqlCondition>,
    pub group_by: Vec<SqlExpr>,
    pub having: Option<SqlCondition>,
}
