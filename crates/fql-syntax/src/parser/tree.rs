//! Concrete parse result.
//!
//! Mirrors the grammar productions one to one and keeps the tokens they were
//! built from; the builder turns it into the canonical AST.

use crate::lexer::token::Token;

/// `orExpr groupByClause? havingClause?`
#[derive(Debug, Clone, PartialEq)]
pub struct RootQuery {
    pub where_expr: OrExpr,
    pub group_by: Option<GroupByClause>,
    pub having: Option<OrExpr>,
}

/// `andExpr (OR andExpr)*`
#[derive(Debug, Clone, PartialEq)]
pub struct OrExpr {
    pub terms: Vec<AndExpr>,
}

/// `primary (AND primary)*`
#[derive(Debug, Clone, PartialEq)]
pub struct AndExpr {
    pub terms: Vec<Primary>,
}

/// `'(' orExpr ')' | comparison`
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    Paren(Box<OrExpr>),
    Comparison(Comparison),
}

/// `[joinType] selectable comparisonRest`
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub join_type: Option<Token>,
    pub left: Selectable,
    pub rest: ComparisonRest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonRest {
    Simple { operator: Token, value: Value },
    In { values: Vec<Value> },
    Between { start: Value, end: Value },
    Null,
    NotNull,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selectable {
    Path(PathNode),
    Aggregate(AggregateNode),
}

/// `identifier ('.' identifier)*`
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub identifiers: Vec<Token>,
}

/// `(COUNT|SUM|AVG|MIN|MAX) '(' ('*' | path) ')'`; `argument` is `None`
/// for `*`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateNode {
    pub function: Token,
    pub argument: Option<PathNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Path(PathNode),
    Aggregate(AggregateNode),
    String(Token),
    Number(Token),
}

/// `GROUP BY groupItem (',' groupItem)*`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupByClause {
    pub items: Vec<Selectable>,
}
