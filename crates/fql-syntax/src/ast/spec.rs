use crate::ast::{
    operand::Operand,
    operator::{ComparisonOperator, JoinType},
};
use serde::{Deserialize, Serialize};

/// A condition node of the filter AST.
///
/// The set of node kinds is closed; every consumer matches on it
/// exhaustively. Nodes are never edited in place, the `with_*` methods return
/// a modified copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AstSpec {
    LogicalOr(LogicalOrSpec),
    LogicalAnd(LogicalAndSpec),
    BinaryComparison(BinaryComparisonSpec),
    InComparison(InComparisonSpec),
    BetweenComparison(BetweenComparisonSpec),
    UnaryComparison(UnaryComparisonSpec),
}

impl From<LogicalOrSpec> for AstSpec {
    fn from(value: LogicalOrSpec) -> Self {
        AstSpec::LogicalOr(value)
    }
}

impl From<LogicalAndSpec> for AstSpec {
    fn from(value: LogicalAndSpec) -> Self {
        AstSpec::LogicalAnd(value)
    }
}

impl From<BinaryComparisonSpec> for AstSpec {
    fn from(value: BinaryComparisonSpec) -> Self {
        AstSpec::BinaryComparison(value)
    }
}

impl From<InComparisonSpec> for AstSpec {
    fn from(value: InComparisonSpec) -> Self {
        AstSpec::InComparison(value)
    }
}

impl From<BetweenComparisonSpec> for AstSpec {
    fn from(value: BetweenComparisonSpec) -> Self {
        AstSpec::BetweenComparison(value)
    }
}

impl From<UnaryComparisonSpec> for AstSpec {
    fn from(value: UnaryComparisonSpec) -> Self {
        AstSpec::UnaryComparison(value)
    }
}

/// Disjunction of child conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalOrSpec {
    children: Vec<AstSpec>,
}

impl LogicalOrSpec {
    pub fn new(children: Vec<AstSpec>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[AstSpec] {
        &self.children
    }
}

/// Conjunction of child conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalAndSpec {
    children: Vec<AstSpec>,
}

impl LogicalAndSpec {
    pub fn new(children: Vec<AstSpec>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[AstSpec] {
        &self.children
    }
}

/// `left <op> right` for one of `= != < <= > >=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryComparisonSpec {
    left: Operand,
    operator: ComparisonOperator,
    right: Operand,
    join_type: JoinType,
}

impl BinaryComparisonSpec {
    pub fn new(
        left: Operand,
        operator: ComparisonOperator,
        right: Operand,
        join_type: JoinType,
    ) -> Self {
        Self {
            left,
            operator,
            right,
            join_type,
        }
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    pub fn right(&self) -> &Operand {
        &self.right
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn with_left(self, left: Operand) -> Self {
        Self { left, ..self }
    }

    pub fn with_operator(self, operator: ComparisonOperator) -> Self {
        Self { operator, ..self }
    }

    pub fn with_right(self, right: Operand) -> Self {
        Self { right, ..self }
    }

    pub fn with_join_type(self, join_type: JoinType) -> Self {
        Self { join_type, ..self }
    }
}

/// `left IN (v1, v2, ...)`; the candidate list is never empty when built by
/// the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InComparisonSpec {
    left: Operand,
    values: Vec<Operand>,
    join_type: JoinType,
}

impl InComparisonSpec {
    pub fn new(left: Operand, values: Vec<Operand>, join_type: JoinType) -> Self {
        Self {
            left,
            values,
            join_type,
        }
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn values(&self) -> &[Operand] {
        &self.values
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn with_left(self, left: Operand) -> Self {
        Self { left, ..self }
    }

    pub fn with_values(self, values: Vec<Operand>) -> Self {
        Self { values, ..self }
    }

    pub fn with_join_type(self, join_type: JoinType) -> Self {
        Self { join_type, ..self }
    }
}

/// `left BETWEEN from AND to`. Bound ordering is not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetweenComparisonSpec {
    left: Operand,
    from: Operand,
    to: Operand,
    join_type: JoinType,
}

impl BetweenComparisonSpec {
    pub fn new(left: Operand, from: Operand, to: Operand, join_type: JoinType) -> Self {
        Self {
            left,
            from,
            to,
            join_type,
        }
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn from(&self) -> &Operand {
        &self.from
    }

    pub fn to(&self) -> &Operand {
        &self.to
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn with_left(self, left: Operand) -> Self {
        Self { left, ..self }
    }

    pub fn with_bounds(self, from: Operand, to: Operand) -> Self {
        Self { from, to, ..self }
    }

    pub fn with_join_type(self, join_type: JoinType) -> Self {
        Self { join_type, ..self }
    }
}

/// `left IS NULL` / `left IS NOT NULL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryComparisonSpec {
    left: Operand,
    operator: ComparisonOperator,
    join_type: JoinType,
}

impl UnaryComparisonSpec {
    pub fn new(left: Operand, operator: ComparisonOperator, join_type: JoinType) -> Self {
        Self {
            left,
            operator,
            join_type,
        }
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn with_left(self, left: Operand) -> Self {
        Self { left, ..self }
    }

    pub fn with_operator(self, operator: ComparisonOperator) -> Self {
        Self { operator, ..self }
    }

    pub fn with_join_type(self, join_type: JoinType) -> Self {
        Self { join_type, ..self }
    }
}

/// Ordered GROUP BY items (paths or aggregates).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupBy {
    items: Vec<Operand>,
}

impl GroupBy {
    pub fn new(items: Vec<Operand>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Operand] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Root of a parsed filter query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    where_spec: AstSpec,
    having_spec: Option<AstSpec>,
    group_by: Option<GroupBy>,
}

impl QuerySpec {
    pub fn new(where_spec: AstSpec, having_spec: Option<AstSpec>, group_by: Option<GroupBy>) -> Self {
        Self {
            where_spec,
            having_spec,
            group_by,
        }
    }

    /// Query matching everything: empty WHERE, no HAVING, no GROUP BY.
    pub fn neutral() -> Self {
        Self::new(AstSpec::LogicalOr(LogicalOrSpec::default()), None, None)
    }

    pub fn where_spec(&self) -> &AstSpec {
        &self.where_spec
    }

    pub fn having_spec(&self) -> Option<&AstSpec> {
        self.having_spec.as_ref()
    }

    pub fn group_by(&self) -> Option<&GroupBy> {
        self.group_by.as_ref()
    }

    pub fn with_where(self, where_spec: AstSpec) -> Self {
        Self { where_spec, ..self }
    }

    pub fn with_having(self, having_spec: Option<AstSpec>) -> Self {
        Self {
            having_spec,
            ..self
        }
    }

    pub fn with_group_by(self, group_by: Option<GroupBy>) -> Self {
        Self { group_by, ..self }
    }

    /// Stable digest of the AST, usable as a cache key for compiled queries.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let serialized = serde_json::to_string(self)?;
        Ok(format!("{:x}", md5::compute(serialized)))
    }
}
