use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operators a filter condition can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Between,
    IsNull,
    IsNotNull,
}

impl ComparisonOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Lte => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Gte => ">=",
            ComparisonOperator::In => "IN",
            ComparisonOperator::Between => "BETWEEN",
            ComparisonOperator::IsNull => "IS NULL",
            ComparisonOperator::IsNotNull => "IS NOT NULL",
        }
    }

    /// Resolves an operator from its symbol or keyword, ignoring case.
    pub fn from_symbol(value: &str) -> Option<Self> {
        const ALL: [ComparisonOperator; 10] = [
            ComparisonOperator::Eq,
            ComparisonOperator::Ne,
            ComparisonOperator::Lt,
            ComparisonOperator::Lte,
            ComparisonOperator::Gt,
            ComparisonOperator::Gte,
            ComparisonOperator::In,
            ComparisonOperator::Between,
            ComparisonOperator::IsNull,
            ComparisonOperator::IsNotNull,
        ];
        ALL.into_iter()
            .find(|op| op.symbol().eq_ignore_ascii_case(value))
    }

    /// `true` for the six operators a binary comparison accepts.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            ComparisonOperator::Eq
                | ComparisonOperator::Ne
                | ComparisonOperator::Lt
                | ComparisonOperator::Lte
                | ComparisonOperator::Gt
                | ComparisonOperator::Gte
        )
    }

    pub fn is_unary(self) -> bool {
        matches!(
            self,
            ComparisonOperator::IsNull | ComparisonOperator::IsNotNull
        )
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Aggregate functions usable as operands and GROUP BY items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunction {
    pub fn name(self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "COUNT" => Some(AggregateFunction::Count),
            "SUM" => Some(AggregateFunction::Sum),
            "AVG" => Some(AggregateFunction::Avg),
            "MIN" => Some(AggregateFunction::Min),
            "MAX" => Some(AggregateFunction::Max),
            _ => None,
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a relation crossed by a path is traversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
}

impl JoinType {
    pub fn from_keyword(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "INNER" => Some(JoinType::Inner),
            "LEFT" => Some(JoinType::Left),
            "RIGHT" => Some(JoinType::Right),
            _ => None,
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER JOIN"),
            JoinType::Left => write!(f, "LEFT JOIN"),
            JoinType::Right => write!(f, "RIGHT JOIN"),
        }
    }
}
