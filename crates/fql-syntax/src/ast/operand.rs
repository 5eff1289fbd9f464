use crate::ast::{literal::Literal, operator::AggregateFunction, path::PathOperand};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value-producing side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Path(PathOperand),
    Literal(Literal),
    Aggregate(AggregateOperand),
}

impl Operand {
    pub fn path(dotted: &str) -> Self {
        Operand::Path(PathOperand::from_dotted(dotted))
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Operand::Literal(value.into())
    }

    pub fn aggregate(function: AggregateFunction, path: PathOperand) -> Self {
        Operand::Aggregate(AggregateOperand::new(function, path))
    }
}

impl From<PathOperand> for Operand {
    fn from(value: PathOperand) -> Self {
        Operand::Path(value)
    }
}

impl From<Literal> for Operand {
    fn from(value: Literal) -> Self {
        Operand::Literal(value)
    }
}

impl From<AggregateOperand> for Operand {
    fn from(value: AggregateOperand) -> Self {
        Operand::Aggregate(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Path(path) => write!(f, "{}", path),
            Operand::Literal(literal) => write!(f, "{}", literal),
            Operand::Aggregate(aggregate) => write!(f, "{}", aggregate),
        }
    }
}

/// Aggregate function applied to a path, e.g. `SUM(order.amount)`.
///
/// The argument is always a path; the wildcard path is meaningful only for
/// `COUNT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateOperand {
    function: AggregateFunction,
    path: PathOperand,
}

impl AggregateOperand {
    pub fn new(function: AggregateFunction, path: PathOperand) -> Self {
        Self { function, path }
    }

    /// `COUNT(*)`
    pub fn count_all() -> Self {
        Self::new(AggregateFunction::Count, PathOperand::wildcard())
    }

    pub fn function(&self) -> AggregateFunction {
        self.function
    }

    pub fn path(&self) -> &PathOperand {
        &self.path
    }
}

impl fmt::Display for AggregateOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.function, self.path)
    }
}
