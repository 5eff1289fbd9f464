pub mod literal;
pub mod operand;
pub mod operator;
pub mod path;
pub mod spec;
pub mod visitor;

pub use literal::Literal;
pub use operand::{AggregateOperand, Operand};
pub use operator::{AggregateFunction, ComparisonOperator, JoinType};
pub use path::{PathOperand, WILDCARD};
pub use spec::{
    AstSpec, BetweenComparisonSpec, BinaryComparisonSpec, GroupBy, InComparisonSpec,
    LogicalAndSpec, LogicalOrSpec, QuerySpec, UnaryComparisonSpec,
};
pub use visitor::SpecVisitor;
