use crate::ast::spec::{
    AstSpec, BetweenComparisonSpec, BinaryComparisonSpec, InComparisonSpec, LogicalAndSpec,
    LogicalOrSpec, QuerySpec, UnaryComparisonSpec,
};

/// Double-dispatch target for the filter AST: one method per node kind.
pub trait SpecVisitor {
    type Output;

    fn visit_query(&mut self, query: &QuerySpec) -> Self::Output;
    fn visit_logical_or(&mut self, spec: &LogicalOrSpec) -> Self::Output;
    fn visit_logical_and(&mut self, spec: &LogicalAndSpec) -> Self::Output;
    fn visit_binary_comparison(&mut self, spec: &BinaryComparisonSpec) -> Self::Output;
    fn visit_in_comparison(&mut self, spec: &InComparisonSpec) -> Self::Output;
    fn visit_between_comparison(&mut self, spec: &BetweenComparisonSpec) -> Self::Output;
    fn visit_unary_comparison(&mut self, spec: &UnaryComparisonSpec) -> Self::Output;
}

impl AstSpec {
    pub fn accept<V: SpecVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            AstSpec::LogicalOr(spec) => visitor.visit_logical_or(spec),
            AstSpec::LogicalAnd(spec) => visitor.visit_logical_and(spec),
            AstSpec::BinaryComparison(spec) => visitor.visit_binary_comparison(spec),
            AstSpec::InComparison(spec) => visitor.visit_in_comparison(spec),
            AstSpec::BetweenComparison(spec) => visitor.visit_between_comparison(spec),
            AstSpec::UnaryComparison(spec) => visitor.visit_unary_comparison(spec),
        }
    }
}

impl QuerySpec {
    pub fn accept<V: SpecVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_query(self)
    }
}
