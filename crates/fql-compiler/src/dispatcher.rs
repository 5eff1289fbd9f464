use crate::{
    backend::{AggregateTarget, Backend},
    error::CompileError,
};
use fql_syntax::ast::{
    AggregateFunction, AggregateOperand, AstSpec, BetweenComparisonSpec, BinaryComparisonSpec,
    ComparisonOperator, InComparisonSpec, JoinType, LogicalAndSpec, LogicalOrSpec, Operand,
    QuerySpec, SpecVisitor, UnaryComparisonSpec,
};
use tracing::{debug, trace};

/// Result of compiling a [`QuerySpec`] against one backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery<C, E> {
    /// The WHERE condition.
    pub primary: C,
    /// The HAVING condition, or the backend identity when there is none.
    pub having: C,
    /// GROUP BY expressions in declaration order; empty when absent.
    pub group_by: Vec<E>,
}

/// Compiles a query into the backend's native conditions.
pub fn apply<B: Backend>(
    query: &QuerySpec,
    backend: &mut B,
) -> Result<CompiledQuery<B::Condition, B::Expr>, CompileError> {
    let mut compiler = Compiler::new(backend);
    let primary = query.accept(&mut compiler)?;

    let having = match compiler.having.take() {
        Some(having) => having,
        None => compiler.backend.identity(),
    };

    Ok(CompiledQuery {
        primary,
        having,
        group_by: std::mem::take(&mut compiler.group_by),
    })
}

/// Visitor that walks the AST and drives a [`Backend`].
///
/// Visiting a condition node yields its compiled condition. Visiting the
/// query yields the WHERE condition and leaves the HAVING condition and the
/// GROUP BY expressions on the compiler.
pub struct Compiler<'a, B: Backend> {
    backend: &'a mut B,
    having: Option<B::Condition>,
    group_by: Vec<B::Expr>,
}

impl<'a, B: Backend> Compiler<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self {
            backend,
            having: None,
            group_by: Vec::new(),
        }
    }

    /// Compiles a single condition tree.
    pub fn compile(&mut self, spec: &AstSpec) -> Result<B::Condition, CompileError> {
        spec.accept(self)
    }

    fn fold(
        &mut self,
        children: &[AstSpec],
        combine: fn(&mut B, B::Condition, B::Condition) -> B::Condition,
    ) -> Result<B::Condition, CompileError> {
        let mut children = children.iter();
        let Some(first) = children.next() else {
            return Ok(self.backend.identity());
        };

        let mut acc = first.accept(self)?;
        for child in children {
            let next = child.accept(self)?;
            acc = combine(&mut *self.backend, acc, next);
        }
        Ok(acc)
    }

    fn resolve(&mut self, operand: &Operand, join: JoinType) -> Result<B::Expr, CompileError> {
        match operand {
            Operand::Path(path) if path.is_wildcard() => Err(CompileError::MisplacedWildcard),
            Operand::Path(path) => Ok(self.backend.resolve_field(path, join)?),
            Operand::Literal(value) => Ok(self.backend.literal(value)),
            Operand::Aggregate(aggregate) => self.resolve_aggregate(aggregate, join),
        }
    }

    fn resolve_aggregate(
        &mut self,
        aggregate: &AggregateOperand,
        join: JoinType,
    ) -> Result<B::Expr, CompileError> {
        let path = aggregate.path();
        let target = match (aggregate.function(), path.is_wildcard()) {
            (AggregateFunction::Count, true) => AggregateTarget::Wildcard,
            (_, true) => return Err(CompileError::MisplacedWildcard),
            (_, false) => AggregateTarget::Field(self.backend.resolve_field(path, join)?),
        };
        Ok(self.backend.aggregate(aggregate.function(), target)?)
    }
}

impl<B: Backend> SpecVisitor for Compiler<'_, B> {
    type Output = Result<B::Condition, CompileError>;

    fn visit_query(&mut self, query: &QuerySpec) -> Self::Output {
        let primary = query.where_spec().accept(self)?;

        if let Some(having) = query.having_spec() {
            let condition = having.accept(self)?;
            self.backend.apply_having(&condition);
            self.having = Some(condition);
        }

        if let Some(group_by) = query.group_by()
            && !group_by.is_empty()
        {
            let exprs = group_by
                .items()
                .iter()
                .map(|item| self.resolve(item, JoinType::Inner))
                .collect::<Result<Vec<_>, _>>()?;
            self.backend.apply_group_by(&exprs);
            self.group_by = exprs;
        }

        debug!(
            having = self.having.is_some(),
            group_by = self.group_by.len(),
            "compiled filter query"
        );
        Ok(primary)
    }

    fn visit_logical_or(&mut self, spec: &LogicalOrSpec) -> Self::Output {
        trace!(children = spec.children().len(), "visit OR");
        self.fold(spec.children(), B::or)
    }

    fn visit_logical_and(&mut self, spec: &LogicalAndSpec) -> Self::Output {
        trace!(children = spec.children().len(), "visit AND");
        self.fold(spec.children(), B::and)
    }

    fn visit_binary_comparison(&mut self, spec: &BinaryComparisonSpec) -> Self::Output {
        trace!(left = %spec.left(), operator = %spec.operator(), right = %spec.right(), "visit comparison");
        if !spec.operator().is_binary() {
            return Err(CompileError::UnsupportedOperator {
                operator: spec.operator(),
                context: "a binary comparison",
            });
        }

        let left = self.resolve(spec.left(), spec.join_type())?;
        let right = self.resolve(spec.right(), spec.join_type())?;
        Ok(self.backend.compare(spec.operator(), left, right))
    }

    fn visit_in_comparison(&mut self, spec: &InComparisonSpec) -> Self::Output {
        trace!(left = %spec.left(), values = spec.values().len(), "visit IN");
        let left = self.resolve(spec.left(), spec.join_type())?;
        let values = spec
            .values()
            .iter()
            .map(|value| self.resolve(value, spec.join_type()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.backend.member_of(left, values))
    }

    fn visit_between_comparison(&mut self, spec: &BetweenComparisonSpec) -> Self::Output {
        trace!(left = %spec.left(), from = %spec.from(), to = %spec.to(), "visit BETWEEN");
        let left = self.resolve(spec.left(), spec.join_type())?;
        let low = self.resolve(spec.from(), spec.join_type())?;
        let high = self.resolve(spec.to(), spec.join_type())?;
        Ok(self.backend.between(left, low, high))
    }

    fn visit_unary_comparison(&mut self, spec: &UnaryComparisonSpec) -> Self::Output {
        trace!(left = %spec.left(), operator = %spec.operator(), "visit null check");
        let expr = self.resolve(spec.left(), spec.join_type())?;
        match spec.operator() {
            ComparisonOperator::IsNull => Ok(self.backend.is_null(expr)),
            ComparisonOperator::IsNotNull => Ok(self.backend.is_not_null(expr)),
            operator => Err(CompileError::UnsupportedOperator {
                operator,
                context: "a null check",
            }),
        }
    }
}
