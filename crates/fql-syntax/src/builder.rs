use crate::{
    ast::{
        literal::Literal,
        operand::{AggregateOperand, Operand},
        operator::{AggregateFunction, ComparisonOperator, JoinType},
        path::PathOperand,
        spec::{
            AstSpec, BetweenComparisonSpec, BinaryComparisonSpec, GroupBy, InComparisonSpec,
            LogicalAndSpec, LogicalOrSpec, QuerySpec, UnaryComparisonSpec,
        },
    },
    errors::BuildError,
    lexer::token::Token,
    parser::tree::{
        AggregateNode, AndExpr, Comparison, ComparisonRest, GroupByClause, OrExpr, PathNode,
        Primary, RootQuery, Selectable, Value,
    },
};

pub type BuildResult<T> = Result<T, BuildError>;

/// Turns an error-free parse tree into the canonical AST.
///
/// Both `where` and `having` come out as `LogicalOr[LogicalAnd[..]]`, even for
/// a single comparison. Join types stay on the comparison they prefix.
pub fn build_query(root: &RootQuery) -> BuildResult<QuerySpec> {
    let where_spec = build_or(&root.where_expr)?;
    let having_spec = root.having.as_ref().map(build_or).transpose()?;
    let group_by = root.group_by.as_ref().map(build_group_by).transpose()?;

    Ok(QuerySpec::new(where_spec, having_spec, group_by))
}

fn build_or(expr: &OrExpr) -> BuildResult<AstSpec> {
    let children = expr
        .terms
        .iter()
        .map(build_and)
        .collect::<BuildResult<Vec<_>>>()?;
    Ok(LogicalOrSpec::new(children).into())
}

fn build_and(expr: &AndExpr) -> BuildResult<AstSpec> {
    let children = expr
        .terms
        .iter()
        .map(build_primary)
        .collect::<BuildResult<Vec<_>>>()?;
    Ok(LogicalAndSpec::new(children).into())
}

fn build_primary(primary: &Primary) -> BuildResult<AstSpec> {
    match primary {
        Primary::Paren(inner) => build_or(inner),
        Primary::Comparison(comparison) => build_comparison(comparison),
    }
}

fn build_comparison(comparison: &Comparison) -> BuildResult<AstSpec> {
    let join_type = match &comparison.join_type {
        Some(token) => JoinType::from_keyword(&token.lexeme).ok_or_else(|| {
            BuildError::new(format!("unknown join type '{}'", token.lexeme), token.offset)
        })?,
        None => JoinType::default(),
    };
    let left = build_selectable(&comparison.left)?;

    let spec = match &comparison.rest {
        ComparisonRest::Simple { operator, value } => {
            let operator = build_operator(operator)?;
            BinaryComparisonSpec::new(left, operator, build_value(value)?, join_type).into()
        }
        ComparisonRest::In { values } => {
            let values = values.iter().map(build_value).collect::<BuildResult<Vec<_>>>()?;
            InComparisonSpec::new(left, values, join_type).into()
        }
        ComparisonRest::Between { start, end } => {
            BetweenComparisonSpec::new(left, build_value(start)?, build_value(end)?, join_type)
                .into()
        }
        ComparisonRest::Null => {
            UnaryComparisonSpec::new(left, ComparisonOperator::IsNull, join_type).into()
        }
        ComparisonRest::NotNull => {
            UnaryComparisonSpec::new(left, ComparisonOperator::IsNotNull, join_type).into()
        }
    };

    Ok(spec)
}

fn build_operator(token: &Token) -> BuildResult<ComparisonOperator> {
    ComparisonOperator::from_symbol(&token.lexeme)
        .filter(|op| op.is_binary())
        .ok_or_else(|| {
            BuildError::new(
                format!("unknown comparison operator '{}'", token.lexeme),
                token.offset,
            )
        })
}

fn build_group_by(clause: &GroupByClause) -> BuildResult<GroupBy> {
    let items = clause
        .items
        .iter()
        .map(build_selectable)
        .collect::<BuildResult<Vec<_>>>()?;
    Ok(GroupBy::new(items))
}

fn build_selectable(selectable: &Selectable) -> BuildResult<Operand> {
    match selectable {
        Selectable::Path(path) => Ok(Operand::Path(build_path(path))),
        Selectable::Aggregate(aggregate) => build_aggregate(aggregate).map(Operand::Aggregate),
    }
}

fn build_value(value: &Value) -> BuildResult<Operand> {
    match value {
        Value::Path(path) => Ok(Operand::Path(build_path(path))),
        Value::Aggregate(aggregate) => build_aggregate(aggregate).map(Operand::Aggregate),
        Value::String(token) => Ok(Operand::Literal(build_string(token))),
        Value::Number(token) => build_number(token).map(Operand::Literal),
    }
}

fn build_path(path: &PathNode) -> PathOperand {
    PathOperand::new(path.identifiers.iter().map(|t| t.lexeme.as_str()))
}

fn build_aggregate(aggregate: &AggregateNode) -> BuildResult<AggregateOperand> {
    let token = &aggregate.function;
    let function = AggregateFunction::from_name(&token.lexeme).ok_or_else(|| {
        BuildError::new(format!("unknown aggregate function '{}'", token.lexeme), token.offset)
    })?;

    let path = match &aggregate.argument {
        Some(path) => build_path(path),
        None if function == AggregateFunction::Count => PathOperand::wildcard(),
        None => {
            return Err(BuildError::new(
                format!("'*' is not a valid argument for {}", function),
                token.offset,
            ));
        }
    };

    Ok(AggregateOperand::new(function, path))
}

/// Strips exactly one leading and one trailing quote; no unescaping.
fn build_string(token: &Token) -> Literal {
    let raw = token.lexeme.as_str();
    let raw = raw.strip_prefix('\'').unwrap_or(raw);
    let raw = raw.strip_suffix('\'').unwrap_or(raw);
    Literal::String(raw.to_string())
}

/// A `.` makes the literal a float, otherwise it must fit an `i64`.
fn build_number(token: &Token) -> BuildResult<Literal> {
    let raw = token.lexeme.as_str();
    if raw.contains('.') {
        raw.parse::<f64>().map(Literal::Float).map_err(|e| {
            BuildError::new(format!("invalid decimal literal '{raw}': {e}"), token.offset)
        })
    } else {
        raw.parse::<i64>().map(Literal::Integer).map_err(|e| {
            BuildError::new(format!("invalid integer literal '{raw}': {e}"), token.offset)
        })
    }
}
