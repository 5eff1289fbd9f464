use fql_syntax::ast::ComparisonOperator;
use thiserror::Error;

/// Raised by a backend that cannot map part of a query onto its storage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackendError {
    #[error("Unknown field: {path}")]
    UnknownField { path: String },

    #[error("Unknown relation '{relation}' on '{owner}'")]
    UnknownRelation { owner: String, relation: String },

    #[error("Unsupported by backend: {0}")]
    Unsupported(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error("Operator {operator} is not supported in {context}")]
    UnsupportedOperator {
        operator: ComparisonOperator,
        context: &'static str,
    },

    #[error("Wildcard '*' is only allowed inside COUNT(...)")]
    MisplacedWildcard,

    #[error(transparent)]
    Backend(#[from] BackendError),
}
