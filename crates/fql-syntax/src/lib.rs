pub mod ast;
pub mod builder;
pub mod errors;
pub mod grammar;
pub mod lexer;
pub mod parser;

use crate::{
    ast::QuerySpec,
    errors::{ErrorCollector, FqlError},
    lexer::Lexer,
};
use tracing::debug;

pub use errors::{BuildError, ParseError, SyntaxError};

/// Compiles a raw filter string into its canonical [`QuerySpec`].
///
/// Blank input yields [`QuerySpec::neutral`]. Any lexical or syntax error
/// rejects the whole query with every error found, ordered by offset.
pub fn compile(raw: &str) -> Result<QuerySpec, FqlError> {
    if raw.trim().is_empty() {
        debug!("blank filter query, using neutral spec");
        return Ok(QuerySpec::neutral());
    }

    let mut lexer = Lexer::new();
    let tokens = lexer.tokenize(raw);

    let mut errors = ErrorCollector::new();
    for error in lexer.take_errors() {
        errors.add(error);
    }

    let (root, syntax_errors) = parser::parse(tokens);
    errors.merge(syntax_errors);

    if errors.has_errors() {
        debug!(errors = errors.len(), "filter query rejected");
        return Err(FqlError::Rejected(errors));
    }

    Ok(builder::build_query(&root)?)
}
