use crate::lexer::{error::LexError, token::Token};
use std::fmt;
use thiserror::Error;

/// Grammar violation found by the parser.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Syntax error at line {line}, column {column}: {message}")]
pub struct SyntaxError {
    pub message: String,
    /// Text of the offending token (empty at end of input).
    pub found: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            found: token.lexeme.clone(),
            offset: token.offset,
            line: token.line,
            column: token.column,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.offset(),
            ParseError::Syntax(err) => err.offset,
        }
    }
}

/// Ordered collection of every lexical and syntax error found in one query.
///
/// A query with a non-empty collector is rejected as a whole; no partial AST
/// is ever built from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorCollector {
    errors: Vec<ParseError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: impl Into<ParseError>) {
        self.errors.push(error.into());
    }

    /// Records a syntax error unless one was already reported at the same
    /// offset, which keeps a single mistake from cascading.
    pub fn add_syntax(&mut self, error: SyntaxError) -> bool {
        let duplicate = self.errors.iter().any(|existing| {
            matches!(existing, ParseError::Syntax(s) if s.offset == error.offset)
        });
        if !duplicate {
            self.errors.push(ParseError::Syntax(error));
        }
        !duplicate
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.is_empty()
    }

    pub fn merge(&mut self, other: ErrorCollector) {
        self.errors.extend(other.errors);
        self.errors.sort_by_key(ParseError::offset);
    }
}

impl fmt::Display for ErrorCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "No syntax errors");
        }

        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }

        Ok(())
    }
}

impl IntoIterator for ErrorCollector {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Error type for AST building.
///
/// Only raised when the parse tree holds something the grammar should have
/// rejected, i.e. the parser and the builder disagree.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("AST build error at offset {offset}: {message}")]
pub struct BuildError {
    pub message: String,
    pub offset: usize,
}

impl BuildError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

#[derive(Error, Debug)]
pub enum FqlError {
    #[error("Query rejected with {count} error(s):\n{0}", count = .0.len())]
    Rejected(ErrorCollector),

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl FqlError {
    pub fn errors(&self) -> Option<&ErrorCollector> {
        match self {
            FqlError::Rejected(errors) => Some(errors),
            FqlError::Build(_) => None,
        }
    }
}
