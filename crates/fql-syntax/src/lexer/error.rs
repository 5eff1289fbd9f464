use crate::grammar::Rule;
use pest::error::Error as PestError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unrecognized input '{text}' at line {line}, column {column}")]
    Unrecognized {
        text: String,
        offset: usize,
        line: usize,
        column: usize,
    },

    #[error("Tokenizer failure at line {line}, column {column}: {message}")]
    Grammar {
        message: String,
        offset: usize,
        line: usize,
        column: usize,
    },
}

impl LexError {
    pub fn from_pest_error(err: PestError<Rule>) -> Self {
        use pest::error::{InputLocation, LineColLocation};

        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };
        let offset = match err.location {
            InputLocation::Pos(p) => p,
            InputLocation::Span((start, _)) => start,
        };

        LexError::Grammar {
            message: err.variant.message().into_owned(),
            offset,
            line,
            column,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            LexError::Unrecognized { offset, .. } | LexError::Grammar { offset, .. } => *offset,
        }
    }
}
