//! Rejection tests
//!
//! Every malformed query must be rejected as a whole, with each problem
//! reported once.

use fql_syntax::{ParseError, compile, errors::FqlError};

mod recovery;

pub fn rejected(input: &str) -> Vec<ParseError> {
    match compile(input) {
        Ok(query) => panic!("expected {input:?} to be rejected, got {query:?}"),
        Err(FqlError::Rejected(errors)) => errors.into_iter().collect(),
        Err(other) => panic!("expected a rejected query for {input:?}, got {other}"),
    }
}
