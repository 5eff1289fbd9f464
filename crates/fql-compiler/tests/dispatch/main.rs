//! Dispatch tests
//!
//! The compiler is exercised against two unrelated stub backends: one that
//! records the calls it receives as text, and one that evaluates conditions
//! over in-memory rows.

mod structure;

use fql_syntax::{ast::QuerySpec, compile};

pub fn parse(input: &str) -> QuerySpec {
    match compile(input) {
        Ok(query) => query,
        Err(err) => panic!("failed to compile {input:?}: {err}"),
    }
}
