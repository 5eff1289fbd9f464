use fql_compiler::CompileError;
use fql_sql::SchemaError;
use fql_syntax::errors::FqlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to compile the query: {0}")]
    Query(#[from] FqlError),

    #[error("Query rejected with {0} error(s)")]
    Rejected(usize),

    #[error("Failed to translate the query: {0}")]
    Compile(#[from] CompileError),

    #[error("Failed to load the schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
