pub mod ast;
pub mod backend;
pub mod dialect;
pub mod renderer;
pub mod schema;

use crate::{
    backend::SqlBackend,
    dialect::Dialect,
    renderer::{Render, Renderer},
    schema::Schema,
};
use fql_compiler::{CompileError, apply};
use fql_syntax::ast::{Literal, QuerySpec};
use tracing::debug;

pub use dialect::{MySql, Postgres};
pub use schema::SchemaError;

/// Parameterised SQL produced from a filter query.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Literal>,
}

/// Compiles `query` against `schema` and renders it for `dialect`.
pub fn to_sql(
    query: &QuerySpec,
    schema: &Schema,
    dialect: &dyn Dialect,
) -> Result<SqlQuery, CompileError> {
    let mut backend = SqlBackend::new(schema);
    let compiled = apply(query, &mut backend)?;
    let select = backend.into_select(compiled);

    let mut renderer = Renderer::new(dialect);
    select.render(&mut renderer);
    let (sql, params) = renderer.finish();

    debug!(dialect = %dialect.name(), params = params.len(), "rendered SQL");
    Ok(SqlQuery { sql, params })
}
