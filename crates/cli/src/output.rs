use crate::error::CliError;
use fql_sql::SqlQuery;
use fql_syntax::{ast::QuerySpec, errors::ErrorCollector};

pub fn write_ast(query: &QuerySpec, path: &str) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(query)?;
    std::fs::write(path, json)?;
    println!("fingerprint: {}", query.fingerprint()?);
    Ok(())
}

pub fn print_ast(query: &QuerySpec) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(query)?;
    println!("{json}");
    println!("fingerprint: {}", query.fingerprint()?);
    Ok(())
}

pub fn print_errors(errors: &ErrorCollector) {
    for error in errors.errors() {
        println!("{error}");
    }
}

pub fn print_sql(query: &SqlQuery) -> Result<(), CliError> {
    println!("{}", query.sql);
    if !query.params.is_empty() {
        let params = serde_json::to_string(&query.params)?;
        println!("params: {params}");
    }
    Ok(())
}
