use crate::{commands::Commands, error::CliError};
use clap::Parser;
use fql_sql::schema::Schema;
use fql_syntax::errors::FqlError;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "fql", version = "0.1.0", about = "Filter query language tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    // Initialize logger
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Ast { query, output } => {
            let spec = fql_syntax::compile(&query)?;
            match output {
                Some(path) => output::write_ast(&spec, &path)?,
                None => output::print_ast(&spec)?,
            }
        }
        Commands::Check { query } => match fql_syntax::compile(&query) {
            Ok(_) => info!("Query is valid"),
            Err(FqlError::Rejected(errors)) => {
                output::print_errors(&errors);
                return Err(CliError::Rejected(errors.len()));
            }
            Err(err) => return Err(err.into()),
        },
        Commands::Sql {
            query,
            schema,
            dialect,
        } => {
            let schema = Schema::from_path(&schema)?;
            let spec = fql_syntax::compile(&query)?;
            let sql = fql_sql::to_sql(&spec, &schema, dialect.dialect().as_ref())?;
            output::print_sql(&sql)?;
        }
    }

    Ok(())
}
