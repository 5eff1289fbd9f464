use clap::{Subcommand, ValueEnum};
use fql_sql::dialect::{Dialect, MySql, Postgres};

#[derive(Subcommand)]
pub enum Commands {
    /// Print the AST of a query as JSON, followed by its fingerprint
    Ast {
        /// Filter query text
        query: String,

        #[arg(
            long,
            help = "If specified, writes the JSON AST to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Report every lexical and syntax error in a query
    Check {
        /// Filter query text
        query: String,
    },
    /// Render a query as parameterised SQL
    Sql {
        /// Filter query text
        query: String,

        #[arg(long, help = "Schema file path (JSON)")]
        schema: String,

        #[arg(long, value_enum, default_value_t = DialectArg::Postgres)]
        dialect: DialectArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    Postgres,
    Mysql,
}

impl DialectArg {
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            DialectArg::Postgres => Box::new(Postgres),
            DialectArg::Mysql => Box::new(MySql),
        }
    }
}
