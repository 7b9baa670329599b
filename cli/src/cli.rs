use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "sparql-datasource")]
/// Runs dashboard queries against a SPARQL endpoint
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run SPARQL queries and print their result tables
    ///
    /// Each query is answered independently. Queries are named A, B, C... in the order they are
    /// given.
    Query {
        #[command(flatten)]
        connection: Connection,
        /// Text of a query to run
        #[arg(short, long = "query", value_name = "QUERY")]
        queries: Vec<String>,
        /// File holding a query to run
        #[arg(short = 'f', long = "query-file", value_name = "FILE", value_hint = ValueHint::FilePath)]
        query_files: Vec<PathBuf>,
        /// How the results are printed
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Time each query has to complete, in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Check that the endpoint is reachable and holds data
    CheckHealth {
        #[command(flatten)]
        connection: Connection,
    },
}

#[derive(clap::Args)]
pub struct Connection {
    /// JSON file with the data source settings
    ///
    /// The settings hold the `endpoint` and optionally a `username`, `timeoutMs` and `termFormat`.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: PathBuf,
    /// Password sent along with the configured user name
    #[arg(long, env = "SPARQL_DATASOURCE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty printed tables
    Table,
    /// The JSON document of the responses
    Json,
}
