#![allow(clippy::print_stdout)]
use crate::cli::{Args, Command, Connection, OutputFormat};
use anyhow::{bail, Context};
use clap::Parser;
use datafusion::arrow::util::pretty::pretty_format_batches;
use sparql_datasource::{
    DataQuery, DataSourceInstanceSettings, Datasource, QueryDataRequest, QueryDataResponse,
};
use std::fs;
use std::io::stderr;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(stderr)
        .init();

    let matches = Args::parse();
    match matches.command {
        Command::Query {
            connection,
            queries,
            query_files,
            format,
            timeout_ms,
        } => {
            let datasource = connect(connection)?;
            let texts = read_queries(queries, query_files)?;
            if texts.is_empty() {
                bail!("At least one query must be given with --query or --query-file")
            }

            let ref_ids = (0..texts.len()).map(ref_id).collect::<Vec<_>>();
            let queries = ref_ids
                .iter()
                .zip(&texts)
                .map(|(ref_id, text)| {
                    let json = serde_json::json!({ "refId": ref_id, "queryText": text });
                    Ok(DataQuery::new(ref_id, serde_json::to_vec(&json)?))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            let mut request = QueryDataRequest::new(queries);
            if let Some(timeout_ms) = timeout_ms {
                request = request.with_timeout(Duration::from_millis(timeout_ms));
            }

            let response = datasource.query_data(request).await;
            match format {
                OutputFormat::Table => print_tables(&ref_ids, &response)?,
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
            }

            let failed = response
                .responses
                .values()
                .filter(|response| response.error.is_some())
                .count();
            if failed > 0 {
                bail!("{failed} of {} queries failed", ref_ids.len())
            }
            Ok(())
        }
        Command::CheckHealth { connection } => {
            let result = connect(connection)?.check_health().await;
            println!("{}", serde_json::to_string(&result)?);
            if !result.is_ok() {
                bail!("{}", result.message)
            }
            Ok(())
        }
    }
}

fn connect(connection: Connection) -> anyhow::Result<Datasource> {
    let json_data = fs::read(&connection.config).with_context(|| {
        format!(
            "Failed to read the settings file {}",
            connection.config.display()
        )
    })?;
    let mut settings = DataSourceInstanceSettings::new(json_data);
    if let Some(password) = connection.password {
        settings = settings.with_password(password);
    }
    Datasource::new(&settings)
        .with_context(|| format!("Invalid settings in {}", connection.config.display()))
}

fn read_queries(queries: Vec<String>, query_files: Vec<PathBuf>) -> anyhow::Result<Vec<String>> {
    let mut texts = queries;
    for file in query_files {
        texts.push(
            fs::read_to_string(&file)
                .with_context(|| format!("Failed to read the query file {}", file.display()))?,
        );
    }
    Ok(texts)
}

fn print_tables(ref_ids: &[String], response: &QueryDataResponse) -> anyhow::Result<()> {
    for ref_id in ref_ids {
        let Some(response) = response.responses.get(ref_id) else {
            continue;
        };
        println!("{ref_id}:");
        if let Some(error) = &response.error {
            println!("error: {error}");
        }
        for frame in &response.frames {
            println!("{}", pretty_format_batches(&[frame.to_record_batch()?])?);
        }
    }
    Ok(())
}

/// Names the query at `index` like a spreadsheet column: A, B, ..., Z, AA, AB, ...
fn ref_id(index: usize) -> String {
    let mut name = Vec::new();
    let mut rest = index + 1;
    while rest > 0 {
        rest -= 1;
        name.push(b'A' + u8::try_from(rest % 26).unwrap_or_default());
        rest /= 26;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}
