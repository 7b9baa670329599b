use serde::Serialize;
use sparql_datasource_client::RepositoryError;

/// An error while creating a [`Datasource`](crate::Datasource) from its settings.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The JSON settings are malformed.
    #[error("error unmarshalling JSON data: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// No endpoint has been configured.
    #[error("no SPARQL endpoint is configured")]
    MissingEndpoint,
    /// The endpoint is not an absolute URL.
    #[error("the SPARQL endpoint {endpoint} is not a valid URL: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    /// The endpoint does not use HTTP(S).
    #[error("the SPARQL endpoint must use http or https, not {0}")]
    UnsupportedScheme(String),
    /// The client for the endpoint could not be created.
    #[error("error initializing SPARQL repo: {0}")]
    Client(#[from] RepositoryError),
}

/// The status class of a failed query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseStatus {
    BadRequest,
}

impl ResponseStatus {
    /// The HTTP status code of this status class.
    pub fn code(self) -> u16 {
        match self {
            ResponseStatus::BadRequest => 400,
        }
    }
}

/// An error while answering a single query of a request.
///
/// Errors are confined to their query; the other queries of the request are answered regardless.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryError {
    /// The query JSON could not be decoded.
    #[error("json unmarshal: {0}")]
    Decode(#[from] serde_json::Error),
    /// The endpoint failed to execute the query.
    #[error("SPARQL query execution: {0}")]
    Execution(#[from] RepositoryError),
    /// The task answering the query crashed.
    #[error("the query crashed: {0}")]
    RuntimeFault(String),
}

impl QueryError {
    /// Returns the status class reported to the caller, or [`None`] if the failure is not reported.
    pub fn status(&self) -> Option<ResponseStatus> {
        match self {
            QueryError::Decode(_) | QueryError::Execution(_) => Some(ResponseStatus::BadRequest),
            QueryError::RuntimeFault(_) => None,
        }
    }
}

/// The reason a health check failed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HealthCheckError {
    /// The health check query could not be executed.
    #[error("Failed to execute health check query: {0}")]
    Execution(#[from] RepositoryError),
    /// The endpoint answered that it holds no triple.
    #[error("SPARQL endpoint did not return a valid response")]
    UnexpectedAnswer,
}
