use oxrdfio::RdfParseError;
use sparesults::QueryResultsParseError;
use std::time::Duration;

/// An error raised while executing a query against a remote endpoint.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RepositoryError {
    /// The HTTP request could not be sent or its response could not be read.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    /// The endpoint answered with an unsuccessful HTTP status.
    #[error("The endpoint answered with HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    /// The content media type of the response is not supported.
    #[error("The content media type {0} is not supported")]
    UnsupportedContentType(String),
    /// An error while parsing a SPARQL query results document.
    #[error(transparent)]
    ResultsParsing(#[from] QueryResultsParseError),
    /// An error while parsing an RDF document.
    #[error(transparent)]
    GraphParsing(#[from] RdfParseError),
    /// The digest challenge of the endpoint could not be answered.
    #[error("Failed to answer the digest authentication challenge: {0}")]
    DigestAuthentication(#[from] digest_auth::Error),
    /// The endpoint did not answer in time.
    #[error("The endpoint did not answer within {0:?}")]
    Timeout(Duration),
}
