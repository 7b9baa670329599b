mod error;
mod http;
mod repository;
mod results;

pub use error::RepositoryError;
pub use http::{Credentials, HttpSparqlRepository, HttpSparqlRepositoryOptions, DEFAULT_TIMEOUT};
pub use repository::SparqlRepository;
pub use results::{parse_query_results, parse_triples};
