use crate::RepositoryError;
use async_trait::async_trait;
use sparql_datasource_model::{TabularResult, Triple};

/// A remote SPARQL endpoint.
///
/// A repository is shared by every query of every request of a data source instance, hence it must
/// be usable concurrently.
#[async_trait]
pub trait SparqlRepository: Send + Sync {
    /// Executes a `CONSTRUCT` or `DESCRIBE` query and returns the triples in document order.
    async fn construct(&self, query: &str) -> Result<Vec<Triple>, RepositoryError>;

    /// Executes a `SELECT` or `ASK` query.
    async fn query(&self, query: &str) -> Result<TabularResult, RepositoryError>;
}
