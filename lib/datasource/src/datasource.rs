use crate::{ConfigError, DataSourceInstanceSettings, DatasourceConfig};
use sparql_datasource_client::{HttpSparqlRepository, RepositoryError, SparqlRepository};
use sparql_datasource_model::TermFormat;
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// A data source instance bound to one SPARQL endpoint.
///
/// The instance is created whenever the settings change. Cloning is cheap: all clones share the
/// same repository, which is only ever read.
#[derive(Clone)]
pub struct Datasource {
    repository: Arc<dyn SparqlRepository>,
    term_format: TermFormat,
}

impl Datasource {
    /// Creates a new instance that queries the endpoint configured in `settings`.
    pub fn new(settings: &DataSourceInstanceSettings) -> Result<Self, ConfigError> {
        let config = DatasourceConfig::from_settings(settings)?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &DatasourceConfig) -> Result<Self, ConfigError> {
        let repository = HttpSparqlRepository::try_new(config.repository_options())?;
        tracing::info!(endpoint = %config.endpoint, "Created SPARQL data source");
        Ok(Self::with_repository(
            Arc::new(repository),
            config.term_format,
        ))
    }

    /// Creates a new instance on top of an existing repository.
    pub fn with_repository(repository: Arc<dyn SparqlRepository>, term_format: TermFormat) -> Self {
        Self {
            repository,
            term_format,
        }
    }

    pub fn term_format(&self) -> TermFormat {
        self.term_format
    }

    pub(crate) fn repository(&self) -> &dyn SparqlRepository {
        self.repository.as_ref()
    }
}

impl Debug for Datasource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Datasource")
            .field("term_format", &self.term_format)
            .finish_non_exhaustive()
    }
}

/// Awaits `future`, failing with [`RepositoryError::Timeout`] once `deadline` has passed.
pub(crate) async fn with_deadline<T>(
    future: impl Future<Output = Result<T, RepositoryError>>,
    deadline: Option<Duration>,
) -> Result<T, RepositoryError> {
    match deadline {
        None => future.await,
        Some(deadline) => tokio::time::timeout(deadline, future)
            .await
            .map_err(|_| RepositoryError::Timeout(deadline))?,
    }
}
