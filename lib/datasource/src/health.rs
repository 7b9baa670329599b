use crate::datasource::with_deadline;
use crate::{Datasource, HealthCheckError};
use serde::Serialize;
use std::time::Duration;

/// The query used to probe the endpoint: does it hold any triple at all?
pub const HEALTH_CHECK_QUERY: &str = "ASK WHERE { ?s ?p ?o }";
/// The time the endpoint has to answer the health check query.
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

const HEALTHY_MESSAGE: &str = "SPARQL endpoint is healthy";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Ok,
    Error,
}

/// The outcome of a health check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckHealthResult {
    pub status: HealthStatus,
    pub message: String,
}

impl CheckHealthResult {
    pub fn is_ok(&self) -> bool {
        self.status == HealthStatus::Ok
    }
}

impl From<Result<(), HealthCheckError>> for CheckHealthResult {
    fn from(outcome: Result<(), HealthCheckError>) -> Self {
        match outcome {
            Ok(()) => Self {
                status: HealthStatus::Ok,
                message: HEALTHY_MESSAGE.to_owned(),
            },
            Err(error) => Self {
                status: HealthStatus::Error,
                message: error.to_string(),
            },
        }
    }
}

impl Datasource {
    /// Checks whether the endpoint is reachable and holds data.
    pub async fn check_health(&self) -> CheckHealthResult {
        let outcome = self.probe().await;
        if let Err(error) = &outcome {
            tracing::warn!("SPARQL health check failed: {error}");
        }
        outcome.into()
    }

    async fn probe(&self) -> Result<(), HealthCheckError> {
        let result = with_deadline(
            self.repository().query(HEALTH_CHECK_QUERY),
            Some(HEALTH_CHECK_TIMEOUT),
        )
        .await?;

        if !result.boolean {
            return Err(HealthCheckError::UnexpectedAnswer);
        }
        Ok(())
    }
}
