#![cfg(test)]

use async_trait::async_trait;
use sparql_datasource::client::{RepositoryError, SparqlRepository};
use sparql_datasource::model::{TabularResult, TermFormat, Triple};
use sparql_datasource::{Datasource, HealthStatus, HEALTH_CHECK_QUERY};
use std::sync::Arc;

/// Answers every query with the same outcome.
struct ProbedRepository {
    answer: Option<bool>,
}

#[async_trait]
impl SparqlRepository for ProbedRepository {
    async fn construct(&self, _query: &str) -> Result<Vec<Triple>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn query(&self, query: &str) -> Result<TabularResult, RepositoryError> {
        assert_eq!(query, HEALTH_CHECK_QUERY);
        match self.answer {
            Some(answer) => Ok(TabularResult::from_boolean(answer)),
            None => Err(RepositoryError::Status {
                status: 503,
                body: "Service Unavailable".to_owned(),
            }),
        }
    }
}

fn datasource(answer: Option<bool>) -> Datasource {
    Datasource::with_repository(Arc::new(ProbedRepository { answer }), TermFormat::Plain)
}

#[tokio::test]
async fn test_healthy_endpoint() {
    let result = datasource(Some(true)).check_health().await;
    assert!(result.is_ok());
    assert_eq!(result.message, "SPARQL endpoint is healthy");
}

#[tokio::test]
async fn test_empty_endpoint() {
    let result = datasource(Some(false)).check_health().await;
    assert_eq!(result.status, HealthStatus::Error);
    assert_eq!(
        result.message,
        "SPARQL endpoint did not return a valid response"
    );
}

#[tokio::test]
async fn test_failing_endpoint() {
    let result = datasource(None).check_health().await;
    assert_eq!(result.status, HealthStatus::Error);
    assert_eq!(
        result.message,
        "Failed to execute health check query: The endpoint answered with HTTP status 503: Service Unavailable"
    );
}

#[tokio::test]
async fn test_health_result_json() -> Result<(), serde_json::Error> {
    let result = datasource(Some(true)).check_health().await;
    assert_eq!(
        serde_json::to_string(&result)?,
        r#"{"status":"OK","message":"SPARQL endpoint is healthy"}"#
    );
    Ok(())
}
