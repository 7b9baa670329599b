use crate::datasource::with_deadline;
use crate::{Datasource, QueryError, ResponseStatus};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use sparql_datasource_model::ResultTable;
use sparql_datasource_normalize::{normalize_graph, normalize_tabular};
use sparql_datasource_query::{classify, QueryShape};
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::task::JoinSet;

/// A single query of a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataQuery {
    /// Identifies the query within its request.
    pub ref_id: String,
    /// The JSON document describing the query (see [`QueryModel`]).
    pub json: Vec<u8>,
}

impl DataQuery {
    pub fn new(ref_id: impl Into<String>, json: Vec<u8>) -> Self {
        Self {
            ref_id: ref_id.into(),
            json,
        }
    }
}

/// The decoded JSON document of a [`DataQuery`].
///
/// Fields other than `queryText` are set by the host and ignored.
// No `deny_unknown_fields`: the host adds `refId`, `datasource`, `intervalMs` and more to every
// query. Only a missing or mistyped `queryText` fails decoding.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryModel {
    pub query_text: String,
}

/// A batch of queries answered together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryDataRequest {
    pub queries: Vec<DataQuery>,
    /// The time each query has to complete. Dropping the future of
    /// [`Datasource::query_data`] cancels all queries that are still running.
    pub timeout: Option<Duration>,
}

impl QueryDataRequest {
    pub fn new(queries: Vec<DataQuery>) -> Self {
        Self {
            queries,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The answer to a single [`DataQuery`]: either frames or an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DataResponse {
    pub frames: Vec<ResultTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,
}

impl DataResponse {
    pub fn error(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            frames: Vec::new(),
            error: Some(message.into()),
            status: Some(status),
        }
    }

    fn from_outcome(ref_id: &str, outcome: Result<ResultTable, QueryError>) -> Self {
        match outcome {
            Ok(table) => Self {
                frames: vec![table],
                error: None,
                status: None,
            },
            Err(error) => match error.status() {
                Some(status) => {
                    tracing::warn!(ref_id, "SPARQL query failed: {error}");
                    Self::error(status, error.to_string())
                }
                None => {
                    tracing::error!(ref_id, "SPARQL query crashed: {error}");
                    Self::default()
                }
            },
        }
    }
}

/// The answers to all queries of a [`QueryDataRequest`], keyed by their reference id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QueryDataResponse {
    pub responses: BTreeMap<String, DataResponse>,
}

impl Datasource {
    /// Answers all queries of `request`.
    ///
    /// The queries run concurrently and independently of each other. A query that fails or crashes
    /// only affects its own response; a crashed query answers with an empty response.
    pub async fn query_data(&self, request: QueryDataRequest) -> QueryDataResponse {
        let mut tasks = JoinSet::new();
        for (index, query) in request.queries.iter().enumerate() {
            let datasource = self.clone();
            let json = query.json.clone();
            let timeout = request.timeout;
            tasks.spawn(async move {
                let outcome = AssertUnwindSafe(datasource.query(&json, timeout))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| {
                        Err(QueryError::RuntimeFault(panic_message(&*panic)))
                    });
                (index, outcome)
            });
        }

        let mut outcomes = request.queries.iter().map(|_| None).collect::<Vec<_>>();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(error) => tracing::error!("Could not join on query task: {error}"),
            }
        }

        let mut response = QueryDataResponse::default();
        for (query, outcome) in request.queries.iter().zip(outcomes) {
            let data_response = match outcome {
                Some(outcome) => DataResponse::from_outcome(&query.ref_id, outcome),
                None => DataResponse::default(),
            };
            response
                .responses
                .insert(query.ref_id.clone(), data_response);
        }
        response
    }

    /// Decodes, classifies and executes a single query.
    async fn query(
        &self,
        json: &[u8],
        timeout: Option<Duration>,
    ) -> Result<ResultTable, QueryError> {
        let model: QueryModel = serde_json::from_slice(json)?;
        let query = model.query_text.as_str();

        let shape = classify(query);
        tracing::debug!(?shape, "Executing SPARQL query");
        let table = match shape {
            QueryShape::Graph => {
                let triples =
                    with_deadline(self.repository().construct(query), timeout).await?;
                normalize_graph(&triples, self.term_format())
            }
            QueryShape::Tabular => {
                let result = with_deadline(self.repository().query(query), timeout).await?;
                normalize_tabular(&result, self.term_format())
            }
        };
        Ok(table)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
