use crate::results::{parse_query_results, parse_triples};
use crate::{RepositoryError, SparqlRepository};
use async_trait::async_trait;
use digest_auth::AuthContext;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use sparql_datasource_model::{TabularResult, Triple};
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use url::form_urlencoded;
use url::Position;

/// The time a request may take when no timeout is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1500);

const QUERY_RESULTS_ACCEPT: &str = "application/sparql-results+json, \
    application/sparql-results+xml;q=0.9, text/tab-separated-values;q=0.8";
const GRAPH_ACCEPT: &str =
    "application/n-triples, text/turtle;q=0.9, application/rdf+xml;q=0.8";

/// The user name and password sent to the endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Holds the options of an [`HttpSparqlRepository`].
#[derive(Clone, Debug)]
pub struct HttpSparqlRepositoryOptions {
    /// The URL of the SPARQL query service.
    pub endpoint: Url,
    /// Credentials for HTTP basic or digest authentication, if the endpoint requires them.
    pub credentials: Option<Credentials>,
    /// The maximum duration of a single request.
    pub timeout: Duration,
}

impl HttpSparqlRepositoryOptions {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A [`SparqlRepository`] that talks to an endpoint via the
/// [SPARQL 1.1 protocol](https://www.w3.org/TR/sparql11-protocol/).
///
/// Queries are sent as URL-encoded `POST` requests. Credentials are first sent with HTTP basic
/// authentication. If the endpoint rejects them with a digest challenge, the request is repeated
/// once with the digest answer.
#[derive(Clone, Debug)]
pub struct HttpSparqlRepository {
    client: Client,
    endpoint: Url,
    credentials: Option<Credentials>,
}

impl HttpSparqlRepository {
    pub fn try_new(options: HttpSparqlRepositoryOptions) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("sparql-datasource/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: options.endpoint,
            credentials: options.credentials,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request(&self, body: &str, accept: &'static str) -> RequestBuilder {
        self.client
            .post(self.endpoint.clone())
            .header(ACCEPT, accept)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body.to_owned())
    }

    async fn send(&self, query: &str, accept: &'static str) -> Result<Response, RepositoryError> {
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("query", query)
            .finish();

        let mut request = self.request(&body, accept);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }
        let mut response = request.send().await?;

        if let Some(credentials) = &self.credentials {
            if let Some(challenge) = digest_challenge(&response) {
                tracing::debug!(endpoint = %self.endpoint, "Answering digest challenge");
                let authorization = self.digest_authorization(credentials, &challenge, &body)?;
                response = self
                    .request(&body, accept)
                    .header(AUTHORIZATION, authorization)
                    .send()
                    .await?;
            }
        }

        tracing::debug!(
            endpoint = %self.endpoint,
            status = %response.status(),
            "SPARQL endpoint answered"
        );

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn digest_authorization(
        &self,
        credentials: &Credentials,
        challenge: &str,
        body: &str,
    ) -> Result<String, RepositoryError> {
        let uri = &self.endpoint[Position::BeforePath..];
        let context = AuthContext::new_post(
            credentials.username.as_str(),
            credentials.password.as_str(),
            uri,
            Some(body.as_bytes()),
        );
        let mut prompt = digest_auth::parse(challenge)?;
        Ok(prompt.respond(&context)?.to_header_string())
    }
}

/// Returns the digest challenge of a `401 Unauthorized` response, if any.
fn digest_challenge(response: &Response) -> Option<String> {
    if response.status() != StatusCode::UNAUTHORIZED {
        return None;
    }
    response
        .headers()
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| {
            value
                .get(..6)
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case("digest"))
        })
        .map(str::to_owned)
}

#[async_trait]
impl SparqlRepository for HttpSparqlRepository {
    async fn construct(&self, query: &str) -> Result<Vec<Triple>, RepositoryError> {
        let response = self.send(query, GRAPH_ACCEPT).await?;
        let media_type = content_type(&response);
        let body = response.bytes().await?;
        parse_triples(&body, media_type.as_deref())
    }

    async fn query(&self, query: &str) -> Result<TabularResult, RepositoryError> {
        let response = self.send(query, QUERY_RESULTS_ACCEPT).await?;
        let media_type = content_type(&response);
        let body = response.bytes().await?;
        parse_query_results(&body, media_type.as_deref())
    }
}

fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
