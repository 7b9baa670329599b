use crate::ConfigError;
use serde::Deserialize;
use sparql_datasource_client::{Credentials, HttpSparqlRepositoryOptions, DEFAULT_TIMEOUT};
use sparql_datasource_model::TermFormat;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// The key of the password in the decrypted secure settings.
pub const PASSWORD_KEY: &str = "password";

/// The settings of a data source instance as handed over by the host.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DataSourceInstanceSettings {
    /// The JSON document with the plain settings.
    pub json_data: Vec<u8>,
    /// The decrypted secret settings.
    pub decrypted_secure_json_data: HashMap<String, String>,
}

impl DataSourceInstanceSettings {
    pub fn new(json_data: Vec<u8>) -> Self {
        Self {
            json_data,
            decrypted_secure_json_data: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.decrypted_secure_json_data
            .insert(PASSWORD_KEY.to_owned(), password.into());
        self
    }
}

impl std::fmt::Debug for DataSourceInstanceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceInstanceSettings")
            .field("json_data", &String::from_utf8_lossy(&self.json_data))
            .field(
                "decrypted_secure_json_data",
                &self.decrypted_secure_json_data.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonData {
    #[serde(default)]
    endpoint: String,
    #[serde(default)]
    username: String,
    timeout_ms: Option<u64>,
    #[serde(default)]
    term_format: TermFormat,
}

/// Holds the configuration of a [`Datasource`](crate::Datasource).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasourceConfig {
    /// The URL of the SPARQL query service.
    pub endpoint: Url,
    /// Credentials sent to the endpoint. Only set if a user name is configured.
    pub credentials: Option<Credentials>,
    /// The maximum duration of a single request to the endpoint.
    pub timeout: Duration,
    /// How terms are written into the result tables.
    pub term_format: TermFormat,
}

impl DatasourceConfig {
    /// Reads the configuration from the settings of an instance.
    pub fn from_settings(settings: &DataSourceInstanceSettings) -> Result<Self, ConfigError> {
        let json_data: JsonData = serde_json::from_slice(&settings.json_data)?;

        let endpoint = json_data.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        let endpoint = Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            source,
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(endpoint.scheme().to_owned()));
        }

        let credentials = (!json_data.username.is_empty()).then(|| Credentials {
            username: json_data.username,
            password: settings
                .decrypted_secure_json_data
                .get(PASSWORD_KEY)
                .cloned()
                .unwrap_or_default(),
        });

        Ok(Self {
            endpoint,
            credentials,
            timeout: json_data
                .timeout_ms
                .map_or(DEFAULT_TIMEOUT, Duration::from_millis),
            term_format: json_data.term_format,
        })
    }

    /// Returns the options for the HTTP repository of this configuration.
    pub fn repository_options(&self) -> HttpSparqlRepositoryOptions {
        HttpSparqlRepositoryOptions {
            endpoint: self.endpoint.clone(),
            credentials: self.credentials.clone(),
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(json: &str) -> DataSourceInstanceSettings {
        DataSourceInstanceSettings::new(json.as_bytes().to_vec())
    }

    #[test]
    fn test_minimal_settings() -> Result<(), ConfigError> {
        let config = DatasourceConfig::from_settings(&settings(
            r#"{ "endpoint": "http://localhost:7878/query" }"#,
        ))?;
        assert_eq!(config.endpoint.as_str(), "http://localhost:7878/query");
        assert_eq!(config.credentials, None);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.term_format, TermFormat::Plain);
        Ok(())
    }

    #[test]
    fn test_full_settings() -> Result<(), ConfigError> {
        let settings = settings(
            r#"{
                "endpoint": "https://example.com/sparql",
                "username": "admin",
                "timeoutMs": 250,
                "termFormat": "ntriples",
                "uid": "ignored"
            }"#,
        )
        .with_password("secret");

        let config = DatasourceConfig::from_settings(&settings)?;
        assert_eq!(
            config.credentials,
            Some(Credentials {
                username: "admin".to_owned(),
                password: "secret".to_owned(),
            })
        );
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.term_format, TermFormat::NTriples);
        assert_eq!(config.repository_options().timeout, config.timeout);
        Ok(())
    }

    #[test]
    fn test_username_without_password() -> Result<(), ConfigError> {
        let config = DatasourceConfig::from_settings(&settings(
            r#"{ "endpoint": "http://localhost/sparql", "username": "reader" }"#,
        ))?;
        assert_eq!(
            config.credentials.map(|c| c.password),
            Some(String::new())
        );
        Ok(())
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            DatasourceConfig::from_settings(&settings("{ endpoint")),
            Err(ConfigError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_missing_endpoint() {
        assert!(matches!(
            DatasourceConfig::from_settings(&settings(r#"{ "username": "admin" }"#)),
            Err(ConfigError::MissingEndpoint)
        ));
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            DatasourceConfig::from_settings(&settings(r#"{ "endpoint": "not a url" }"#)),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            DatasourceConfig::from_settings(&settings(r#"{ "endpoint": "ftp://example.com" }"#)),
            Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let settings = settings(r#"{ "endpoint": "http://localhost/sparql" }"#)
            .with_password("secret");
        assert!(!format!("{settings:?}").contains("secret"));
    }
}
