#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]

mod config;
mod datasource;
mod error;
mod health;
mod query;

pub use config::{DataSourceInstanceSettings, DatasourceConfig, PASSWORD_KEY};
pub use datasource::Datasource;
pub use error::{ConfigError, HealthCheckError, QueryError, ResponseStatus};
pub use health::{CheckHealthResult, HealthStatus, HEALTH_CHECK_QUERY, HEALTH_CHECK_TIMEOUT};
pub use query::{DataQuery, DataResponse, QueryDataRequest, QueryDataResponse, QueryModel};

pub mod model {
    pub use sparql_datasource_model::*;
}

pub mod client {
    pub use sparql_datasource_client::*;
}
