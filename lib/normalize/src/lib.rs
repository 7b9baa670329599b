//! Normalization of SPARQL query results into a [`ResultTable`](sparql_datasource_model::ResultTable).
//!
//! Graph results (`CONSTRUCT` and `DESCRIBE`) become a table with a `subject`, a `predicate` and an
//! `object` column. Tabular results become one column per projected variable (`SELECT`) or a
//! single `boolean` column (`ASK`).

mod graph;
mod tabular;

pub use graph::{normalize_graph, OBJECT_COLUMN, PREDICATE_COLUMN, SUBJECT_COLUMN};
pub use tabular::{normalize_tabular, BOOLEAN_COLUMN};
