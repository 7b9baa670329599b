use datafusion::arrow::error::ArrowError;
use thiserror::Error;

/// An error raised while building or converting a [`ResultTable`](crate::ResultTable).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TableError {
    /// A column does not have as many rows as the first column of the table.
    #[error("Column '{column}' has {actual} rows but the table has {expected} rows")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    /// The table could not be turned into an Arrow record batch.
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
