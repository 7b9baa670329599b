use crate::TableError;
use datafusion::arrow::array::{
    ArrayRef, BooleanArray, RecordBatch, RecordBatchOptions, StringArray,
};
use datafusion::arrow::datatypes::{DataType, Field, Schema};
use serde::Serialize;
use std::sync::Arc;

/// The name every [`ResultTable`] carries.
pub const RESULT_TABLE_NAME: &str = "response";

/// A query answer in columnar form.
///
/// All columns hold the same number of rows. A table is built once per answered query and never
/// mutated afterward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultTable {
    name: String,
    #[serde(rename = "fields")]
    columns: Vec<Column>,
}

impl ResultTable {
    /// Creates a new table from `columns`.
    ///
    /// Fails if the columns do not share the same row count.
    pub fn try_new(columns: Vec<Column>) -> Result<Self, TableError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(column) = columns.iter().find(|c| c.len() != expected) {
                return Err(TableError::ColumnLengthMismatch {
                    column: column.name.clone(),
                    expected,
                    actual: column.len(),
                });
            }
        }

        Ok(Self::new_unchecked(columns))
    }

    /// Creates a new table from `columns` without checking their row counts.
    ///
    /// The caller must guarantee that all columns have the same length.
    pub fn new_unchecked(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].len() == w[1].len()),
            "Columns must have the same length"
        );
        Self {
            name: RESULT_TABLE_NAME.to_owned(),
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the first column called `name`.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Converts the table into an Arrow [`RecordBatch`].
    ///
    /// String columns become nullable `Utf8` fields, boolean columns non-nullable `Boolean`
    /// fields.
    pub fn to_record_batch(&self) -> Result<RecordBatch, TableError> {
        let fields = self.columns.iter().map(Column::to_field).collect::<Vec<_>>();
        let arrays = self.columns.iter().map(Column::to_array).collect::<Vec<_>>();
        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows()));
        Ok(RecordBatch::try_new_with_options(
            Arc::new(Schema::new(fields)),
            arrays,
            &options,
        )?)
    }
}

/// A named column of a [`ResultTable`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
    name: String,
    #[serde(flatten)]
    values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a string column in which every cell is present.
    pub fn strings(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(
            name,
            ColumnValues::Strings(values.into_iter().map(Some).collect()),
        )
    }

    pub fn booleans(name: impl Into<String>, values: Vec<bool>) -> Self {
        Self::new(name, ColumnValues::Booleans(values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_field(&self) -> Field {
        match &self.values {
            ColumnValues::Strings(_) => Field::new(&self.name, DataType::Utf8, true),
            ColumnValues::Booleans(_) => Field::new(&self.name, DataType::Boolean, false),
        }
    }

    fn to_array(&self) -> ArrayRef {
        match &self.values {
            ColumnValues::Strings(values) => {
                Arc::new(values.iter().map(Option::as_deref).collect::<StringArray>())
            }
            ColumnValues::Booleans(values) => Arc::new(BooleanArray::from(values.clone())),
        }
    }
}

/// The cells of a [`Column`]. A missing string cell marks an unbound variable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "values")]
pub enum ColumnValues {
    #[serde(rename = "string")]
    Strings(Vec<Option<String>>),
    #[serde(rename = "boolean")]
    Booleans(Vec<bool>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Strings(values) => values.len(),
            ColumnValues::Booleans(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the string cells, or [`None`] for a boolean column.
    pub fn as_strings(&self) -> Option<&[Option<String>]> {
        match self {
            ColumnValues::Strings(values) => Some(values),
            ColumnValues::Booleans(_) => None,
        }
    }

    /// Returns the boolean cells, or [`None`] for a string column.
    pub fn as_booleans(&self) -> Option<&[bool]> {
        match self {
            ColumnValues::Strings(_) => None,
            ColumnValues::Booleans(values) => Some(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datafusion::arrow::util::pretty::pretty_format_batches;
    use insta::assert_snapshot;

    #[test]
    fn test_try_new_rejects_uneven_columns() {
        let result = ResultTable::try_new(vec![
            Column::strings("x", vec!["a".to_owned(), "b".to_owned()]),
            Column::strings("y", vec!["c".to_owned()]),
        ]);
        assert!(matches!(
            result,
            Err(TableError::ColumnLengthMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_table_has_no_rows() -> Result<(), TableError> {
        let table = ResultTable::try_new(vec![])?;
        assert_eq!(table.name(), RESULT_TABLE_NAME);
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.to_record_batch()?.num_rows(), 0);
        Ok(())
    }

    #[test]
    fn test_record_batch_keeps_unbound_cells_as_nulls() -> Result<(), TableError> {
        let table = ResultTable::try_new(vec![
            Column::strings("x", vec!["a".to_owned(), "b".to_owned()]),
            Column::new(
                "y",
                ColumnValues::Strings(vec![None, Some("c".to_owned())]),
            ),
        ])?;

        let batch = table.to_record_batch()?;
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.column(1).null_count(), 1);
        assert_snapshot!(pretty_format_batches(&[batch])?, @r"
        +---+---+
        | x | y |
        +---+---+
        | a |   |
        | b | c |
        +---+---+
        ");
        Ok(())
    }

    #[test]
    fn test_boolean_record_batch() -> Result<(), TableError> {
        let table = ResultTable::try_new(vec![Column::booleans("boolean", vec![true])])?;
        let batch = table.to_record_batch()?;
        assert_eq!(batch.schema().field(0).data_type(), &DataType::Boolean);
        assert_snapshot!(pretty_format_batches(&[batch])?, @r"
        +---------+
        | boolean |
        +---------+
        | true    |
        +---------+
        ");
        Ok(())
    }

    #[test]
    fn test_json_representation() -> Result<(), Box<dyn std::error::Error>> {
        let table = ResultTable::try_new(vec![
            Column::strings("x", vec!["a".to_owned()]),
            Column::booleans("boolean", vec![false]),
        ])?;
        assert_eq!(
            serde_json::to_value(&table)?,
            serde_json::json!({
                "name": "response",
                "fields": [
                    { "name": "x", "type": "string", "values": ["a"] },
                    { "name": "boolean", "type": "boolean", "values": [false] }
                ]
            })
        );
        Ok(())
    }
}
