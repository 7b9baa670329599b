use sparql_datasource_model::{Column, ColumnValues, ResultTable, TabularResult, TermFormat};

pub const BOOLEAN_COLUMN: &str = "boolean";

/// Builds a table from the answer of a `SELECT` or `ASK` query.
///
/// An answer without declared variables is read as a boolean and yields a single `boolean` column
/// with one row. Otherwise, each declared variable becomes a string column, in declaration order,
/// holding one cell per solution. Cells of variables a solution leaves unbound are [`None`], so all
/// columns keep the same length.
pub fn normalize_tabular(result: &TabularResult, format: TermFormat) -> ResultTable {
    if result.is_boolean() {
        return ResultTable::new_unchecked(vec![Column::booleans(
            BOOLEAN_COLUMN,
            vec![result.boolean],
        )]);
    }

    let columns = result
        .variables
        .iter()
        .map(|variable| {
            let values = result
                .solutions
                .iter()
                .map(|solution| {
                    solution
                        .get(variable.as_str())
                        .map(|term| format.render(term.as_ref()))
                })
                .collect();
            Column::new(variable.as_str(), ColumnValues::Strings(values))
        })
        .collect();
    ResultTable::new_unchecked(columns)
}
