use sparql_datasource_model::{Column, ResultTable, TermFormat, Triple};

pub const SUBJECT_COLUMN: &str = "subject";
pub const PREDICATE_COLUMN: &str = "predicate";
pub const OBJECT_COLUMN: &str = "object";

/// Builds a three-column table from `triples`, keeping their order.
///
/// Triples whose rendered subject, predicate and object are all empty are skipped.
pub fn normalize_graph(triples: &[Triple], format: TermFormat) -> ResultTable {
    let mut subjects = Vec::with_capacity(triples.len());
    let mut predicates = Vec::with_capacity(triples.len());
    let mut objects = Vec::with_capacity(triples.len());

    for triple in triples {
        let subject = format.render(triple.subject.as_ref().into());
        let predicate = format.render(triple.predicate.as_ref().into());
        let object = format.render(triple.object.as_ref());

        if subject.is_empty() && predicate.is_empty() && object.is_empty() {
            continue;
        }

        subjects.push(subject);
        predicates.push(predicate);
        objects.push(object);
    }

    ResultTable::new_unchecked(vec![
        Column::strings(SUBJECT_COLUMN, subjects),
        Column::strings(PREDICATE_COLUMN, predicates),
        Column::strings(OBJECT_COLUMN, objects),
    ])
}
