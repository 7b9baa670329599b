use crate::strip_comments;

/// The shape of the results a SPARQL query produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryShape {
    /// `CONSTRUCT` and `DESCRIBE` queries return a set of triples.
    Graph,
    /// `SELECT` and `ASK` queries return variable bindings or a boolean.
    Tabular,
}

const GRAPH_KEYWORDS: [&str; 2] = ["CONSTRUCT", "DESCRIBE"];
const TABULAR_KEYWORDS: [&str; 2] = ["SELECT", "ASK"];

/// Classifies `query` by the first query form keyword it contains.
///
/// Comments are removed and the text is upper-cased before searching. The search is a plain
/// substring search: `?asked` contains `ASK`. Without any keyword the query is [`QueryShape::Tabular`].
pub fn classify(query: &str) -> QueryShape {
    let query = strip_comments(query).to_uppercase();

    let first_graph = first_position(&query, &GRAPH_KEYWORDS);
    let first_tabular = first_position(&query, &TABULAR_KEYWORDS);
    match (first_graph, first_tabular) {
        (Some(graph), Some(tabular)) if graph < tabular => QueryShape::Graph,
        (Some(_), None) => QueryShape::Graph,
        _ => QueryShape::Tabular,
    }
}

fn first_position(query: &str, keywords: &[&str]) -> Option<usize> {
    keywords.iter().filter_map(|k| query.find(k)).min()
}
