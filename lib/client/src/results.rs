use crate::RepositoryError;
use oxrdfio::{RdfFormat, RdfParser};
use sparesults::{QueryResultsFormat, QueryResultsParser, ReaderQueryResultsParserOutput};
use sparql_datasource_model::{TabularResult, Triple};

/// Parses a SPARQL query results document (JSON, XML, CSV or TSV).
///
/// Without a media type the document is read as SPARQL JSON results.
pub fn parse_query_results(
    body: &[u8],
    media_type: Option<&str>,
) -> Result<TabularResult, RepositoryError> {
    let format = match media_type.map(essence) {
        None => QueryResultsFormat::Json,
        Some(media_type) => QueryResultsFormat::from_media_type(media_type)
            .ok_or_else(|| RepositoryError::UnsupportedContentType(media_type.to_owned()))?,
    };

    match QueryResultsParser::from_format(format).for_reader(body)? {
        ReaderQueryResultsParserOutput::Boolean(value) => Ok(TabularResult::from_boolean(value)),
        ReaderQueryResultsParserOutput::Solutions(solutions) => {
            let variables = solutions.variables().to_vec();
            let solutions = solutions.collect::<Result<Vec<_>, _>>()?;
            Ok(TabularResult::from_solutions(variables, solutions))
        }
    }
}

/// Parses the RDF document returned by a `CONSTRUCT` or `DESCRIBE` query.
///
/// Without a media type, and for `text/plain`, the document is read as N-Triples. Quads of named
/// graphs are flattened into triples.
pub fn parse_triples(
    body: &[u8],
    media_type: Option<&str>,
) -> Result<Vec<Triple>, RepositoryError> {
    let format = match media_type.map(essence) {
        None | Some("text/plain") => RdfFormat::NTriples,
        Some(media_type) => RdfFormat::from_media_type(media_type)
            .ok_or_else(|| RepositoryError::UnsupportedContentType(media_type.to_owned()))?,
    };

    let triples = RdfParser::from_format(format)
        .for_reader(body)
        .map(|quad| quad.map(|quad| Triple::new(quad.subject, quad.predicate, quad.object)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(triples)
}

/// Strips the parameters (e.g., `charset`) of a media type.
fn essence(media_type: &str) -> &str {
    media_type
        .split_once(';')
        .map_or(media_type, |(essence, _)| essence)
        .trim()
}
