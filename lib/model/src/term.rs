use oxrdf::TermRef;
use serde::Deserialize;

/// Controls how an RDF term is written into a table cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermFormat {
    /// IRIs without angle brackets, blank node identifiers without the `_:` prefix and the lexical
    /// value of literals.
    #[default]
    Plain,
    /// The N-Triples serialization of the term.
    NTriples,
}

impl TermFormat {
    /// Renders `term` as a cell value.
    pub fn render(self, term: TermRef<'_>) -> String {
        match self {
            TermFormat::Plain => match term {
                TermRef::NamedNode(node) => node.as_str().to_owned(),
                TermRef::BlankNode(node) => node.as_str().to_owned(),
                TermRef::Literal(literal) => literal.value().to_owned(),
            },
            TermFormat::NTriples => term.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::vocab::xsd;
    use oxrdf::{BlankNodeRef, LiteralRef, NamedNodeRef};

    #[test]
    fn test_plain_rendering() {
        let format = TermFormat::Plain;
        assert_eq!(
            format.render(NamedNodeRef::new_unchecked("http://example.com/s").into()),
            "http://example.com/s"
        );
        assert_eq!(format.render(BlankNodeRef::new_unchecked("b0").into()), "b0");
        assert_eq!(
            format.render(LiteralRef::new_typed_literal("42", xsd::INTEGER).into()),
            "42"
        );
        assert_eq!(
            format.render(
                LiteralRef::new_language_tagged_literal_unchecked("Paris", "fr").into()
            ),
            "Paris"
        );
    }

    #[test]
    fn test_ntriples_rendering() {
        let format = TermFormat::NTriples;
        assert_eq!(
            format.render(NamedNodeRef::new_unchecked("http://example.com/s").into()),
            "<http://example.com/s>"
        );
        assert_eq!(format.render(BlankNodeRef::new_unchecked("b0").into()), "_:b0");
        assert_eq!(
            format.render(LiteralRef::new_typed_literal("42", xsd::INTEGER).into()),
            "\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
        assert_eq!(
            format.render(
                LiteralRef::new_language_tagged_literal_unchecked("Paris", "fr").into()
            ),
            "\"Paris\"@fr"
        );
    }

    #[test]
    fn test_term_format_from_config_value() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::from_str::<TermFormat>("\"ntriples\"")?,
            TermFormat::NTriples
        );
        assert_eq!(
            serde_json::from_str::<TermFormat>("\"plain\"")?,
            TermFormat::Plain
        );
        Ok(())
    }
}
