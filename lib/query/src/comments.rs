use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

#[allow(clippy::expect_used, reason = "The pattern is a constant")]
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)#.*$").expect("Valid comment pattern"));

/// Removes every `#` line comment from `query`.
///
/// Everything from a `#` up to the end of its line is dropped; the line breaks themselves are kept.
/// A `#` inside a string literal or an IRI is treated as a comment start as well.
pub fn strip_comments(query: &str) -> Cow<'_, str> {
    LINE_COMMENT.replace_all(query, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_single_comment() {
        assert_eq!(
            strip_comments("SELECT * # all of them\nWHERE { ?s ?p ?o }"),
            "SELECT * \nWHERE { ?s ?p ?o }"
        );
    }

    #[test]
    fn test_strip_comments_on_every_line() {
        assert_eq!(strip_comments("# a\n# b\nASK {}\n# c"), "\n\nASK {}\n");
    }

    #[test]
    fn test_no_comment_is_borrowed() {
        let query = "SELECT ?s WHERE { ?s ?p ?o }";
        assert!(matches!(strip_comments(query), Cow::Borrowed(q) if q == query));
    }

    #[test]
    fn test_hash_in_iri_is_stripped() {
        assert_eq!(
            strip_comments("SELECT ?s WHERE { ?s a <http://example.com/ns#Type> }"),
            "SELECT ?s WHERE { ?s a <http://example.com/ns"
        );
    }
}
