use oxrdf::Variable;
use sparesults::QuerySolution;

/// The raw answer of a `SELECT` or `ASK` query as returned by the endpoint.
///
/// A boolean answer declares no variables. A solutions answer declares its variables in projection
/// order and carries the solutions in document order; `boolean` is then `false`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TabularResult {
    pub variables: Vec<Variable>,
    pub solutions: Vec<QuerySolution>,
    pub boolean: bool,
}

impl TabularResult {
    /// Creates the answer of an `ASK` query.
    pub fn from_boolean(value: bool) -> Self {
        Self {
            variables: Vec::new(),
            solutions: Vec::new(),
            boolean: value,
        }
    }

    /// Creates the answer of a `SELECT` query.
    pub fn from_solutions(variables: Vec<Variable>, solutions: Vec<QuerySolution>) -> Self {
        Self {
            variables,
            solutions,
            boolean: false,
        }
    }

    /// Whether this answer is read as a boolean, i.e. it declares no variables.
    pub fn is_boolean(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{NamedNode, Term};

    #[test]
    fn test_boolean_answer() {
        let result = TabularResult::from_boolean(true);
        assert!(result.is_boolean());
        assert!(result.boolean);
        assert!(result.solutions.is_empty());
    }

    #[test]
    fn test_solutions_answer() {
        let variables = vec![Variable::new_unchecked("s")];
        let solution = QuerySolution::from((
            variables.clone(),
            vec![Some(Term::from(NamedNode::new_unchecked("http://example.com/s")))],
        ));
        let result = TabularResult::from_solutions(variables, vec![solution]);
        assert!(!result.is_boolean());
        assert!(!result.boolean);
        assert_eq!(result.solutions.len(), 1);
        assert_eq!(
            result.solutions[0].get("s").map(ToString::to_string),
            Some("<http://example.com/s>".to_owned())
        );
    }
}
