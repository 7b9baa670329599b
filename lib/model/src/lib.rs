mod error;
mod table;
mod tabular;
mod term;

pub use error::*;
pub use table::*;
pub use tabular::*;
pub use term::*;

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeRef, Literal, LiteralRef, NamedNode, NamedNodeRef, Subject, SubjectRef,
    Term, TermRef, Triple, TripleRef, Variable, VariableRef,
};
pub use sparesults::QuerySolution;
