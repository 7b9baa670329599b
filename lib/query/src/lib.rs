mod comments;
mod shape;

pub use comments::strip_comments;
pub use shape::{classify, QueryShape};
