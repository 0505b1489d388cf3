//! Recursive codec between flat parameter maps and typed value trees.

pub mod parse;
pub mod serialize;

pub use parse::parse_query;
pub use serialize::serialize_query;
