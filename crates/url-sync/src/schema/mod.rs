//! Schema AST module.

pub mod builder;
pub mod resolve;
pub mod schema;
pub mod validate;

pub use builder::{SchemaBuilder, S};
pub use resolve::is_valid_path;
pub use schema::*;
pub use validate::{validate_schema, SchemaError};
