//! Schema-driven two-way sync between a URL query string and typed
//! application state.
//!
//! A declarative [`Schema`] describes the expected query parameters:
//! primitives, enumerations, nested objects, and arrays of any of these.
//! The codec parses a flat key-value map (dotted/indexed paths such as
//! `filter.tags.0`) into a schema-shaped [`QueryValue`] tree, filling in
//! caller-supplied defaults for absent entries, and flattens a tree back
//! into a query string. Invalid data never raises; it degrades to `Null`
//! per leaf.
//!
//! ```
//! use url_sync::{parse_query, serialize_query, FlatParams, S};
//!
//! let schema = S.obj(vec![
//!     S.key("q", S.str()),
//!     S.key("page", S.num()),
//!     S.key("tags", S.arr(S.str())),
//! ]);
//! let params = FlatParams::from_query("q=rust&page=2&tags.0=cli&tags.1=web");
//! let value = parse_query(&params, &schema, None);
//! assert_eq!(value.get_key("page").and_then(|v| v.as_num()), Some(2.0));
//!
//! let back = serialize_query(&value, &schema);
//! assert_eq!(back.to_query(), "q=rust&page=2&tags.0=cli&tags.1=web");
//! ```
//!
//! [`UrlState`] wraps the codec into a live container over a
//! [`UrlBackend`], re-serializing on every mutation with optional write
//! debouncing.

pub mod codec;
pub mod coerce;
pub mod params;
pub mod schema;
pub mod state;
pub mod value;

pub use codec::{parse_query, serialize_query};
pub use coerce::{coerce_value, stringify_value};
pub use params::FlatParams;
pub use schema::{is_valid_path, validate_schema, Schema, SchemaBuilder, SchemaError, S};
pub use state::{Debounce, MemoryBackend, UrlBackend, UrlState};
pub use value::QueryValue;
