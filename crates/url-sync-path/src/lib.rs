//! Dotted query-path utilities.
//!
//! Query keys address nested values with `.`-joined segments, where a
//! segment is either an object key or a base-10 array index:
//! `filter.tags.0`, `page`, `range.1.start`. There is no escaping
//! mechanism; a key therefore cannot contain a literal `.`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryPathError {
    #[error("query path segment must not be empty")]
    EmptySegment,
}

/// Splits a dotted path into its segments.
///
/// The empty path resolves to no segments (the root). Any empty segment,
/// such as the ones produced by `a..b` or a trailing dot, is an error.
///
/// Examples:
/// - `"" -> []`
/// - `"page" -> ["page"]`
/// - `"filter.tags.0" -> ["filter", "tags", "0"]`
pub fn parse_path(path: &str) -> Result<Vec<String>, QueryPathError> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    path.split('.')
        .map(|segment| {
            if segment.is_empty() {
                Err(QueryPathError::EmptySegment)
            } else {
                Ok(segment.to_string())
            }
        })
        .collect()
}

/// Joins segments back into a dotted path. Inverse of [`parse_path`].
pub fn format_path(segments: &[String]) -> String {
    segments.join(".")
}

/// Appends one segment to a dotted prefix.
///
/// The empty prefix denotes the root, so joining onto it yields the bare
/// segment rather than a leading dot.
pub fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        return segment.to_string();
    }
    let mut out = String::with_capacity(prefix.len() + 1 + segment.len());
    out.push_str(prefix);
    out.push('.');
    out.push_str(segment);
    out
}

/// Whether a segment is a non-negative base-10 array index.
///
/// No digit-count normalization is applied, so `007` is a valid index.
pub fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a segment as an array index, if it is one.
pub fn parse_index(segment: &str) -> Option<usize> {
    if is_index(segment) {
        segment.parse().ok()
    } else {
        None
    }
}
