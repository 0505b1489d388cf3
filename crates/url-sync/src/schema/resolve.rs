//! Schema path resolver.
//!
//! Decides whether a dotted key path is structurally reachable in a
//! schema. Used to drop stray query keys and to gate state mutations.

use url_sync_path::{is_index, parse_path};

use super::schema::Schema;

/// Whether `path` resolves against `schema`, one segment at a time.
///
/// At an array node the segment must be a base-10 index; at an object node
/// it must be a declared key; a primitive leaf admits no further segments.
/// The walk may stop at any node, leaf or container, so `"filter"` is as
/// valid as `"filter.tags.0"`. The empty path resolves to the root.
pub fn is_valid_path(path: &str, schema: &Schema) -> bool {
    let Ok(segments) = parse_path(path) else {
        return false;
    };
    let mut node = schema;
    for segment in &segments {
        match node {
            Schema::Arr(arr) => {
                if !is_index(segment) {
                    return false;
                }
                node = &arr.type_;
            }
            Schema::Obj(obj) => match obj.get(segment) {
                Some(child) => node = child,
                None => return false,
            },
            _ => return false,
        }
    }
    true
}
