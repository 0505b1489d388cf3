//! Parse direction: flat parameter map to schema-shaped value tree.

use indexmap::IndexMap;
use url_sync_path::join;

use crate::coerce::coerce_value;
use crate::params::FlatParams;
use crate::schema::Schema;
use crate::value::QueryValue;

/// Upper bound on the per-array index scan. Real query strings stop long
/// before this; the cap keeps a pathological default tree or input from
/// turning the contiguous scan into an unbounded loop.
const MAX_ARRAY_SCAN: usize = 10_000;

/// Parses a flat parameter map into the tree shape declared by `schema`.
///
/// Every declared leaf appears in the output, coerced or `Null`; flat keys
/// that no schema path reaches are ignored. Array lengths are inferred
/// from contiguous index availability: the scan over `prefix.0`,
/// `prefix.1`, ... stops at the first index with neither raw data nor a
/// default entry, so sparse indices past a gap never surface.
pub fn parse_query(
    params: &FlatParams,
    schema: &Schema,
    defaults: Option<&QueryValue>,
) -> QueryValue {
    parse_node(params, schema, "", defaults)
}

fn parse_node(
    params: &FlatParams,
    schema: &Schema,
    prefix: &str,
    default: Option<&QueryValue>,
) -> QueryValue {
    match schema {
        Schema::Obj(obj) => {
            let mut out = IndexMap::with_capacity(obj.keys.len());
            for key in &obj.keys {
                let child_prefix = join(prefix, &key.key);
                let child_default = default.and_then(|d| d.get_key(&key.key));
                out.insert(
                    key.key.clone(),
                    parse_node(params, &key.value, &child_prefix, child_default),
                );
            }
            QueryValue::Obj(out)
        }
        Schema::Arr(arr) => {
            let mut items = Vec::new();
            for i in 0..MAX_ARRAY_SCAN {
                let child_prefix = join(prefix, &i.to_string());
                let child_default = default.and_then(|d| d.get_index(i));
                if !has_raw(params, &arr.type_, &child_prefix) && child_default.is_none() {
                    break;
                }
                items.push(parse_node(params, &arr.type_, &child_prefix, child_default));
            }
            QueryValue::Arr(items)
        }
        _ => coerce_value(schema, params.get(prefix), default),
    }
}

/// Raw-data presence test for one array index. A primitive element needs
/// its exact key; a container element counts as present when any flat key
/// lives below its prefix.
fn has_raw(params: &FlatParams, element: &Schema, prefix: &str) -> bool {
    if element.is_primitive() {
        params.get(prefix).is_some()
    } else {
        params.has_prefix(prefix)
    }
}
