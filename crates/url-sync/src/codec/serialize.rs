//! Serialize direction: schema-shaped value tree to flat parameter map.

use url_sync_path::join;

use crate::coerce::stringify_value;
use crate::params::FlatParams;
use crate::schema::Schema;
use crate::value::QueryValue;

/// Flattens a value tree back into dotted keys, walking the same schema
/// shape the parser walked.
///
/// Leaves that stringify to `None` emit no key, so `Null` (and anything
/// the value tree holds that the schema does not declare) simply vanishes
/// from the query string.
pub fn serialize_query(value: &QueryValue, schema: &Schema) -> FlatParams {
    let mut out = FlatParams::new();
    write_node(value, schema, "", &mut out);
    out
}

fn write_node(value: &QueryValue, schema: &Schema, prefix: &str, out: &mut FlatParams) {
    match schema {
        Schema::Obj(obj) => {
            if let QueryValue::Obj(map) = value {
                for key in &obj.keys {
                    if let Some(child) = map.get(&key.key) {
                        write_node(child, &key.value, &join(prefix, &key.key), out);
                    }
                }
            }
        }
        Schema::Arr(arr) => {
            if let QueryValue::Arr(items) = value {
                for (i, item) in items.iter().enumerate() {
                    write_node(item, &arr.type_, &join(prefix, &i.to_string()), out);
                }
            }
        }
        _ => {
            if let Some(s) = stringify_value(schema, value) {
                out.insert(prefix, s);
            }
        }
    }
}
