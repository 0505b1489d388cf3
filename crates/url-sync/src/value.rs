//! Typed value tree produced and consumed by the codec.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use url_sync_path::parse_index;

/// A parsed query value.
///
/// Shaped exactly like the schema that produced it: objects as `Obj`,
/// array schemas as `Arr`, primitives as native values. `Null` stands for
/// both "absent" and "invalid"; the two are indistinguishable after a
/// round trip. Enum leaves hold their literal as `Str`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryValue {
    #[default]
    Null,
    Str(String),
    Num(f64),
    Bool(bool),
    Date(DateTime<Utc>),
    Arr(Vec<QueryValue>),
    Obj(IndexMap<String, QueryValue>),
}

impl QueryValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_arr(&self) -> Option<&[QueryValue]> {
        match self {
            Self::Arr(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_obj(&self) -> Option<&IndexMap<String, QueryValue>> {
        match self {
            Self::Obj(map) => Some(map),
            _ => None,
        }
    }

    /// Child of an `Obj` node by key.
    pub fn get_key(&self, key: &str) -> Option<&QueryValue> {
        match self {
            Self::Obj(map) => map.get(key),
            _ => None,
        }
    }

    /// Child of an `Arr` node by index.
    pub fn get_index(&self, index: usize) -> Option<&QueryValue> {
        match self {
            Self::Arr(items) => items.get(index),
            _ => None,
        }
    }

    /// Descends through the tree along parsed path segments.
    ///
    /// The empty segment list resolves to the value itself.
    pub fn get_path(&self, segments: &[String]) -> Option<&QueryValue> {
        let mut node = self;
        for segment in segments {
            node = match node {
                Self::Obj(map) => map.get(segment)?,
                Self::Arr(items) => items.get(parse_index(segment)?)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Replaces the value addressed by `segments`.
    ///
    /// Object keys are inserted if missing; an array index may address an
    /// existing element or the one-past-the-end position (append). Returns
    /// false when the path cannot be navigated, including the empty path.
    pub fn set_path(&mut self, segments: &[String], value: QueryValue) -> bool {
        match segments {
            [] => false,
            [last] => self.set_child(last, value),
            [head, rest @ ..] => match self.child_mut(head) {
                Some(child) => child.set_path(rest, value),
                None => false,
            },
        }
    }

    fn child_mut(&mut self, segment: &str) -> Option<&mut QueryValue> {
        match self {
            Self::Obj(map) => map.get_mut(segment),
            Self::Arr(items) => items.get_mut(parse_index(segment)?),
            _ => None,
        }
    }

    fn set_child(&mut self, segment: &str, value: QueryValue) -> bool {
        match self {
            Self::Obj(map) => {
                map.insert(segment.to_string(), value);
                true
            }
            Self::Arr(items) => match parse_index(segment) {
                Some(i) if i < items.len() => {
                    items[i] = value;
                    true
                }
                Some(i) if i == items.len() => {
                    items.push(value);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Converts a JSON value into a query value.
    ///
    /// Lets callers build default trees with `serde_json::json!`. JSON has
    /// no date type; date defaults stay strings here and are coerced when
    /// the default is applied.
    pub fn from_json(value: &JsonValue) -> QueryValue {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(*b),
            JsonValue::Number(n) => n.as_f64().map(Self::Num).unwrap_or(Self::Null),
            JsonValue::String(s) => Self::Str(s.clone()),
            JsonValue::Array(items) => Self::Arr(items.iter().map(Self::from_json).collect()),
            JsonValue::Object(map) => Self::Obj(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for QueryValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Vec<QueryValue>> for QueryValue {
    fn from(value: Vec<QueryValue>) -> Self {
        Self::Arr(value)
    }
}
