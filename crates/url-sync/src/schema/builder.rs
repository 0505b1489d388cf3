//! Schema builder.
//!
//! Provides a fluent API for constructing schema values:
//!
//! ```
//! use url_sync::schema::S;
//!
//! let schema = S.obj(vec![
//!     S.key("page", S.num()),
//!     S.key("tags", S.arr(S.str())),
//!     S.key("color", S.enum_(["red", "green", "blue"])),
//! ]);
//! assert_eq!(schema.kind(), "obj");
//! ```

use super::schema::*;

/// Builder for constructing schema values.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder;

impl SchemaBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn str(&self) -> Schema {
        Schema::Str
    }

    pub fn num(&self) -> Schema {
        Schema::Num
    }

    pub fn date(&self) -> Schema {
        Schema::Date
    }

    pub fn bool(&self) -> Schema {
        Schema::Bool
    }

    pub fn enum_<I, T>(&self, literals: I) -> Schema
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Schema::Enum(EnumSchema {
            literals: literals.into_iter().map(Into::into).collect(),
        })
    }

    pub fn arr(&self, type_: Schema) -> Schema {
        Schema::Arr(ArrSchema {
            type_: Box::new(type_),
        })
    }

    pub fn obj(&self, keys: Vec<KeySchema>) -> Schema {
        Schema::Obj(ObjSchema { keys })
    }

    pub fn key(&self, key: impl Into<String>, value: Schema) -> KeySchema {
        KeySchema {
            key: key.into(),
            value: Box::new(value),
        }
    }
}

/// Global default schema builder.
pub static S: SchemaBuilder = SchemaBuilder;
