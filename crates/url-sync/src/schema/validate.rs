//! Schema integrity validator.
//!
//! The codec itself never inspects schema integrity; malformed schemas are
//! rejected once at setup time, before any parsing happens.

use thiserror::Error;

use super::schema::*;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown type tag: {0:?}")]
    UnknownTag(String),
    #[error("enum must declare at least one literal")]
    EmptyEnum,
    #[error("enum literal must not be empty")]
    EmptyLiteral,
    #[error("object key must not be empty")]
    EmptyKey,
    #[error("object key {0:?} contains characters outside [A-Za-z0-9_-]")]
    InvalidKey(String),
    #[error("duplicate object key: {0:?}")]
    DuplicateKey(String),
}

/// Validate a schema for structural integrity.
///
/// Checks that every enum declares at least one non-empty literal and that
/// object keys are non-empty, unique per object, and stay inside the
/// `[A-Za-z0-9_-]+` key grammar (a `.` in a key would collide with the
/// path separator).
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    match schema {
        Schema::Str | Schema::Num | Schema::Date | Schema::Bool => Ok(()),
        Schema::Enum(e) => validate_enum(e),
        Schema::Arr(a) => validate_schema(&a.type_),
        Schema::Obj(o) => validate_obj(o),
    }
}

fn validate_enum(e: &EnumSchema) -> Result<(), SchemaError> {
    if e.literals.is_empty() {
        return Err(SchemaError::EmptyEnum);
    }
    if e.literals.iter().any(|l| l.is_empty()) {
        return Err(SchemaError::EmptyLiteral);
    }
    Ok(())
}

fn validate_obj(o: &ObjSchema) -> Result<(), SchemaError> {
    for (i, key) in o.keys.iter().enumerate() {
        if key.key.is_empty() {
            return Err(SchemaError::EmptyKey);
        }
        if !is_valid_key(&key.key) {
            return Err(SchemaError::InvalidKey(key.key.clone()));
        }
        if o.keys[..i].iter().any(|k| k.key == key.key) {
            return Err(SchemaError::DuplicateKey(key.key.clone()));
        }
        validate_schema(&key.value)?;
    }
    Ok(())
}

fn is_valid_key(key: &str) -> bool {
    key.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
