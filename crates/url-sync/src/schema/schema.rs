use super::validate::SchemaError;

/// Represents an enumeration over a finite, ordered set of string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    pub literals: Vec<String>,
}

impl EnumSchema {
    /// Case-sensitive membership test against the declared literal set.
    pub fn contains(&self, literal: &str) -> bool {
        self.literals.iter().any(|l| l == literal)
    }
}

/// Represents an array of a single element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrSchema {
    pub type_: Box<Schema>,
}

/// Represents a single field of an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub key: String,
    pub value: Box<Schema>,
}

/// Represents an object with declared keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjSchema {
    pub keys: Vec<KeySchema>,
}

impl ObjSchema {
    /// Looks up the sub-schema declared for `key`.
    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.keys.iter().find(|k| k.key == key).map(|k| &*k.value)
    }
}

/// The unified Schema enum covering all query-parameter schema kinds.
///
/// Leaves are primitive kinds; `Arr` and `Obj` nest arbitrarily. Schemas
/// are built once at setup and shared read-only by both codec directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Str,
    Num,
    Date,
    Bool,
    Enum(EnumSchema),
    Arr(ArrSchema),
    Obj(ObjSchema),
}

impl Schema {
    /// Returns the "kind" string identifier for this schema node.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Num => "num",
            Self::Date => "date",
            Self::Bool => "bool",
            Self::Enum(_) => "enum",
            Self::Arr(_) => "arr",
            Self::Obj(_) => "obj",
        }
    }

    /// Whether this node is a primitive leaf (including enums).
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Arr(_) | Self::Obj(_))
    }

    /// Parses a primitive type tag.
    ///
    /// Recognized tags are the keywords `string`, `number`, `date` and
    /// `boolean`, plus the enum grammar `<literal(,literal)*>`: a tag is an
    /// enum if and only if it begins with `<` and ends with `>`, and its
    /// literals are split on `,` with no escaping mechanism.
    pub fn from_tag(tag: &str) -> Result<Schema, SchemaError> {
        if tag.len() >= 2 && tag.starts_with('<') && tag.ends_with('>') {
            let literals = tag[1..tag.len() - 1]
                .split(',')
                .map(str::to_string)
                .collect();
            return Ok(Schema::Enum(EnumSchema { literals }));
        }
        match tag {
            "string" => Ok(Schema::Str),
            "number" => Ok(Schema::Num),
            "date" => Ok(Schema::Date),
            "boolean" => Ok(Schema::Bool),
            _ => Err(SchemaError::UnknownTag(tag.to_string())),
        }
    }

    /// Emits the type tag for a primitive node. Inverse of [`Schema::from_tag`].
    ///
    /// Container nodes have no tag form and return `None`.
    pub fn tag(&self) -> Option<String> {
        match self {
            Self::Str => Some("string".to_string()),
            Self::Num => Some("number".to_string()),
            Self::Date => Some("date".to_string()),
            Self::Bool => Some("boolean".to_string()),
            Self::Enum(e) => Some(format!("<{}>", e.literals.join(","))),
            Self::Arr(_) | Self::Obj(_) => None,
        }
    }
}
