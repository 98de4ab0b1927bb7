use serde::Deserialize;

/// Describes one typed attribute of an entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// The attribute name, unique within the entity type
    pub name: String,

    /// Semantic kind, selects the coercion applied to wire values
    pub kind: AttributeKind,

    /// True if inbound and outbound mapping must produce a value
    pub required: bool,

    /// Key under which the attribute is found in a resource
    pub wire_key: String,
}

/// The semantic kind of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeKind {
    String,
    I16,
    I32,
    I64,
    Float,
    Double,
    Bool,
    Decimal,
    Date,
    Binary,
    Url,
    List,
    Map,

    /// Delegated to the converter registered under the given
    /// representation name
    Transformable(String),
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Attribute {
        let name = name.into();
        Attribute {
            wire_key: name.clone(),
            name,
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Attribute {
        self.required = true;
        self
    }

    pub fn wire_key(mut self, wire_key: impl Into<String>) -> Attribute {
        self.wire_key = wire_key.into();
        self
    }
}

impl AttributeKind {
    pub fn transformable(repr: impl Into<String>) -> AttributeKind {
        AttributeKind::Transformable(repr.into())
    }

    /// Name of the kind, used in error messages.
    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Binary => "binary",
            Self::Url => "url",
            Self::List => "list",
            Self::Map => "map",
            Self::Transformable(repr) => repr,
        }
    }
}
