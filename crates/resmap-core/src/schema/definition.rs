use super::{Attribute, AttributeKind, Cardinality};
use serde::Deserialize;

/// Declarative description of a whole schema, as loaded from a schema
/// source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaDef {
    pub entities: Vec<EntityDef>,
}

/// Declarative description of an entity type. Entity types are referenced
/// by name; the [`Builder`](super::Builder) resolves names to ids.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntityDef {
    pub name: String,

    #[serde(default)]
    pub resource_type: Option<String>,

    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default)]
    pub identifying_keys: Vec<String>,

    #[serde(default)]
    pub attributes: Vec<Attribute>,

    #[serde(default)]
    pub relationships: Vec<RelationshipDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RelationshipDef {
    pub name: String,

    /// Name of the declared target entity type
    pub target: String,

    #[serde(default = "RelationshipDef::default_cardinality")]
    pub cardinality: Cardinality,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub wire_key: Option<String>,

    #[serde(default)]
    pub identifying_keys: Vec<String>,

    #[serde(default)]
    pub ignored: bool,

    #[serde(default)]
    pub embed: bool,

    #[serde(default)]
    pub mapper: Option<String>,
}

/// Wire form of [`Attribute`]; the wire key defaults to the name.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AttributeDef {
    name: String,
    kind: AttributeKind,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    wire_key: Option<String>,
}

impl From<AttributeDef> for Attribute {
    fn from(def: AttributeDef) -> Attribute {
        let mut attribute = Attribute::new(def.name, def.kind);
        attribute.required = def.required;
        if let Some(wire_key) = def.wire_key {
            attribute.wire_key = wire_key;
        }
        attribute
    }
}

impl<'de> Deserialize<'de> for Attribute {
    fn deserialize<D>(deserializer: D) -> Result<Attribute, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        AttributeDef::deserialize(deserializer).map(Attribute::from)
    }
}

impl EntityDef {
    pub fn new(name: impl Into<String>) -> EntityDef {
        EntityDef {
            name: name.into(),
            resource_type: None,
            parent: None,
            identifying_keys: vec![],
            attributes: vec![],
            relationships: vec![],
        }
    }

    pub fn resource_type(mut self, tag: impl Into<String>) -> EntityDef {
        self.resource_type = Some(tag.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> EntityDef {
        self.parent = Some(parent.into());
        self
    }

    pub fn identifying_keys<I, S>(mut self, keys: I) -> EntityDef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifying_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> EntityDef {
        self.attributes.push(attribute);
        self
    }

    pub fn relationship(mut self, relationship: RelationshipDef) -> EntityDef {
        self.relationships.push(relationship);
        self
    }
}

impl RelationshipDef {
    pub fn to_one(name: impl Into<String>, target: impl Into<String>) -> RelationshipDef {
        RelationshipDef::new(name.into(), target.into(), Cardinality::ToOne)
    }

    pub fn to_many(name: impl Into<String>, target: impl Into<String>) -> RelationshipDef {
        RelationshipDef::new(name.into(), target.into(), Cardinality::ToMany)
    }

    fn new(name: String, target: String, cardinality: Cardinality) -> RelationshipDef {
        RelationshipDef {
            name,
            target,
            cardinality,
            required: false,
            wire_key: None,
            identifying_keys: vec![],
            ignored: false,
            embed: false,
            mapper: None,
        }
    }

    fn default_cardinality() -> Cardinality {
        Cardinality::ToOne
    }

    pub fn required(mut self) -> RelationshipDef {
        self.required = true;
        self
    }

    pub fn wire_key(mut self, wire_key: impl Into<String>) -> RelationshipDef {
        self.wire_key = Some(wire_key.into());
        self
    }

    pub fn identifying_keys<I, S>(mut self, keys: I) -> RelationshipDef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifying_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignored(mut self) -> RelationshipDef {
        self.ignored = true;
        self
    }

    pub fn embed(mut self) -> RelationshipDef {
        self.embed = true;
        self
    }

    pub fn mapper(mut self, tag: impl Into<String>) -> RelationshipDef {
        self.mapper = Some(tag.into());
        self
    }
}
