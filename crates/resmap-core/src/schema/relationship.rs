use super::EntityId;
use serde::Deserialize;

/// Describes a relationship from one entity type to another.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// The relationship name, unique within the entity type
    pub name: String,

    /// Declared target entity type. Resources may select a descendant of
    /// this type with a type tag.
    pub target: EntityId,

    pub cardinality: Cardinality,

    /// True if inbound and outbound mapping must produce a value
    pub required: bool,

    /// Key under which the nested resource is found
    pub wire_key: String,

    /// Attribute names used to resolve targets. Empty means the target
    /// entity type's own identifying keys.
    pub identifying_keys: Vec<String>,

    /// Skipped during inbound mapping; the relationship is owned from the
    /// other side.
    pub ignored: bool,

    /// Outbound mapping embeds the full target resource instead of a
    /// reference.
    pub embed: bool,

    /// Resource type tag of the mapper used for nested resources, instead of
    /// the one registered for the target entity type.
    pub mapper: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cardinality {
    ToOne,
    ToMany,
}

impl Relationship {
    pub fn is_to_many(&self) -> bool {
        matches!(self.cardinality, Cardinality::ToMany)
    }

    pub fn is_to_one(&self) -> bool {
        matches!(self.cardinality, Cardinality::ToOne)
    }
}
