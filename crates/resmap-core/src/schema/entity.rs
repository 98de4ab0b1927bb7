use super::{Attribute, Relationship};
use std::fmt;

/// An entity type as declared in the schema.
///
/// Only the type's own attributes and relationships are stored here; the
/// [`Introspector`](super::Introspector) flattens inherited ones.
#[derive(Debug, Clone)]
pub struct EntityType {
    /// Uniquely identifies the entity type within the schema
    pub id: EntityId,

    pub name: String,

    /// Tag carried by resources of this type under the type key
    pub resource_type: Option<String>,

    /// Parent entity type. A relationship declared against the parent
    /// accepts resources of any descendant.
    pub parent: Option<EntityId>,

    /// Attribute names whose values identify an instance. Empty means
    /// inherited from the parent.
    pub identifying_keys: Vec<String>,

    pub attributes: Vec<Attribute>,

    pub relationships: Vec<Relationship>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

impl EntityType {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|relationship| relationship.name == name)
    }
}

impl From<&EntityType> for EntityId {
    fn from(value: &EntityType) -> Self {
        value.id
    }
}

impl From<&Self> for EntityId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EntityId({})", self.0)
    }
}
