mod attribute;
pub use attribute::{Attribute, AttributeKind};

mod builder;
pub use builder::Builder;

mod definition;
pub use definition::{EntityDef, RelationshipDef, SchemaDef};

mod entity;
pub use entity::{EntityId, EntityType};

mod introspect;
pub use introspect::{Descriptors, Introspector};

mod relationship;
pub use relationship::{Cardinality, Relationship};

use crate::{Error, Result};
use indexmap::IndexMap;
use std::collections::HashMap;

/// The statically loaded table of entity types.
///
/// A schema is immutable once built. Lookups by name or resource type tag
/// are plain map lookups.
#[derive(Debug, Default)]
pub struct Schema {
    pub entities: IndexMap<EntityId, EntityType>,

    by_name: HashMap<String, EntityId>,

    by_tag: HashMap<String, EntityId>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Build a schema from its JSON description.
    pub fn from_json(src: &str) -> Result<Schema> {
        let def: SchemaDef = serde_json::from_str(src)
            .map_err(|err| Error::from(err).context("failed to parse schema definition"))?;
        Schema::builder().extend(def).build()
    }

    /// Get an entity type by ID
    pub fn entity(&self, id: impl Into<EntityId>) -> &EntityType {
        self.entities.get(&id.into()).expect("invalid entity ID")
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.values()
    }

    pub fn entity_by_name(&self, name: &str) -> Result<&EntityType> {
        self.by_name
            .get(name)
            .map(|id| self.entity(id))
            .ok_or_else(|| Error::unknown_entity_type(name))
    }

    /// Find the entity type whose resources carry the given type tag.
    pub fn entity_by_tag(&self, tag: &str) -> Option<&EntityType> {
        self.by_tag.get(tag).map(|id| self.entity(id))
    }

    /// Iterate over an entity type and its ancestors, nearest first.
    pub fn lineage(&self, id: EntityId) -> impl Iterator<Item = &EntityType> + '_ {
        let mut next = self.entities.get(&id);
        core::iter::from_fn(move || {
            let curr = next?;
            next = curr.parent.and_then(|parent| self.entities.get(&parent));
            Some(curr)
        })
    }

    /// Returns `true` if `concrete` is `family` or one of its descendants.
    pub fn is_a(&self, concrete: EntityId, family: EntityId) -> bool {
        self.lineage(concrete).any(|entity| entity.id == family)
    }

    /// Find an attribute declared by the entity type or inherited from an
    /// ancestor.
    pub fn find_attribute(&self, id: EntityId, name: &str) -> Option<&Attribute> {
        self.lineage(id).find_map(|entity| entity.attribute(name))
    }
}
