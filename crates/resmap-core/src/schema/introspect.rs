use super::{Attribute, EntityId, Relationship, Schema};
use crate::{Error, Result};

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Answers "what does this entity type look like" for the mapping engine.
///
/// Descriptors flatten inheritance: ancestors' attributes and relationships
/// come first, and a descendant's field of the same name replaces the
/// inherited one in place. They are computed on first lookup and cached for
/// the lifetime of the introspector. Lookups may happen concurrently.
#[derive(Debug)]
pub struct Introspector {
    schema: Arc<Schema>,
    cache: RwLock<HashMap<EntityId, Arc<Descriptors>>>,
}

/// The flattened view of one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptors {
    pub entity: EntityId,

    /// Root of the entity type's lineage. Identifying keys are unique
    /// across the whole family.
    pub family: EntityId,

    pub name: String,

    pub resource_type: Option<String>,

    /// Effective identifying keys: the nearest non-empty declaration in the
    /// lineage.
    pub identifying_keys: Vec<String>,

    pub attributes: Vec<Attribute>,

    pub relationships: Vec<Relationship>,
}

impl Introspector {
    pub fn new(schema: impl Into<Arc<Schema>>) -> Introspector {
        Introspector {
            schema: schema.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Descriptors of the entity type with the given name.
    pub fn descriptors_for(&self, name: &str) -> Result<Arc<Descriptors>> {
        let id = self.schema.entity_by_name(name)?.id;
        self.descriptors(id)
    }

    /// Descriptors of the entity type with the given id.
    pub fn descriptors(&self, id: EntityId) -> Result<Arc<Descriptors>> {
        if let Some(found) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return Ok(found.clone());
        }

        let computed = Arc::new(self.flatten(id)?);

        // A concurrent lookup may have inserted first; the first insert wins.
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(id).or_insert(computed).clone())
    }

    fn flatten(&self, id: EntityId) -> Result<Descriptors> {
        let Some(entity) = self.schema.entities.get(&id) else {
            return Err(Error::unknown_entity_type(format!("{id:?}")));
        };

        let mut lineage: Vec<_> = self.schema.lineage(id).collect();
        lineage.reverse();
        let family = lineage.first().map_or(id, |root| root.id);

        let mut attributes: Vec<Attribute> = vec![];
        let mut relationships: Vec<Relationship> = vec![];
        let mut identifying_keys = vec![];

        for ancestor in lineage {
            for attribute in &ancestor.attributes {
                match attributes.iter_mut().find(|a| a.name == attribute.name) {
                    Some(slot) => *slot = attribute.clone(),
                    None => attributes.push(attribute.clone()),
                }
            }

            for relationship in &ancestor.relationships {
                match relationships
                    .iter_mut()
                    .find(|r| r.name == relationship.name)
                {
                    Some(slot) => *slot = relationship.clone(),
                    None => relationships.push(relationship.clone()),
                }
            }

            if !ancestor.identifying_keys.is_empty() {
                identifying_keys = ancestor.identifying_keys.clone();
            }
        }

        log::debug!(
            "flattened `{}`: {} attributes, {} relationships",
            entity.name,
            attributes.len(),
            relationships.len()
        );

        Ok(Descriptors {
            entity: id,
            family,
            name: entity.name.clone(),
            resource_type: entity.resource_type.clone(),
            identifying_keys,
            attributes,
            relationships,
        })
    }
}

impl Descriptors {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|relationship| relationship.name == name)
    }

    /// Identifying-key attributes, in key order.
    pub fn identifying_attributes(&self) -> Result<Vec<&Attribute>> {
        self.identifying_attributes_for(&self.identifying_keys)
    }

    /// Attributes named by `keys`, falling back to the entity type's own
    /// identifying keys when `keys` is empty.
    pub fn identifying_attributes_for<'a>(
        &'a self,
        keys: &'a [String],
    ) -> Result<Vec<&'a Attribute>> {
        let keys = if keys.is_empty() {
            &self.identifying_keys[..]
        } else {
            keys
        };

        if keys.is_empty() {
            return Err(Error::invalid_schema(format!(
                "entity type `{}` declares no identifying keys",
                self.name
            )));
        }

        keys.iter()
            .map(|key| {
                self.attribute(key).ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "identifying key `{key}` is not an attribute of `{}`",
                        self.name
                    ))
                })
            })
            .collect()
    }

    /// Returns `true` if the attribute takes part in identification.
    pub fn is_identifying(&self, name: &str) -> bool {
        self.identifying_keys.iter().any(|key| key == name)
    }
}
