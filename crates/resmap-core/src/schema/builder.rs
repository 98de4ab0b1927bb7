use super::{EntityDef, EntityId, EntityType, Relationship, Schema, SchemaDef};
use crate::{Error, Result};

use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct Builder {
    /// Entity definitions, in registration order. The position of a
    /// definition becomes its `EntityId`.
    entities: Vec<EntityDef>,
}

impl Builder {
    pub fn entity(&mut self, def: EntityDef) -> &mut Self {
        self.entities.push(def);
        self
    }

    pub fn extend(&mut self, def: SchemaDef) -> &mut Self {
        self.entities.extend(def.entities);
        self
    }

    pub fn build(&self) -> Result<Schema> {
        let ids = self.assign_ids()?;

        let mut entities = IndexMap::with_capacity(self.entities.len());
        for (index, def) in self.entities.iter().enumerate() {
            let entity = self.convert(EntityId(index), def, &ids)?;
            entities.insert(entity.id, entity);
        }

        let mut schema = Schema {
            entities,
            by_name: ids,
            by_tag: HashMap::new(),
        };

        Self::index_tags(&mut schema)?;
        Self::verify_lineage(&schema)?;
        Self::verify_identifying_keys(&schema)?;

        Ok(schema)
    }

    fn assign_ids(&self) -> Result<HashMap<String, EntityId>> {
        let mut ids = HashMap::with_capacity(self.entities.len());

        for (index, def) in self.entities.iter().enumerate() {
            if ids.insert(def.name.clone(), EntityId(index)).is_some() {
                return Err(Error::invalid_schema(format!(
                    "entity type `{}` is declared more than once",
                    def.name
                )));
            }
        }

        Ok(ids)
    }

    fn convert(
        &self,
        id: EntityId,
        def: &EntityDef,
        ids: &HashMap<String, EntityId>,
    ) -> Result<EntityType> {
        let lookup = |name: &str, what: &str| {
            ids.get(name).copied().ok_or_else(|| {
                Error::invalid_schema(format!(
                    "{what} of `{}` names unknown entity type `{name}`",
                    def.name
                ))
            })
        };

        let parent = match &def.parent {
            Some(parent) => Some(lookup(parent, "parent")?),
            None => None,
        };

        let mut names = IndexSet::new();
        for name in def
            .attributes
            .iter()
            .map(|attribute| &attribute.name)
            .chain(def.relationships.iter().map(|relationship| &relationship.name))
        {
            if !names.insert(name) {
                return Err(Error::invalid_schema(format!(
                    "field `{}::{name}` is declared more than once",
                    def.name
                )));
            }
        }

        let relationships = def
            .relationships
            .iter()
            .map(|relationship| {
                let target = lookup(
                    &relationship.target,
                    format!("relationship `{}`", relationship.name).as_str(),
                )?;

                Ok(Relationship {
                    name: relationship.name.clone(),
                    target,
                    cardinality: relationship.cardinality,
                    required: relationship.required,
                    wire_key: relationship
                        .wire_key
                        .clone()
                        .unwrap_or_else(|| relationship.name.clone()),
                    identifying_keys: relationship.identifying_keys.clone(),
                    ignored: relationship.ignored,
                    embed: relationship.embed,
                    mapper: relationship.mapper.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EntityType {
            id,
            name: def.name.clone(),
            resource_type: def.resource_type.clone(),
            parent,
            identifying_keys: def.identifying_keys.clone(),
            attributes: def.attributes.clone(),
            relationships,
        })
    }

    fn index_tags(schema: &mut Schema) -> Result<()> {
        for entity in schema.entities.values() {
            let Some(tag) = &entity.resource_type else {
                continue;
            };

            if let Some(existing) = schema.by_tag.insert(tag.clone(), entity.id) {
                return Err(Error::invalid_schema(format!(
                    "resource type `{tag}` is declared by both `{}` and `{}`",
                    schema.entity(existing).name,
                    entity.name
                )));
            }
        }

        Ok(())
    }

    fn verify_lineage(schema: &Schema) -> Result<()> {
        for entity in schema.entities.values() {
            let mut seen = IndexSet::new();
            let mut curr = Some(entity.id);

            while let Some(id) = curr {
                if !seen.insert(id) {
                    return Err(Error::invalid_schema(format!(
                        "inheritance of `{}` forms a cycle",
                        entity.name
                    )));
                }
                curr = schema.entity(id).parent;
            }
        }

        Ok(())
    }

    fn verify_identifying_keys(schema: &Schema) -> Result<()> {
        for entity in schema.entities.values() {
            for key in &entity.identifying_keys {
                if schema.find_attribute(entity.id, key).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "identifying key `{key}` of `{}` is not an attribute",
                        entity.name
                    )));
                }
            }

            for relationship in &entity.relationships {
                for key in &relationship.identifying_keys {
                    if schema.find_attribute(relationship.target, key).is_none() {
                        return Err(Error::invalid_schema(format!(
                            "identifying key `{key}` of relationship `{}::{}` \
                             is not an attribute of `{}`",
                            entity.name,
                            relationship.name,
                            schema.entity(relationship.target).name
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
