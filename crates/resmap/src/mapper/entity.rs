use super::{Inbound, Outbound, ResourceMapper};
use crate::{ObjectId, Related};

use resmap_core::schema::{EntityId, Relationship};
use resmap_core::{coerce, resource, Error, Json, Result, Schema};
use serde_json::Map;

/// The metadata-driven mapper.
///
/// Every attribute and relationship is mapped according to the flattened
/// descriptors of the instance's concrete entity type, so one `EntityMapper`
/// serves an entity type and all of its descendants.
#[derive(Debug, Clone)]
pub struct EntityMapper {
    entity: EntityId,

    /// Emit the entity type's tag in outbound resources
    include_type_in_resource: bool,

    orphans: OrphanPolicy,
}

/// What happens to instances dropped from a to-many relationship when the
/// relationship is replaced from a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Remove them from the relationship only.
    #[default]
    Unlink,

    /// Remove them from the relationship and delete them from the context.
    Delete,
}

impl EntityMapper {
    pub fn new(entity: EntityId) -> EntityMapper {
        EntityMapper {
            entity,
            include_type_in_resource: false,
            orphans: OrphanPolicy::default(),
        }
    }

    /// Mapper for the entity type with the given name.
    pub fn for_entity(schema: &Schema, name: &str) -> Result<EntityMapper> {
        Ok(EntityMapper::new(schema.entity_by_name(name)?.id))
    }

    pub fn include_type_in_resource(mut self, include: bool) -> EntityMapper {
        self.include_type_in_resource = include;
        self
    }

    pub fn orphan_policy(mut self, policy: OrphanPolicy) -> EntityMapper {
        self.orphans = policy;
        self
    }

    fn map_relationship_from(
        &self,
        inbound: &mut Inbound<'_>,
        object: ObjectId,
        relationship: &Relationship,
        wire: &Json,
    ) -> Result<()> {
        if relationship.is_to_one() {
            if let Some(target) = inbound.resolve_nested(self, relationship, wire)? {
                inbound.set_related(object, &relationship.name, Related::One(Some(target)))?;
            }
            return Ok(());
        }

        let Some(elements) = wire.as_array() else {
            let target = &inbound.registry().schema().entity(relationship.target).name;
            inbound.report(Error::coercion(
                resource::shape(wire),
                format!("an array of `{target}` resources"),
            ));
            return Ok(());
        };

        let mut targets = Vec::with_capacity(elements.len());
        let mut partial = false;
        for (index, element) in elements.iter().enumerate() {
            let resolved = inbound.index(index, |inbound| {
                inbound.resolve_nested(self, relationship, element)
            })?;

            match resolved {
                Some(target) if !targets.contains(&target) => targets.push(target),
                Some(_) => {}
                None => partial = true,
            }
        }

        let Some(previous) =
            inbound.set_related(object, &relationship.name, Related::Many(targets.clone()))?
        else {
            return Ok(());
        };

        // An element that failed may have named a previous member
        if self.orphans == OrphanPolicy::Delete && partial {
            log::debug!(
                "keeping instances dropped from `{}`, an element failed to resolve",
                relationship.name
            );
        } else if self.orphans == OrphanPolicy::Delete {
            for orphan in previous.objects() {
                if !targets.contains(orphan) {
                    log::debug!("deleting {orphan:?}, dropped from `{}`", relationship.name);
                    inbound.cx_mut().delete(*orphan)?;
                }
            }
        }

        Ok(())
    }
}

impl ResourceMapper for EntityMapper {
    fn entity(&self) -> EntityId {
        self.entity
    }

    fn map_attributes_from(
        &self,
        inbound: &mut Inbound<'_>,
        object: ObjectId,
        resource: &Json,
    ) -> Result<()> {
        let descriptors = inbound.descriptors_of(object)?;
        let converters = inbound.registry().converters();

        for attribute in &descriptors.attributes {
            inbound.field(&attribute.wire_key, |inbound| -> Result<()> {
                let Some(wire) = resource::field(resource, &attribute.wire_key) else {
                    if attribute.required {
                        inbound.report(Error::validation_failure(&attribute.name));
                    }
                    return Ok(());
                };

                let decoded = coerce::decode(attribute, wire, converters);
                if let Some(Some(value)) = inbound.recover(decoded)? {
                    inbound.set_attribute(object, &attribute.name, value)?;
                }
                Ok(())
            })?;
        }

        Ok(())
    }

    fn map_relationships_from(
        &self,
        inbound: &mut Inbound<'_>,
        object: ObjectId,
        resource: &Json,
    ) -> Result<()> {
        let descriptors = inbound.descriptors_of(object)?;

        for relationship in descriptors.relationships.iter().filter(|r| !r.ignored) {
            inbound.field(&relationship.wire_key, |inbound| -> Result<()> {
                match resource::field(resource, &relationship.wire_key) {
                    Some(wire) => self.map_relationship_from(inbound, object, relationship, wire),
                    None => {
                        if relationship.required {
                            inbound.report(Error::validation_failure(&relationship.name));
                        }
                        Ok(())
                    }
                }
            })?;
        }

        Ok(())
    }

    fn map_attributes_to(
        &self,
        outbound: &mut Outbound<'_>,
        object: ObjectId,
        resource: &mut Map<String, Json>,
    ) -> Result<()> {
        let descriptors = outbound.descriptors_of(object)?;
        let registry = outbound.registry();

        if self.include_type_in_resource {
            if let Some(tag) = &descriptors.resource_type {
                resource.insert(registry.type_key().to_string(), Json::String(tag.clone()));
            }
        }

        for attribute in &descriptors.attributes {
            outbound.field(&attribute.wire_key, |outbound| -> Result<()> {
                match outbound.cx().attribute(object, &attribute.name)? {
                    Some(value) => {
                        let encoded = coerce::encode(attribute, &value, registry.converters());
                        if let Some(wire) = outbound.recover(encoded)? {
                            resource.insert(attribute.wire_key.clone(), wire);
                        }
                    }
                    None if attribute.required => {
                        outbound.report(Error::validation_failure(&attribute.name));
                    }
                    None => {}
                }
                Ok(())
            })?;
        }

        Ok(())
    }

    fn map_relationships_to(
        &self,
        outbound: &mut Outbound<'_>,
        object: ObjectId,
        resource: &mut Map<String, Json>,
    ) -> Result<()> {
        let descriptors = outbound.descriptors_of(object)?;

        for relationship in descriptors.relationships.iter().filter(|r| !r.ignored) {
            outbound.field(&relationship.wire_key, |outbound| -> Result<()> {
                let wire = match outbound.cx().related(object, &relationship.name)? {
                    Related::One(Some(target)) => outbound.related(relationship, target)?,
                    Related::One(None) => {
                        if relationship.required {
                            outbound.report(Error::validation_failure(&relationship.name));
                        }
                        return Ok(());
                    }
                    Related::Many(targets) => {
                        let mut elements = Vec::with_capacity(targets.len());
                        for (index, target) in targets.into_iter().enumerate() {
                            let element = outbound.index(index, |outbound| {
                                outbound.related(relationship, target)
                            })?;
                            elements.push(element);
                        }
                        Json::Array(elements)
                    }
                };

                resource.insert(relationship.wire_key.clone(), wire);
                Ok(())
            })?;
        }

        Ok(())
    }
}
