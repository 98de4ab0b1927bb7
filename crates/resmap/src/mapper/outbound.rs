use super::trail::Trail;
use super::{ResourceMapper, Serialized};
use crate::{Context, ObjectId, Registry};

use resmap_core::schema::{Descriptors, Relationship};
use resmap_core::{coerce, Error, Json, Result};
use serde_json::Map;
use std::sync::Arc;

/// State of one outbound serialization.
///
/// Tracks the instances currently being serialized so that embedding never
/// recurses into an instance already on the stack.
pub struct Outbound<'a> {
    registry: &'a Registry,
    cx: &'a dyn Context,

    /// Instances whose serialization is in progress, outermost first
    visiting: Vec<ObjectId>,

    trail: Trail,
}

impl<'a> Outbound<'a> {
    pub fn new(registry: &'a Registry, cx: &'a dyn Context) -> Outbound<'a> {
        Outbound {
            registry,
            cx,
            visiting: vec![],
            trail: Trail::default(),
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn cx(&self) -> &'a dyn Context {
        self.cx
    }

    /// Flattened descriptors of the instance's concrete entity type.
    pub fn descriptors_of(&self, object: ObjectId) -> Result<Arc<Descriptors>> {
        let entity = self.cx.entity_of(object)?;
        self.registry.introspector().descriptors(entity)
    }

    /// Serialize one instance into a resource with `mapper`.
    pub fn serialize_record<M>(&mut self, mapper: &M, object: ObjectId) -> Result<Serialized>
    where
        M: ResourceMapper + ?Sized,
    {
        self.trail.reset();
        self.visiting.clear();

        let resource = self.serialize(mapper, object)?;

        Ok(Serialized {
            resource: Json::Object(resource),
            diagnostics: self.trail.take(),
        })
    }

    fn serialize<M>(&mut self, mapper: &M, object: ObjectId) -> Result<Map<String, Json>>
    where
        M: ResourceMapper + ?Sized,
    {
        let mut resource = Map::new();

        self.visiting.push(object);
        let ret = mapper.map_to(self, object, &mut resource);
        self.visiting.pop();

        ret.map(|_| resource)
    }

    /// Returns `true` if the instance's serialization is in progress.
    pub fn is_visiting(&self, object: ObjectId) -> bool {
        self.visiting.contains(&object)
    }

    /// Serialize a related instance.
    ///
    /// Embedding relationships serialize the instance in full with the
    /// relationship's mapper (or the instance type's default), unless the
    /// instance is already being serialized. Everything else becomes a
    /// reference.
    pub fn related(&mut self, relationship: &Relationship, object: ObjectId) -> Result<Json> {
        if !relationship.embed || self.is_visiting(object) {
            return self.reference(relationship, object);
        }

        let registry = self.registry;
        let resource = match &relationship.mapper {
            Some(tag) => self.serialize(registry.mapper_for_resource_type(tag)?, object)?,
            None => {
                let entity = self.cx.entity_of(object)?;
                self.serialize(registry.mapper_or_default(entity), object)?
            }
        };

        Ok(Json::Object(resource))
    }

    /// Serialize a reference to an instance: its identifying keys, plus its
    /// type tag when the instance is more specific than the relationship's
    /// declared target.
    pub fn reference(&mut self, relationship: &Relationship, object: ObjectId) -> Result<Json> {
        let descriptors = self.descriptors_of(object)?;
        let mut resource = Map::new();

        if descriptors.entity != relationship.target {
            if let Some(tag) = &descriptors.resource_type {
                resource.insert(self.registry.type_key().to_string(), Json::String(tag.clone()));
            }
        }

        for attribute in descriptors.identifying_attributes_for(&relationship.identifying_keys)? {
            match self.cx.attribute(object, &attribute.name)? {
                Some(value) => {
                    let wire = coerce::encode(attribute, &value, self.registry.converters())?;
                    resource.insert(attribute.wire_key.clone(), wire);
                }
                None => self.report(Error::missing_identifying_key(
                    &descriptors.name,
                    &attribute.wire_key,
                )),
            }
        }

        Ok(Json::Object(resource))
    }

    /// Turn a data error into a diagnostic at the current path.
    pub fn recover<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        self.trail.recover(result)
    }

    pub fn report(&mut self, error: Error) {
        self.trail.report(error);
    }

    /// Run `f` with `key` appended to the current path.
    pub fn field<T>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let len = self.trail.push_key(key);
        let ret = f(self);
        self.trail.restore(len);
        ret
    }

    /// Run `f` with `[index]` appended to the current path.
    pub fn index<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let len = self.trail.push_index(index);
        let ret = f(self);
        self.trail.restore(len);
        ret
    }
}
