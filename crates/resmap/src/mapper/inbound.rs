use super::trail::Trail;
use super::{Mapped, ResourceMapper};
use crate::resolve::{resolve, Identity};
use crate::{Context, ObjectId, Registry, Related};

use resmap_core::schema::{Descriptors, Relationship};
use resmap_core::{resource, Error, Json, Result, Value};

use std::collections::{HashMap, HashSet};

/// State of one inbound mapping session.
///
/// A session spans every record of a batch. It tracks which fields have been
/// written so that, for the same resolved instance, the first write wins and
/// later conflicting writes are skipped.
pub struct Inbound<'a> {
    registry: &'a Registry,
    cx: &'a mut dyn Context,

    /// Fields written so far this session, per instance
    written: HashMap<ObjectId, HashSet<String>>,

    trail: Trail,
}

impl<'a> Inbound<'a> {
    pub fn new(registry: &'a Registry, cx: &'a mut dyn Context) -> Inbound<'a> {
        Inbound {
            registry,
            cx,
            written: HashMap::new(),
            trail: Trail::default(),
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn cx(&self) -> &dyn Context {
        &*self.cx
    }

    pub fn cx_mut(&mut self) -> &mut dyn Context {
        &mut *self.cx
    }

    /// Flattened descriptors of the instance's concrete entity type.
    pub fn descriptors_of(&self, object: ObjectId) -> Result<std::sync::Arc<Descriptors>> {
        let entity = self.cx.entity_of(object)?;
        self.registry.introspector().descriptors(entity)
    }

    /// Resolve the instance a top-level record describes and map the record
    /// onto it with `mapper`.
    ///
    /// A type tag on the record selects a concrete entity type within the
    /// mapper's family; that type's mapper then does the mapping.
    pub fn map_record<M>(&mut self, mapper: &M, resource: &Json) -> Result<Mapped>
    where
        M: ResourceMapper + ?Sized,
    {
        self.trail.reset();

        if !resource.is_object() {
            return Err(Error::coercion(
                resource::shape(resource),
                "a resource object",
            ));
        }

        let registry = self.registry;
        let declared = mapper.entity();
        let entity = registry.concrete_entity(declared, resource)?;
        let descriptors = registry.introspector().descriptors(entity)?;

        let identity = Identity::from_resource(&descriptors, &[], resource, registry.converters())?;
        let resolved = resolve(&mut *self.cx, &descriptors, &identity)?;

        if entity == declared {
            mapper.map_from(self, resolved.object, resource)?;
        } else {
            registry
                .mapper_or_default(entity)
                .map_from(self, resolved.object, resource)?;
        }

        Ok(Mapped {
            object: resolved.object,
            created: resolved.created,
            diagnostics: self.trail.take(),
        })
    }

    /// Resolve the instance a nested resource refers to.
    ///
    /// A bare reference (a scalar, or an object holding nothing but
    /// identifying keys and the type tag) is only resolved. A full nested
    /// resource is also mapped onto the resolved instance, with the
    /// relationship's named mapper if it has one. Data problems become
    /// diagnostics and yield `None`.
    pub fn resolve_nested(
        &mut self,
        mapper: &(impl ResourceMapper + ?Sized),
        relationship: &Relationship,
        resource: &Json,
    ) -> Result<Option<ObjectId>> {
        let registry = self.registry;

        let Some(entity) =
            self.recover(mapper.entity_type_for_relationship(registry, relationship, resource))?
        else {
            return Ok(None);
        };

        let descriptors = registry.introspector().descriptors(entity)?;
        let Some(identity) = self.recover(Identity::from_resource(
            &descriptors,
            &relationship.identifying_keys,
            resource,
            registry.converters(),
        ))?
        else {
            return Ok(None);
        };

        let resolved = resolve(&mut *self.cx, &descriptors, &identity)?;

        if self.is_full(&descriptors, relationship, resource) {
            match &relationship.mapper {
                Some(tag) => registry
                    .mapper_for_resource_type(tag)?
                    .map_from(self, resolved.object, resource)?,
                None => registry
                    .mapper_or_default(entity)
                    .map_from(self, resolved.object, resource)?,
            }
        }

        Ok(Some(resolved.object))
    }

    fn is_full(
        &self,
        descriptors: &Descriptors,
        relationship: &Relationship,
        resource: &Json,
    ) -> bool {
        let Some(fields) = resource.as_object() else {
            return false;
        };

        let keys = if relationship.identifying_keys.is_empty() {
            &descriptors.identifying_keys
        } else {
            &relationship.identifying_keys
        };

        fields.keys().any(|key| {
            key != self.registry.type_key()
                && !keys.iter().any(|name| {
                    descriptors
                        .attribute(name)
                        .is_some_and(|attribute| attribute.wire_key == *key)
                })
        })
    }

    /// Set an attribute unless this session already wrote it.
    pub fn set_attribute(&mut self, object: ObjectId, name: &str, value: Value) -> Result<()> {
        if !self.claim(object, name) {
            if self.cx.attribute(object, name)?.as_ref() != Some(&value) {
                log::debug!("{object:?}: keeping first value of `{name}`, skipping {value}");
            }
            return Ok(());
        }

        self.cx.set_attribute(object, name, Some(value))
    }

    /// Set a relationship unless this session already wrote it.
    ///
    /// Returns the instances the relationship held before, or `None` if the
    /// write was skipped.
    pub fn set_related(
        &mut self,
        object: ObjectId,
        name: &str,
        related: Related,
    ) -> Result<Option<Related>> {
        if !self.claim(object, name) {
            log::debug!("{object:?}: keeping first value of `{name}`");
            return Ok(None);
        }

        let previous = self.cx.related(object, name)?;
        self.cx.set_related(object, name, related)?;
        Ok(Some(previous))
    }

    fn claim(&mut self, object: ObjectId, name: &str) -> bool {
        let written = self.written.entry(object).or_default();
        if written.contains(name) {
            return false;
        }
        written.insert(name.to_string());
        true
    }

    /// Turn a data error into a diagnostic at the current path.
    ///
    /// Configuration errors and ambiguous identities are returned as-is.
    pub fn recover<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        self.trail.recover(result)
    }

    /// Record a diagnostic at the current path.
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
