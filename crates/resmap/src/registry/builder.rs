use super::Registry;
use crate::{EntityMapper, ResourceMapper};

use indexmap::IndexMap;
use resmap_core::coerce::{Converter, Converters};
use resmap_core::schema::{AttributeKind, Introspector};
use resmap_core::{resource, Error, Result, Schema};
use std::sync::Arc;

/// Configures a [`Registry`].
///
/// Converters and mappers may be registered in any order; `build` validates
/// the registrations against the schema.
pub struct Builder {
    schema: Arc<Schema>,

    converters: Converters,

    by_tag: IndexMap<String, Arc<dyn ResourceMapper>>,

    /// Entity mappers keyed by entity type name, resolved on build
    by_entity_name: IndexMap<String, Arc<dyn ResourceMapper>>,

    /// Register an [`EntityMapper`] for every entity type without one
    default_mappers: bool,

    type_key: String,

    envelope_key: String,
}

impl Builder {
    pub(super) fn new(schema: Arc<Schema>) -> Builder {
        Builder {
            schema,
            converters: Converters::default(),
            by_tag: IndexMap::new(),
            by_entity_name: IndexMap::new(),
            default_mappers: false,
            type_key: resource::TYPE_KEY.to_string(),
            envelope_key: resource::OBJECTS_KEY.to_string(),
        }
    }

    /// Register the converter for transformable attributes declared with the
    /// representation `repr`.
    pub fn register_converter(
        &mut self,
        repr: impl Into<String>,
        converter: impl Converter + 'static,
    ) -> &mut Self {
        self.converters.register(repr, converter);
        self
    }

    /// Register the mapper for resources tagged `tag`.
    pub fn register_mapper_for_tag(
        &mut self,
        tag: impl Into<String>,
        mapper: impl ResourceMapper + 'static,
    ) -> &mut Self {
        self.by_tag.insert(tag.into(), Arc::new(mapper));
        self
    }

    /// Register the mapper for the entity type named `name`.
    pub fn register_mapper_for_entity(
        &mut self,
        name: impl Into<String>,
        mapper: impl ResourceMapper + 'static,
    ) -> &mut Self {
        self.by_entity_name.insert(name.into(), Arc::new(mapper));
        self
    }

    /// Register an [`EntityMapper`] for every entity type, and under every
    /// declared type tag, that has no mapper registered explicitly.
    pub fn register_default_mappers(&mut self) -> &mut Self {
        self.default_mappers = true;
        self
    }

    /// Set the key under which resources carry their type tag. Defaults to
    /// `"type"`.
    pub fn type_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.type_key = key.into();
        self
    }

    /// Set the key under which response envelopes nest their resources.
    /// Defaults to `"objects"`.
    pub fn envelope_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.envelope_key = key.into();
        self
    }

    pub fn build(&self) -> Result<Registry> {
        let mut by_entity = IndexMap::with_capacity(self.by_entity_name.len());
        for (name, mapper) in &self.by_entity_name {
            let entity = self.schema.entity_by_name(name)?;
            by_entity.insert(entity.id, mapper.clone());
        }

        for (lookup, mapper) in self.by_tag.iter().chain(&self.by_entity_name) {
            if !self.schema.entities.contains_key(&mapper.entity()) {
                return Err(Error::unknown_entity_type(format!("{:?}", mapper.entity()))
                    .context(format!("registering mapper for `{lookup}`")));
            }
        }

        let explicit = by_entity.clone();
        let mut by_tag = self.by_tag.clone();
        let mut defaults = IndexMap::with_capacity(self.schema.entities.len());

        for entity in self.schema.entities() {
            let mapper = EntityMapper::new(entity.id);

            if self.default_mappers {
                // Descendants of an explicitly mapped entity type keep the
                // ancestor's mapper
                let resolved = self
                    .schema
                    .lineage(entity.id)
                    .find_map(|ancestor| explicit.get(&ancestor.id))
                    .cloned()
                    .unwrap_or_else(|| Arc::new(mapper.clone()) as Arc<dyn ResourceMapper>);

                if let Some(tag) = &entity.resource_type {
                    by_tag.entry(tag.clone()).or_insert_with(|| resolved.clone());
                }
                by_entity.entry(entity.id).or_insert(resolved);
            }

            for attribute in &entity.attributes {
                if let AttributeKind::Transformable(repr) = &attribute.kind {
                    if !self.converters.contains(repr) {
                        log::warn!(
                            "no converter registered for `{repr}` used by `{}::{}`",
                            entity.name,
                            attribute.name
                        );
                    }
                }
            }

            defaults.insert(entity.id, mapper);
        }

        log::debug!(
            "registry built: {} tagged mappers, {} entity mappers",
            by_tag.len(),
            by_entity.len()
        );

        Ok(Registry {
            introspector: Introspector::new(self.schema.clone()),
            converters: self.converters.clone(),
            by_tag,
            by_entity,
            defaults,
            type_key: self.type_key.clone(),
            envelope_key: self.envelope_key.clone(),
        })
    }
}
