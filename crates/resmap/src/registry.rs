mod builder;
pub use builder::Builder;

use crate::{Batch, Context, EntityMapper, Inbound, ResourceMapper};

use indexmap::IndexMap;
use resmap_core::coerce::Converters;
use resmap_core::schema::{Descriptors, EntityId, Introspector, Relationship};
use resmap_core::{resource, Error, Json, Result, Schema};
use std::sync::Arc;

/// Everything a mapping call needs: the schema, the converters for
/// transformable attributes, and the mappers to dispatch to.
///
/// A registry is built once, in order: schema, then converters, then
/// mappers (see [`Builder`]). It is immutable afterwards and may be shared
/// across threads.
pub struct Registry {
    introspector: Introspector,

    converters: Converters,

    /// Mappers by resource type tag
    by_tag: IndexMap<String, Arc<dyn ResourceMapper>>,

    /// Mappers by entity type
    by_entity: IndexMap<EntityId, Arc<dyn ResourceMapper>>,

    /// Used for entity types without a registered mapper
    defaults: IndexMap<EntityId, EntityMapper>,

    type_key: String,

    envelope_key: String,
}

impl Registry {
    pub fn builder(schema: impl Into<Arc<Schema>>) -> Builder {
        Builder::new(schema.into())
    }

    pub fn schema(&self) -> &Schema {
        self.introspector.schema()
    }

    pub fn introspector(&self) -> &Introspector {
        &self.introspector
    }

    pub fn descriptors(&self, entity: EntityId) -> Result<Arc<Descriptors>> {
        self.introspector.descriptors(entity)
    }

    pub fn converters(&self) -> &Converters {
        &self.converters
    }

    /// Key under which resources carry their type tag.
    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    /// Key under which a response envelope nests its resources.
    pub fn envelope_key(&self) -> &str {
        &self.envelope_key
    }

    /// Unwrap a response into its resource records, in order.
    ///
    /// Null yields nothing, an array yields its elements, and an object
    /// holding the envelope key yields whatever is nested there. Any other
    /// value is a single record.
    pub fn objects_from_response<'r>(&self, response: &'r Json) -> Vec<&'r Json> {
        match response {
            Json::Null => vec![],
            Json::Array(records) => records.iter().collect(),
            Json::Object(fields) => match fields.get(&self.envelope_key) {
                Some(Json::Array(records)) => records.iter().collect(),
                Some(Json::Null) => vec![],
                Some(record @ Json::Object(_)) => vec![record],
                _ => vec![response],
            },
            scalar => vec![scalar],
        }
    }

    /// The mapper for the type tag of the response's first record.
    pub fn mapper_for_response(&self, response: &Json) -> Result<&dyn ResourceMapper> {
        let tag = self
            .objects_from_response(response)
            .first()
            .copied()
            .and_then(|record| resource::type_tag(record, &self.type_key));

        match tag {
            Some(tag) => self.mapper_for_resource_type(tag),
            None => Err(Error::no_mapper_registered("an untagged response")),
        }
    }

    pub fn mapper_for_resource_type(&self, tag: &str) -> Result<&dyn ResourceMapper> {
        self.by_tag
            .get(tag)
            .map(|mapper| &**mapper)
            .ok_or_else(|| Error::no_mapper_registered(format!("resource type `{tag}`")))
    }

    pub fn mapper_for_entity_type(&self, name: &str) -> Result<&dyn ResourceMapper> {
        let entity = self.schema().entity_by_name(name)?;
        self.mapper_for_entity(entity.id)
    }

    /// The mapper registered for the entity type, or else for its nearest
    /// ancestor that has one.
    pub fn mapper_for_entity(&self, entity: EntityId) -> Result<&dyn ResourceMapper> {
        self.registered(entity).ok_or_else(|| {
            let lookup = match self.schema().entities.get(&entity) {
                Some(entity) => format!("entity type `{}`", entity.name),
                None => format!("{entity:?}"),
            };
            Error::no_mapper_registered(lookup)
        })
    }

    /// Like [`Registry::mapper_for_entity`], falling back to a plain
    /// [`EntityMapper`].
    pub fn mapper_or_default(&self, entity: EntityId) -> &dyn ResourceMapper {
        match self.registered(entity) {
            Some(mapper) => mapper,
            None => self.defaults.get(&entity).expect("invalid entity ID"),
        }
    }

    fn registered(&self, entity: EntityId) -> Option<&dyn ResourceMapper> {
        self.schema()
            .lineage(entity)
            .find_map(|ancestor| self.by_entity.get(&ancestor.id))
            .map(|mapper| &**mapper)
    }

    /// The entity type a type tag names, by schema declaration or else by
    /// the mapper registered for the tag.
    pub fn entity_for_tag(&self, tag: &str) -> Result<EntityId> {
        if let Some(entity) = self.schema().entity_by_tag(tag) {
            return Ok(entity.id);
        }

        self.by_tag
            .get(tag)
            .map(|mapper| mapper.entity())
            .ok_or_else(|| Error::unknown_resource_type(tag))
    }

    /// The concrete entity type of a resource expected to belong to
    /// `declared`'s family.
    ///
    /// An untagged resource is of the declared type. A tag naming an entity
    /// type outside the family fails with a coercion error.
    pub fn concrete_entity(&self, declared: EntityId, resource: &Json) -> Result<EntityId> {
        let Some(tag) = resource::type_tag(resource, &self.type_key) else {
            return Ok(declared);
        };

        let concrete = self.entity_for_tag(tag)?;
        if !self.schema().is_a(concrete, declared) {
            return Err(Error::coercion(
                format_args!("resource type `{tag}`"),
                format!("a member of `{}`", self.schema().entity(declared).name),
            ));
        }

        Ok(concrete)
    }

    /// The concrete entity type of a resource nested under the relationship.
    pub fn entity_type_for(
        &self,
        relationship: &Relationship,
        resource: &Json,
    ) -> Result<EntityId> {
        self.concrete_entity(relationship.target, resource)
    }

    /// Map every record of a response, dispatching each on its type tag.
    ///
    /// Records share one session, so the first write to a field of an
    /// instance wins over later records. A configuration error aborts the
    /// batch; any other error fails only its record.
    pub fn map_response(&self, cx: &mut dyn Context, response: &Json) -> Result<Batch> {
        let mut inbound = Inbound::new(self, cx);
        let mut batch = Batch::default();

        for (index, record) in self.objects_from_response(response).into_iter().enumerate() {
            let mapper = match resource::type_tag(record, &self.type_key) {
                Some(tag) => self.mapper_for_resource_type(tag)?,
                None if record.is_object() => {
                    return Err(Error::no_mapper_registered("an untagged resource")
                        .context(format!("mapping record {index}")))
                }
                None => {
                    batch.push(
                        index,
                        Err(Error::coercion(resource::shape(record), "a resource object")),
                    )?;
                    continue;
                }
            };

            batch.push(index, inbound.map_record(mapper, record))?;
        }

        log::debug!(
            "mapped {} records, {} failed",
            batch.mapped.len(),
            batch.failures.len()
        );

        Ok(batch)
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("introspector", &self.introspector)
            .field("converters", &self.converters)
            .field("by_tag", &self.by_tag.keys().collect::<Vec<_>>())
            .field("by_entity", &self.by_entity.keys().collect::<Vec<_>>())
            .field("type_key", &self.type_key)
            .field("envelope_key", &self.envelope_key)
            .finish()
    }
}
