mod entity;
pub use entity::{EntityMapper, OrphanPolicy};

mod inbound;
pub use inbound::Inbound;

mod outbound;
pub use outbound::Outbound;

mod trail;

use crate::{Batch, Context, ObjectId, Registry};

use resmap_core::schema::{EntityId, Relationship};
use resmap_core::{Error, Json, Result};
use serde_json::Map;

/// Maps resources of one entity type (and its descendants) to and from
/// entity instances.
///
/// Implementors provide attribute and relationship mapping in both
/// directions. Whole-record operations are provided on top of those and run
/// inside an [`Inbound`] or [`Outbound`] session, which carries the
/// registry, the context, and the diagnostics collected so far.
pub trait ResourceMapper: Send + Sync {
    /// The entity type this mapper is declared for.
    fn entity(&self) -> EntityId;

    /// Set the instance's attributes from the resource.
    fn map_attributes_from(
        &self,
        inbound: &mut Inbound<'_>,
        object: ObjectId,
        resource: &Json,
    ) -> Result<()>;

    /// Link the instance's relationships from the nested resources.
    fn map_relationships_from(
        &self,
        inbound: &mut Inbound<'_>,
        object: ObjectId,
        resource: &Json,
    ) -> Result<()>;

    /// Write the instance's attributes into the resource.
    fn map_attributes_to(
        &self,
        outbound: &mut Outbound<'_>,
        object: ObjectId,
        resource: &mut Map<String, Json>,
    ) -> Result<()>;

    /// Write the instance's relationships into the resource.
    fn map_relationships_to(
        &self,
        outbound: &mut Outbound<'_>,
        object: ObjectId,
        resource: &mut Map<String, Json>,
    ) -> Result<()>;

    /// Select the concrete entity type of a nested resource.
    ///
    /// A type tag on the resource selects the tagged entity type, which must
    /// be the relationship's declared target or one of its descendants.
    /// Otherwise the declared target is used.
    fn entity_type_for_relationship(
        &self,
        registry: &Registry,
        relationship: &Relationship,
        resource: &Json,
    ) -> Result<EntityId> {
        registry.entity_type_for(relationship, resource)
    }

    /// Map attributes, then relationships.
    fn map_from(&self, inbound: &mut Inbound<'_>, object: ObjectId, resource: &Json) -> Result<()> {
        self.map_attributes_from(inbound, object, resource)?;
        self.map_relationships_from(inbound, object, resource)
    }

    /// Map attributes, then relationships.
    fn map_to(
        &self,
        outbound: &mut Outbound<'_>,
        object: ObjectId,
        resource: &mut Map<String, Json>,
    ) -> Result<()> {
        self.map_attributes_to(outbound, object, resource)?;
        self.map_relationships_to(outbound, object, resource)
    }

    /// Resolve the instance a resource describes and map the resource onto
    /// it.
    fn object_from_resource(
        &self,
        registry: &Registry,
        cx: &mut dyn Context,
        resource: &Json,
    ) -> Result<Mapped> {
        Inbound::new(registry, cx).map_record(self, resource)
    }

    /// Map every resource of a response with this mapper.
    fn objects_from_response(
        &self,
        registry: &Registry,
        cx: &mut dyn Context,
        response: &Json,
    ) -> Result<Batch> {
        let mut inbound = Inbound::new(registry, cx);
        let mut batch = Batch::default();

        for (index, record) in registry.objects_from_response(response).into_iter().enumerate() {
            batch.push(index, inbound.map_record(self, record))?;
        }

        Ok(batch)
    }

    /// Serialize an instance into a resource.
    fn resource_from_object(
        &self,
        registry: &Registry,
        cx: &dyn Context,
        object: ObjectId,
    ) -> Result<Serialized> {
        Outbound::new(registry, cx).serialize_record(self, object)
    }
}

/// A data problem found while mapping one record.
///
/// The field named by `path` was left unset; the rest of the record was
/// still mapped.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Location of the field within the record, e.g. `members[1].name`
    pub path: String,

    pub error: Error,
}

/// Result of mapping one resource record onto the entity graph.
#[derive(Debug, Clone)]
pub struct Mapped {
    pub object: ObjectId,

    /// True if the record's instance was inserted rather than found
    pub created: bool,

    pub diagnostics: Vec<Diagnostic>,
}

/// Result of serializing one instance.
#[derive(Debug, Clone)]
pub struct Serialized {
    pub resource: Json,

    pub diagnostics: Vec<Diagnostic>,
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

impl Mapped {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Serialized {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
