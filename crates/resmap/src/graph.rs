use crate::{Context, ObjectId, Predicate, Related};

use indexmap::IndexMap;
use resmap_core::schema::{EntityId, Relationship};
use resmap_core::{err, Result, Schema, Value};
use std::sync::Arc;

/// An in-memory [`Context`].
///
/// Instances live for as long as the graph does; there is no commit or
/// rollback. Lookups scan every live instance, so the graph suits tests and
/// small embedded uses rather than large stores.
#[derive(Debug)]
pub struct Graph {
    schema: Arc<Schema>,
    objects: Vec<Option<Object>>,
}

#[derive(Debug, Clone)]
struct Object {
    entity: EntityId,
    attributes: IndexMap<String, Value>,
    relationships: IndexMap<String, Related>,
}

impl Graph {
    pub fn new(schema: impl Into<Arc<Schema>>) -> Graph {
        Graph {
            schema: schema.into(),
            objects: vec![],
        }
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.objects.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live instances whose concrete type is exactly `entity`, in insertion
    /// order.
    pub fn objects_of(&self, entity: EntityId) -> Vec<ObjectId> {
        self.live()
            .filter(|(_, object)| object.entity == entity)
            .map(|(id, _)| id)
            .collect()
    }

    fn live(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(index, object)| Some((ObjectId(index), object.as_ref()?)))
    }

    fn get(&self, id: ObjectId) -> Result<&Object> {
        self.objects
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| err!("{id:?} is not in the graph"))
    }

    fn get_mut(&mut self, id: ObjectId) -> Result<&mut Object> {
        self.objects
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| err!("{id:?} is not in the graph"))
    }

    fn relationship(&self, entity: EntityId, name: &str) -> Result<&Relationship> {
        self.schema
            .lineage(entity)
            .find_map(|entity| entity.relationship(name))
            .ok_or_else(|| {
                err!(
                    "`{}` has no relationship `{name}`",
                    self.schema.entity(entity).name
                )
            })
    }
}

impl Context for Graph {
    fn find(&self, entity: EntityId, predicate: &Predicate) -> Result<Vec<ObjectId>> {
        Ok(self
            .live()
            .filter(|(_, object)| self.schema.is_a(object.entity, entity))
            .filter(|(_, object)| predicate.matches(|name| object.attributes.get(name)))
            .map(|(id, _)| id)
            .collect())
    }

    fn insert(&mut self, entity: EntityId) -> Result<ObjectId> {
        if !self.schema.entities.contains_key(&entity) {
            return Err(resmap_core::Error::unknown_entity_type(format!("{entity:?}")));
        }

        self.objects.push(Some(Object {
            entity,
            attributes: IndexMap::new(),
            relationships: IndexMap::new(),
        }));
        Ok(ObjectId(self.objects.len() - 1))
    }

    fn delete(&mut self, object: ObjectId) -> Result<()> {
        self.get(object)?;
        self.objects[object.0] = None;

        // Drop dangling references
        for other in self.objects.iter_mut().flatten() {
            for related in other.relationships.values_mut() {
                match related {
                    Related::One(target) if *target == Some(object) => *target = None,
                    Related::Many(targets) => targets.retain(|target| *target != object),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn entity_of(&self, object: ObjectId) -> Result<EntityId> {
        Ok(self.get(object)?.entity)
    }

    fn attribute(&self, object: ObjectId, name: &str) -> Result<Option<Value>> {
        Ok(self.get(object)?.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, object: ObjectId, name: &str, value: Option<Value>) -> Result<()> {
        let object = self.get_mut(object)?;
        match value {
            Some(value) => {
                object.attributes.insert(name.to_string(), value);
            }
            None => {
                object.attributes.shift_remove(name);
            }
        }
        Ok(())
    }

    fn related(&self, object: ObjectId, relationship: &str) -> Result<Related> {
        let found = self.get(object)?;
        if let Some(related) = found.relationships.get(relationship) {
            return Ok(related.clone());
        }

        let relationship = self.relationship(found.entity, relationship)?;
        Ok(if relationship.is_to_many() {
            Related::Many(vec![])
        } else {
            Related::One(None)
        })
    }

    fn set_related(
        &mut self,
        object: ObjectId,
        relationship: &str,
        related: Related,
    ) -> Result<()> {
        let entity = self.get(object)?.entity;
        let declared = self.relationship(entity, relationship)?;

        if declared.is_to_many() != matches!(related, Related::Many(_)) {
            return Err(err!(
                "cardinality mismatch setting `{}::{relationship}`",
                self.schema.entity(entity).name
            ));
        }

        for target in related.objects() {
            self.get(*target)?;
        }

        self.get_mut(object)?
            .relationships
            .insert(relationship.to_string(), related);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resmap_core::schema::{Attribute, AttributeKind, EntityDef, RelationshipDef};

    fn schema() -> Arc<Schema> {
        Arc::new(
            Schema::builder()
                .entity(
                    EntityDef::new("Person")
                        .identifying_keys(["identifier"])
                        .attribute(Attribute::new("identifier", AttributeKind::String))
                        .relationship(RelationshipDef::to_many("friends", "Person"))
                        .relationship(RelationshipDef::to_one("partner", "Person")),
                )
                .entity(EntityDef::new("PersonUser").parent("Person"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn find_includes_descendants() {
        let schema = schema();
        let person = schema.entity_by_name("Person").unwrap().id;
        let user = schema.entity_by_name("PersonUser").unwrap().id;
        let mut graph = Graph::new(schema);

        let a = graph.insert(person).unwrap();
        let b = graph.insert(user).unwrap();
        graph.set_attribute(a, "identifier", Some("p1".into())).unwrap();
        graph.set_attribute(b, "identifier", Some("p1".into())).unwrap();

        let predicate = Predicate::new().and_eq("identifier", "p1".into());
        assert_eq!(graph.find(person, &predicate).unwrap(), vec![a, b]);
        assert_eq!(graph.find(user, &predicate).unwrap(), vec![b]);
    }

    #[test]
    fn unset_relationships_default_by_cardinality() {
        let schema = schema();
        let person = schema.entity_by_name("Person").unwrap().id;
        let mut graph = Graph::new(schema);
        let a = graph.insert(person).unwrap();

        assert_eq!(graph.related(a, "friends").unwrap(), Related::Many(vec![]));
        assert_eq!(graph.related(a, "partner").unwrap(), Related::One(None));
        assert!(graph.related(a, "employer").is_err());
    }

    #[test]
    fn delete_unlinks_references() {
        let schema = schema();
        let person = schema.entity_by_name("Person").unwrap().id;
        let mut graph = Graph::new(schema);
        let a = graph.insert(person).unwrap();
        let b = graph.insert(person).unwrap();

        graph.set_related(a, "friends", Related::Many(vec![b])).unwrap();
        graph.set_related(a, "partner", Related::One(Some(b))).unwrap();
        graph.delete(b).unwrap();

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.related(a, "friends").unwrap(), Related::Many(vec![]));
        assert_eq!(graph.related(a, "partner").unwrap(), Related::One(None));
    }

    #[test]
    fn cardinality_is_checked() {
        let schema = schema();
        let person = schema.entity_by_name("Person").unwrap().id;
        let mut graph = Graph::new(schema);
        let a = graph.insert(person).unwrap();

        assert!(graph
            .set_related(a, "partner", Related::Many(vec![a]))
            .is_err());
    }
}
