use resmap_core::schema::EntityId;
use resmap_core::{Result, Value};

use std::fmt;

/// The persistent context the mapping engine reads and mutates.
///
/// A context owns every entity instance; the engine only holds
/// [`ObjectId`] handles. Committing, rolling back, and confining the context
/// to one writer are the implementor's concern.
pub trait Context {
    /// Instances of `entity` (or one of its descendants) matching every
    /// clause of the predicate.
    fn find(&self, entity: EntityId, predicate: &Predicate) -> Result<Vec<ObjectId>>;

    /// Insert a new, empty instance of `entity`.
    fn insert(&mut self, entity: EntityId) -> Result<ObjectId>;

    /// Remove an instance from the context.
    fn delete(&mut self, object: ObjectId) -> Result<()>;

    /// The concrete entity type of an instance.
    fn entity_of(&self, object: ObjectId) -> Result<EntityId>;

    fn attribute(&self, object: ObjectId, name: &str) -> Result<Option<Value>>;

    fn set_attribute(&mut self, object: ObjectId, name: &str, value: Option<Value>) -> Result<()>;

    fn related(&self, object: ObjectId, relationship: &str) -> Result<Related>;

    fn set_related(&mut self, object: ObjectId, relationship: &str, related: Related) -> Result<()>;
}

/// Handle to an entity instance inside a [`Context`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// The current value of a relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Related {
    One(Option<ObjectId>),
    Many(Vec<ObjectId>),
}

/// A conjunction of attribute equality clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<(String, Value)>,
}

impl Related {
    pub fn as_one(&self) -> Option<ObjectId> {
        match self {
            Self::One(object) => *object,
            Self::Many(_) => None,
        }
    }

    /// Every object in the relationship, in order.
    pub fn objects(&self) -> &[ObjectId] {
        match self {
            Self::One(object) => object.as_slice(),
            Self::Many(objects) => objects,
        }
    }
}

impl Predicate {
    pub fn new() -> Predicate {
        Predicate::default()
    }

    pub fn and_eq(mut self, attribute: impl Into<String>, value: Value) -> Predicate {
        self.clauses.push((attribute.into(), value));
        self
    }

    pub fn clauses(&self) -> &[(String, Value)] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate the predicate against an attribute lookup.
    pub fn matches<'a>(&self, mut lookup: impl FnMut(&str) -> Option<&'a Value>) -> bool {
        self.clauses
            .iter()
            .all(|(attribute, expected)| lookup(attribute.as_str()) == Some(expected))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ObjectId({})", self.0)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (attribute, value)) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{attribute} == {value}")?;
        }
        Ok(())
    }
}
