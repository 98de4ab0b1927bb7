//! Find-or-create of entity instances by identifying key.

use crate::{Context, ObjectId, Predicate};

use resmap_core::coerce::{self, Converters};
use resmap_core::resource;
use resmap_core::schema::Descriptors;
use resmap_core::{Error, Json, Result, Value};

/// The identifying-key values of one instance, in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identity {
    values: Vec<(String, Value)>,
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub object: ObjectId,

    /// True if the instance did not exist and was inserted
    pub created: bool,
}

impl Identity {
    pub fn new() -> Identity {
        Identity::default()
    }

    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Identity {
        self.values.push((attribute.into(), value.into()));
        self
    }

    /// Extract identifying values from a resource.
    ///
    /// `keys` overrides the entity type's identifying keys when non-empty.
    /// A scalar resource is taken as the value of a single identifying key.
    pub fn from_resource(
        descriptors: &Descriptors,
        keys: &[String],
        resource: &Json,
        converters: &Converters,
    ) -> Result<Identity> {
        let attributes = descriptors.identifying_attributes_for(keys)?;
        let mut identity = Identity::new();

        match resource {
            Json::Object(_) => {
                for attribute in attributes {
                    let value = match resource::field(resource, &attribute.wire_key) {
                        Some(wire) => coerce::decode(attribute, wire, converters)?,
                        None => None,
                    };
                    let Some(value) = value else {
                        return Err(Error::missing_identifying_key(
                            &descriptors.name,
                            &attribute.wire_key,
                        ));
                    };
                    identity.values.push((attribute.name.clone(), value));
                }
            }
            Json::Array(_) => {
                return Err(Error::coercion(
                    resource::shape(resource),
                    format!("a reference to `{}`", descriptors.name),
                ));
            }
            Json::Null => {
                return Err(Error::missing_identifying_key(
                    &descriptors.name,
                    &attributes[0].wire_key,
                ));
            }
            scalar => {
                if let [_, missing, ..] = &attributes[..] {
                    return Err(Error::missing_identifying_key(
                        &descriptors.name,
                        &missing.wire_key,
                    ));
                }
                let attribute = attributes[0];
                let Some(value) = coerce::decode(attribute, scalar, converters)? else {
                    return Err(Error::missing_identifying_key(
                        &descriptors.name,
                        &attribute.wire_key,
                    ));
                };
                identity.values.push((attribute.name.clone(), value));
            }
        }

        Ok(identity)
    }

    pub fn values(&self) -> &[(String, Value)] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Conjunctive equality predicate over the identifying values.
    pub fn predicate(&self) -> Predicate {
        self.values
            .iter()
            .fold(Predicate::new(), |predicate, (attribute, value)| {
                predicate.and_eq(attribute.clone(), value.clone())
            })
    }
}

/// Find the instance of the entity type with the given identity, or insert
/// it.
///
/// The lookup covers the entity type's whole family, so an instance is
/// found whichever type in its lineage a resource names. A new instance gets
/// its identifying attributes set and nothing else. More than one match
/// fails with an ambiguous identity error, and a match outside the entity
/// type with a conflicting entity type error. Neither touches the context.
pub fn resolve(
    cx: &mut dyn Context,
    descriptors: &Descriptors,
    identity: &Identity,
) -> Result<Resolved> {
    if identity.is_empty() {
        return Err(Error::missing_identifying_key(
            &descriptors.name,
            descriptors
                .identifying_keys
                .first()
                .map(String::as_str)
                .unwrap_or("<none>"),
        ));
    }

    let predicate = identity.predicate();
    let matches = cx.find(descriptors.family, &predicate)?;

    match matches[..] {
        [object] => {
            if descriptors.family != descriptors.entity
                && !cx.find(descriptors.entity, &predicate)?.contains(&object)
            {
                return Err(Error::conflicting_entity_type(&descriptors.name)
                    .context(format!("resolving `{}` where {predicate}", descriptors.name)));
            }

            log::debug!("resolved `{}` where {predicate} to {object:?}", descriptors.name);
            Ok(Resolved {
                object,
                created: false,
            })
        }
        [] => {
            let object = cx.insert(descriptors.entity)?;
            for (attribute, value) in identity.values() {
                cx.set_attribute(object, attribute, Some(value.clone()))?;
            }
            log::debug!("created `{}` where {predicate} as {object:?}", descriptors.name);
            Ok(Resolved {
                object,
                created: true,
            })
        }
        _ => Err(Error::ambiguous_identity(&descriptors.name, matches.len())
            .context(format!("resolving `{}` where {predicate}", descriptors.name))),
    }
}
