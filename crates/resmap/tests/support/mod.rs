#![allow(dead_code)]

use resmap::schema::{Attribute, AttributeKind, EntityDef, RelationshipDef};
use resmap::{Context, Graph, ObjectId, Registry, Schema, Value};

use std::sync::Arc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Communities (with businesses as a kind of community), people (with
/// users as a kind of person), and devices.
pub fn schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder()
            .entity(
                EntityDef::new("Community")
                    .resource_type("community")
                    .identifying_keys(["identifier"])
                    .attribute(
                        Attribute::new("identifier", AttributeKind::String)
                            .wire_key("id")
                            .required(),
                    )
                    .attribute(Attribute::new("name", AttributeKind::String).required())
                    .attribute(Attribute::new("createdAt", AttributeKind::Date))
                    .relationship(RelationshipDef::to_many("members", "Person"))
                    .relationship(RelationshipDef::to_one("sponsor", "Community")),
            )
            .entity(
                EntityDef::new("Business")
                    .resource_type("business")
                    .parent("Community")
                    .attribute(Attribute::new("revenue", AttributeKind::Decimal)),
            )
            .entity(
                EntityDef::new("Person")
                    .resource_type("person")
                    .identifying_keys(["identifier"])
                    .attribute(Attribute::new("identifier", AttributeKind::String).wire_key("id"))
                    .attribute(Attribute::new("name", AttributeKind::String))
                    .attribute(Attribute::new("email", AttributeKind::String))
                    .relationship(RelationshipDef::to_one("partner", "Person"))
                    .relationship(RelationshipDef::to_many("affiliations", "Community"))
                    .relationship(RelationshipDef::to_many("memberships", "Community").ignored())
                    .relationship(RelationshipDef::to_many("devices", "Device").embed()),
            )
            .entity(
                EntityDef::new("PersonUser")
                    .resource_type("personUser")
                    .parent("Person")
                    .attribute(Attribute::new("username", AttributeKind::String).required()),
            )
            .entity(
                EntityDef::new("Device")
                    .resource_type("device")
                    .identifying_keys(["serial"])
                    .attribute(
                        Attribute::new("serial", AttributeKind::String).wire_key("serialNumber"),
                    )
                    .attribute(Attribute::new("model", AttributeKind::String))
                    .relationship(RelationshipDef::to_one("owner", "Person").required().embed()),
            )
            .build()
            .unwrap(),
    )
}

pub fn registry(schema: &Arc<Schema>) -> Registry {
    Registry::builder(schema.clone())
        .register_default_mappers()
        .build()
        .unwrap()
}

pub fn fixture() -> (Registry, Graph) {
    init_logging();
    let schema = schema();
    (registry(&schema), Graph::new(schema))
}

pub fn string(cx: &dyn Context, object: ObjectId, attribute: &str) -> Option<String> {
    cx.attribute(object, attribute)
        .unwrap()
        .as_ref()
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub fn entity_name(registry: &Registry, cx: &dyn Context, object: ObjectId) -> String {
    let entity = cx.entity_of(object).unwrap();
    registry.schema().entity(entity).name.clone()
}

/// The single instance of `entity` whose identifier is `identifier`.
pub fn find(registry: &Registry, cx: &dyn Context, entity: &str, identifier: &str) -> ObjectId {
    let entity = registry.schema().entity_by_name(entity).unwrap().id;
    let predicate = resmap::Predicate::new().and_eq("identifier", Value::from(identifier));
    let found = cx.find(entity, &predicate).unwrap();
    assert_eq!(found.len(), 1, "expected one `{identifier}`, found {found:?}");
    found[0]
}
