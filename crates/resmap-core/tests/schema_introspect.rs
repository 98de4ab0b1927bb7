use resmap_core::schema::{
    Attribute, AttributeKind, Cardinality, EntityDef, Introspector, RelationshipDef,
};
use resmap_core::Schema;

use std::sync::Arc;

fn schema() -> Schema {
    Schema::builder()
        .entity(
            EntityDef::new("Person")
                .resource_type("person")
                .identifying_keys(["identifier"])
                .attribute(Attribute::new("identifier", AttributeKind::String).wire_key("id"))
                .attribute(Attribute::new("name", AttributeKind::String))
                .relationship(RelationshipDef::to_many("communities", "Community").ignored()),
        )
        .entity(
            EntityDef::new("PersonUser")
                .resource_type("personUser")
                .parent("Person")
                .attribute(Attribute::new("email", AttributeKind::String).required())
                .attribute(Attribute::new("name", AttributeKind::String).required()),
        )
        .entity(
            EntityDef::new("Community")
                .resource_type("community")
                .identifying_keys(["identifier"])
                .attribute(Attribute::new("identifier", AttributeKind::String).wire_key("id"))
                .relationship(RelationshipDef::to_many("members", "Person")),
        )
        .build()
        .unwrap()
}

#[test]
fn inherited_fields_come_first() {
    let introspector = Introspector::new(schema());
    let user = introspector.descriptors_for("PersonUser").unwrap();

    let names: Vec<_> = user.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["identifier", "name", "email"]);
    assert_eq!(user.relationships.len(), 1);
    assert_eq!(user.relationships[0].name, "communities");
    assert!(user.relationships[0].ignored);
}

#[test]
fn child_fields_override_in_place() {
    let introspector = Introspector::new(schema());

    let person = introspector.descriptors_for("Person").unwrap();
    assert!(!person.attribute("name").unwrap().required);

    let user = introspector.descriptors_for("PersonUser").unwrap();
    assert!(user.attribute("name").unwrap().required);
}

#[test]
fn identifying_keys_are_inherited() {
    let introspector = Introspector::new(schema());
    let user = introspector.descriptors_for("PersonUser").unwrap();

    assert_eq!(user.identifying_keys, ["identifier"]);
    assert!(user.is_identifying("identifier"));
    assert!(!user.is_identifying("email"));

    let keys = user.identifying_attributes().unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].wire_key, "id");

    // Identifying keys are unique across the family rooted at `Person`
    let person = introspector.descriptors_for("Person").unwrap();
    assert_eq!(user.family, person.entity);
    assert_eq!(person.family, person.entity);
}

#[test]
fn relationship_metadata_is_preserved() {
    let introspector = Introspector::new(schema());
    let community = introspector.descriptors_for("Community").unwrap();
    let members = community.relationship("members").unwrap();

    assert_eq!(members.cardinality, Cardinality::ToMany);
    assert_eq!(members.wire_key, "members");
    assert!(members.identifying_keys.is_empty());
    assert_eq!(
        introspector.schema().entity(members.target).name,
        "Person"
    );
}

#[test]
fn unknown_entity_type() {
    let introspector = Introspector::new(schema());
    let err = introspector.descriptors_for("Spaceship").unwrap_err();

    assert!(err.is_unknown_entity_type());
    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "unknown entity type `Spaceship`");
}

#[test]
fn descriptors_are_cached() {
    let introspector = Introspector::new(schema());

    let first = introspector.descriptors_for("Community").unwrap();
    let second = introspector.descriptors_for("Community").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn concurrent_lookups_agree() {
    let introspector = Arc::new(Introspector::new(schema()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let introspector = introspector.clone();
            std::thread::spawn(move || introspector.descriptors_for("PersonUser").unwrap())
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for result in &results {
        assert_eq!(**result, *results[0]);
    }

    let cached = introspector.descriptors_for("PersonUser").unwrap();
    assert!(results.iter().any(|result| Arc::ptr_eq(result, &cached)));
}

#[test]
fn lineage_and_membership() {
    let schema = schema();
    let person = schema.entity_by_name("Person").unwrap().id;
    let user = schema.entity_by_name("PersonUser").unwrap().id;
    let community = schema.entity_by_name("Community").unwrap().id;

    assert!(schema.is_a(user, person));
    assert!(schema.is_a(person, person));
    assert!(!schema.is_a(person, user));
    assert!(!schema.is_a(community, person));

    let lineage: Vec<_> = schema.lineage(user).map(|e| e.name.as_str()).collect();
    assert_eq!(lineage, ["PersonUser", "Person"]);

    assert_eq!(schema.entity_by_tag("personUser").unwrap().id, user);
    assert!(schema.entity_by_tag("business").is_none());
}
