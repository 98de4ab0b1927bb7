use resmap_core::schema::{AttributeKind, Cardinality, Introspector};
use resmap_core::Schema;

const COMMUNITY: &str = r#"{
    "entities": [
        {
            "name": "Community",
            "resourceType": "community",
            "identifyingKeys": ["identifier"],
            "attributes": [
                { "name": "identifier", "kind": "string", "wireKey": "id", "required": true },
                { "name": "name", "kind": "string" },
                { "name": "createdAt", "kind": "date" },
                { "name": "accent", "kind": { "transformable": "Color" } }
            ],
            "relationships": [
                { "name": "members", "target": "Person", "cardinality": "toMany" },
                { "name": "owner", "target": "Person", "identifyingKeys": ["email"], "embed": true }
            ]
        },
        {
            "name": "Person",
            "resourceType": "person",
            "identifyingKeys": ["identifier"],
            "attributes": [
                { "name": "identifier", "kind": "string", "wireKey": "id" },
                { "name": "email", "kind": "string" }
            ]
        }
    ]
}"#;

#[test]
fn loads_entities_attributes_and_relationships() {
    let schema = Schema::from_json(COMMUNITY).unwrap();
    let introspector = Introspector::new(schema);
    let community = introspector.descriptors_for("Community").unwrap();

    assert_eq!(community.resource_type.as_deref(), Some("community"));

    let identifier = community.attribute("identifier").unwrap();
    assert_eq!(identifier.wire_key, "id");
    assert!(identifier.required);

    let name = community.attribute("name").unwrap();
    assert_eq!(name.wire_key, "name");
    assert!(!name.required);

    assert_eq!(
        community.attribute("accent").unwrap().kind,
        AttributeKind::transformable("Color")
    );

    let members = community.relationship("members").unwrap();
    assert_eq!(members.cardinality, Cardinality::ToMany);
    assert!(!members.embed);

    let owner = community.relationship("owner").unwrap();
    assert_eq!(owner.cardinality, Cardinality::ToOne);
    assert_eq!(owner.identifying_keys, ["email"]);
    assert!(owner.embed);
}

#[test]
fn unknown_fields_are_rejected() {
    let src = r#"{ "entities": [ { "name": "A", "traits": [] } ] }"#;
    let err = Schema::from_json(src).unwrap_err();
    assert!(err.to_string().starts_with("failed to parse schema definition"));
}

#[test]
fn unknown_attribute_kind_is_rejected() {
    let src = r#"{
        "entities": [ { "name": "A", "attributes": [ { "name": "x", "kind": "uuid" } ] } ]
    }"#;
    assert!(Schema::from_json(src).is_err());
}

#[test]
fn definitions_are_validated() {
    let src = r#"{
        "entities": [
            { "name": "A", "relationships": [ { "name": "b", "target": "B" } ] }
        ]
    }"#;
    let err = Schema::from_json(src).unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.is_configuration());
}
