mod support;

use pretty_assertions::assert_eq;
use resmap::{Context, Related};
use serde_json::json;

#[test]
fn back_references_contain_only_identifying_keys() {
    let (registry, mut graph) = support::fixture();
    let person = registry.schema().entity_by_name("Person").unwrap().id;

    let a = graph.insert(person).unwrap();
    let b = graph.insert(person).unwrap();
    graph.set_attribute(a, "identifier", Some("a".into())).unwrap();
    graph.set_attribute(a, "name", Some("Ann".into())).unwrap();
    graph.set_attribute(b, "identifier", Some("b".into())).unwrap();
    graph.set_attribute(b, "name", Some("Bob".into())).unwrap();
    graph.set_related(a, "partner", Related::One(Some(b))).unwrap();
    graph.set_related(b, "partner", Related::One(Some(a))).unwrap();

    let mapper = registry.mapper_for_entity(person).unwrap();

    let serialized = mapper.resource_from_object(&registry, &graph, a).unwrap();
    assert!(serialized.is_clean());
    assert_eq!(
        serialized.resource,
        json!({"id": "a", "name": "Ann", "partner": {"id": "b"}, "affiliations": [], "devices": []})
    );

    let serialized = mapper.resource_from_object(&registry, &graph, b).unwrap();
    assert_eq!(serialized.resource["partner"], json!({"id": "a"}));
}

#[test]
fn embedding_stops_at_instances_being_serialized() {
    let (registry, mut graph) = support::fixture();
    let person = registry.schema().entity_by_name("Person").unwrap().id;
    let device = registry.schema().entity_by_name("Device").unwrap().id;

    let ann = graph.insert(person).unwrap();
    graph.set_attribute(ann, "identifier", Some("p1".into())).unwrap();

    let phone = graph.insert(device).unwrap();
    graph.set_attribute(phone, "serial", Some("d1".into())).unwrap();
    graph.set_attribute(phone, "model", Some("Phone".into())).unwrap();
    graph.set_related(phone, "owner", Related::One(Some(ann))).unwrap();
    graph.set_related(ann, "devices", Related::Many(vec![phone])).unwrap();

    let serialized = registry
        .mapper_for_entity(person)
        .unwrap()
        .resource_from_object(&registry, &graph, ann)
        .unwrap();

    assert!(serialized.is_clean(), "{:?}", serialized.diagnostics);
    assert_eq!(
        serialized.resource,
        json!({
            "id": "p1",
            "affiliations": [],
            "devices": [{"serialNumber": "d1", "model": "Phone", "owner": {"id": "p1"}}]
        })
    );

    // Starting from the device, the owner is embedded and its devices fall
    // back to references
    let serialized = registry
        .mapper_for_entity(device)
        .unwrap()
        .resource_from_object(&registry, &graph, phone)
        .unwrap();

    assert_eq!(
        serialized.resource,
        json!({
            "serialNumber": "d1",
            "model": "Phone",
            "owner": {"id": "p1", "affiliations": [], "devices": [{"serialNumber": "d1"}]}
        })
    );
}

#[test]
fn cyclic_resources_round_trip() {
    let (registry, mut graph) = support::fixture();
    let mapper = registry.mapper_for_entity_type("Person").unwrap();

    let mapped = mapper
        .object_from_resource(
            &registry,
            &mut graph,
            &json!({
                "id": "a",
                "name": "Ann",
                "partner": {"id": "b", "name": "Bob", "partner": {"id": "a"}}
            }),
        )
        .unwrap();
    assert!(mapped.is_clean(), "{:?}", mapped.diagnostics);

    let b = support::find(&registry, &graph, "Person", "b");
    assert_eq!(graph.related(b, "partner").unwrap(), Related::One(Some(mapped.object)));

    // The back-reference to `a` did not overwrite its name
    assert_eq!(support::string(&graph, mapped.object, "name").as_deref(), Some("Ann"));

    let serialized = mapper
        .resource_from_object(&registry, &graph, mapped.object)
        .unwrap();
    assert_eq!(serialized.resource["partner"], json!({"id": "b"}));
}

#[test]
fn missing_reference_keys_are_reported() {
    let (registry, mut graph) = support::fixture();
    let person = registry.schema().entity_by_name("Person").unwrap().id;

    let a = graph.insert(person).unwrap();
    let anonymous = graph.insert(person).unwrap();
    graph.set_attribute(a, "identifier", Some("a".into())).unwrap();
    graph.set_related(a, "partner", Related::One(Some(anonymous))).unwrap();

    let serialized = registry
        .mapper_for_entity(person)
        .unwrap()
        .resource_from_object(&registry, &graph, a)
        .unwrap();

    assert_eq!(serialized.resource["partner"], json!({}));
    assert_eq!(serialized.diagnostics.len(), 1);
    assert_eq!(serialized.diagnostics[0].path, "partner");
    assert!(serialized.diagnostics[0].error.is_missing_identifying_key());
}
