use layer_patch::{Operation, Patcher, PatcherConfig};
use serde_json::{json, Value};

fn patcher() -> Patcher {
    let config: PatcherConfig = serde_json::from_value(json!({
        "propertyNameMap": {
            "typea": {"a": "aaa", "b": "BCE"},
            "typeb": {"fred": "Ted", "frodo": "dodo"}
        }
    }))
    .unwrap();
    Patcher::new(config)
}

fn apply(kind: &str, mut object: Value, ops: &[Operation]) -> Value {
    patcher().apply_to(&mut object, Some(kind), ops).unwrap();
    object
}

#[test]
fn set_uses_mapped_names() {
    let object = apply(
        "typea",
        json!({"aaa": 5, "BCE": true}),
        &[Operation::set("a", json!(8)), Operation::set("b", json!("fred"))],
    );
    assert_eq!(object, json!({"aaa": 8, "BCE": "fred"}));
}

#[test]
fn unmapped_kind_uses_raw_names() {
    let object = apply(
        "typeC",
        json!({"aaa": 5, "BCE": true}),
        &[Operation::set("a", json!(8)), Operation::set("b", json!("fred"))],
    );
    assert_eq!(object, json!({"aaa": 5, "BCE": true, "a": 8, "b": "fred"}));
}

#[test]
fn delete_uses_mapped_names() {
    let object = apply(
        "typeb",
        json!({"Ted": "is dead", "dodo": {"airSpeedVelocity": 0}, "hah": "ho"}),
        &[Operation::delete("fred"), Operation::delete("frodo")],
    );
    assert_eq!(object, json!({"hah": "ho"}));
}

#[test]
fn add_uses_mapped_names() {
    let object = apply(
        "typea",
        json!({"hey": "ho"}),
        &[
            Operation::add("a", json!("AA")),
            Operation::add("b", json!("BB")),
            Operation::add("c", json!("CC")),
        ],
    );
    assert_eq!(
        object,
        json!({"aaa": ["AA"], "BCE": ["BB"], "c": ["CC"], "hey": "ho"})
    );
}

#[test]
fn remove_uses_mapped_names_and_creates_targets() {
    let object = apply(
        "typeb",
        json!({"Ted": ["a", "b"]}),
        &[
            Operation::remove("fred", json!("a")),
            Operation::remove("frodo.records", json!("b")),
            Operation::remove("c", json!("c")),
        ],
    );
    assert_eq!(object, json!({"Ted": ["b"], "dodo": {"records": []}, "c": []}));
}

#[test]
fn calls_without_kind_are_not_mapped() {
    let mut object = json!({});
    patcher()
        .apply_to(&mut object, None, &[Operation::set("a", json!(1))])
        .unwrap();
    assert_eq!(object, json!({"a": 1}));
}

#[test]
fn camel_case_runs_before_mapping() {
    let mut patcher = Patcher::new(
        PatcherConfig::new()
            .camel_case(true)
            .map_property("typea", "fooBar", "baz"),
    );
    let mut object = json!({});
    patcher
        .apply_to(
            &mut object,
            Some("typea"),
            &[Operation::set("foo-bar", json!({})), Operation::set("foo_bar.x", json!(2))],
        )
        .unwrap();
    assert_eq!(object, json!({"baz": {"x": 2}}));
}
