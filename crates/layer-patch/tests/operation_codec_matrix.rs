use layer_patch::validate::{validate_operation, validate_operations};
use layer_patch::{from_json_ops, to_json_ops, OpKind, Operation, PatchCall, PatchError, Patcher};
use serde_json::json;

#[test]
fn decode_matrix() {
    let cases = [
        (
            json!({"operation": "set", "property": "hey", "value": "howdy"}),
            Operation::set("hey", json!("howdy")),
        ),
        (
            json!({"operation": "delete", "property": "sub_object.subhey"}),
            Operation::delete("sub_object.subhey"),
        ),
        (
            json!({"operation": "add", "property": "outerSet", "id": "b"}),
            Operation::new(OpKind::Add, "outerSet").with_id("b"),
        ),
        (
            json!({"operation": "remove", "property": "outerSet", "id": 12}),
            Operation::new(OpKind::Remove, "outerSet").with_id("12"),
        ),
        (
            json!({"operation": "set", "property": "a\\.b", "value": null}),
            Operation::set("a\\.b", json!(null)),
        ),
    ];

    for (raw, expected) in cases {
        assert_eq!(validate_operation(&raw), Ok(()), "{raw}");
        let decoded = from_json_ops(&json!([raw])).unwrap();
        assert_eq!(decoded, vec![expected]);
    }
}

#[test]
fn encode_then_decode_preserves_operations() {
    let ops = vec![
        Operation::set("sub_object.sub\\.hey", json!({"nested": [1, 2]})),
        Operation::delete("hey").with_value(json!("ignored")),
        Operation::add("outerSet", json!({"id": "d"})).with_id("d"),
        Operation::new(OpKind::Remove, "outerSet").with_id("d"),
    ];
    let encoded = to_json_ops(&ops);
    assert_eq!(validate_operations(&encoded), Ok(()));
    assert_eq!(from_json_ops(&encoded).unwrap(), ops);
}

#[test]
fn validation_rejects_what_decoding_rejects() {
    let bad = [
        json!(null),
        json!({"operation": "merge", "property": "a"}),
        json!({"operation": "set", "property": 3, "value": 1}),
        json!({"operation": "set", "property": "a", "id": {}}),
    ];
    for raw in bad {
        assert!(validate_operation(&raw).is_err(), "{raw}");
        assert!(from_json_ops(&json!([raw])).is_err());
    }
}

#[test]
fn malformed_operations_fail_before_anything_is_applied() {
    let mut object = json!({"hey": "ho"});
    let result = PatchCall::from_json(
        &mut object,
        Some("typea"),
        &json!([
            {"operation": "set", "property": "hey", "value": "howdy"},
            {"operation": "explode", "property": "hey"}
        ]),
    )
    .and_then(|call| Patcher::default().apply(call));
    assert!(matches!(result, Err(PatchError::InvalidOp(_))));
    assert_eq!(object, json!({"hey": "ho"}));
}

#[test]
fn validation_error_names_failing_index() {
    let err = validate_operations(&json!([
        {"operation": "set", "property": "a", "value": 1},
        {"operation": "remove", "property": "a", "value": [1]}
    ]))
    .unwrap_err();
    assert_eq!(err.to_string(), "Error in operation [index = 1] (OP_VALUE_NOT_SCALAR).");
}
