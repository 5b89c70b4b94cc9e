//! End-to-end behaviour of the dispatcher and the data utilities together.

use casekit_test::prelude::*;
use casekit_util::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Dispatch
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn earliest_matching_case_wins() {
    init_tracing();
    let d = Dispatcher::new(vec![
        Case::returning([Matcher::when(guards::is_number)], "number"),
        Case::returning([Matcher::literal(1)], "one"),
        Case::returning([Matcher::any()], "anything"),
    ]);
    assert_eq!(d.call(&args(json!([1]))), Ok("number"));
    assert_eq!(d.call(&args(json!(["1"]))), Ok("anything"));
}

#[test]
fn empty_dispatcher_never_matches() {
    let d: Dispatcher<()> = Dispatcher::empty();
    for input in [json!([]), json!([null]), json!([1, "a"])] {
        assert!(matches!(d.call(&args(input)), Err(MatchError::NoMatch { .. })));
    }
}

#[test]
fn tuple_length_must_agree() {
    let d = Dispatcher::new(vec![Case::returning(
        [Matcher::tuple([Matcher::any(), Matcher::any()])],
        (),
    )]);
    assert!(d.call(&args(json!([[1, 2]]))).is_ok());
    assert!(d.call(&args(json!([[1]]))).is_err());
    assert!(d.call(&args(json!([[1, 2, 3]]))).is_err());
}

#[test]
fn struct_matches_subset_of_keys() {
    let d = Dispatcher::new(vec![Case::returning([Matcher::from(v(json!({ "a": 1 })))], ())]);
    assert!(d.call(&[v(json!({ "a": 1, "b": 99 }))]).is_ok());
    assert!(d.call(&[v(json!({ "b": 99 }))]).is_err());
}

#[test]
fn literal_zero_is_strict() {
    let d = Dispatcher::new(vec![Case::returning([Matcher::literal(0)], ())]);
    assert!(d.call(&args(json!([0]))).is_ok());
    assert!(d.call(&args(json!(["0"]))).is_err());
    assert!(d.call(&args(json!([false]))).is_err());
}

#[test]
fn custom_values_match_by_identity() {
    let at = Timestamp(1_700_000_000_000).value();
    let d = Dispatcher::new(vec![
        Case::returning([Matcher::literal(at.clone())], "same instant"),
        Case::returning([Matcher::when(guards::is_custom)], "other custom"),
        Case::returning([Matcher::when(guards::is_plain_object)], "object"),
    ]);

    assert_eq!(d.call(&[at]), Ok("same instant"));
    assert_eq!(
        d.call(&[Timestamp(1_700_000_000_000).value()]),
        Ok("other custom")
    );
}

#[test]
fn no_match_error_lists_arguments() {
    let d = Dispatcher::new(vec![Case::returning([Matcher::literal(1)], ())]);
    let err = d.call(&args(json!(["x", { "k": [true] }]))).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"no case matched arguments ("x", { k: [true] })"#
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Evolve and traverse
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn evolve_nested_transforms() {
    let spec = EvolveSpec::new()
        .transform("a", |x| Value::from(x.as_f64().unwrap_or_default() + 1.0))
        .nested(
            "b",
            EvolveSpec::new().transform("c", |x| Value::from(x.as_f64().unwrap_or_default() * 2.0)),
        );

    let source = v(json!({ "a": 1, "b": { "c": 2 } }));
    assert_eq!(evolve(&spec, &source), v(json!({ "a": 2, "b": { "c": 4 } })));
    assert_eq!(source, v(json!({ "a": 1, "b": { "c": 2 } })));
}

#[test]
fn evolve_derives_missing_key_from_whole_object() {
    let sum = evolver(EvolveSpec::new().transform("z", |o| {
        let x = o.get("x").as_f64().unwrap_or_default();
        let y = o.get("y").as_f64().unwrap_or_default();
        Value::from(x + y)
    }));
    assert_eq!(sum(&v(json!({ "x": 1, "y": 2 }))), v(json!({ "x": 1, "y": 2, "z": 3 })));
}

#[test]
fn evolve_maps_over_arrays_of_objects() {
    let spec = EvolveSpec::new().nested(
        "items",
        EvolveSpec::new().transform("qty", |q| Value::from(q.as_f64().unwrap_or_default() * 10.0)),
    );
    let out = evolve(&spec, &v(json!({ "items": [{ "qty": 1 }, { "qty": 2, "sku": "b" }] })));
    assert_eq!(
        out,
        v(json!({ "items": [{ "qty": 10 }, { "qty": 20, "sku": "b" }] }))
    );
}

#[test]
fn traverse_then_evolve() {
    let redact = traverser(|leaf, key| match key {
        Some("password") => Value::from("***"),
        _ => leaf.clone(),
    });
    let stamp = evolver(EvolveSpec::new().literal("redacted", true));

    let input = v(json!({
        "user": { "name": "a", "password": "hunter2" },
        "logins": [{ "password": "x" }]
    }));
    assert_eq!(
        stamp(&redact(&input)),
        v(json!({
            "user": { "name": "a", "password": "***" },
            "logins": [{ "password": "***" }],
            "redacted": true
        }))
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tree building
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn list_to_tree_links_children() {
    let records = args(json!([
        { "id": 1, "parent": null },
        { "id": 2, "parent": 1 },
        { "id": 3, "parent": 1 }
    ]));
    let tree = list_to_tree(&TreeKeys::default(), &records).unwrap();
    assert_eq!(
        tree,
        v(json!({
            "id": 1, "parent": null,
            "children": [
                { "id": 2, "parent": 1, "children": [] },
                { "id": 3, "parent": 1, "children": [] }
            ]
        }))
    );
}

#[test]
fn list_to_tree_without_root_fails() {
    let records = args(json!([{ "id": 1, "parent": 2 }, { "id": 2, "parent": 1 }]));
    assert_eq!(
        list_to_tree(&TreeKeys::default(), &records),
        Err(TreeError::MissingRoot)
    );
}

#[test]
fn tree_builder_with_custom_keys() {
    init_tracing();
    let build = tree_builder(TreeKeys::new("key", "up", "nodes"));
    let tree = build(&args(json!([
        { "key": "b", "up": "a" },
        { "key": "a" }
    ])))
    .unwrap();
    assert_eq!(
        tree,
        v(json!({ "key": "a", "nodes": [{ "key": "b", "up": "a", "nodes": [] }] }))
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Async combinators and guards
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
struct Rejected(String);

impl std::fmt::Display for Rejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[tokio::test]
async fn await_obj_resolves_mixed_fields() {
    let resolved = await_obj([
        ("a".to_string(), Eventual::<_, Rejected>::pending(async { Ok(Value::from(1)) })),
        ("b".to_string(), Eventual::ready(Value::from(2))),
    ])
    .await
    .unwrap();
    assert_eq!(Value::Object(resolved), v(json!({ "a": 1, "b": 2 })));
}

#[tokio::test]
async fn await_obj_rejects_with_first_failure() {
    let err = await_obj([
        ("a".to_string(), Eventual::pending(async { Ok(Value::from(1)) })),
        (
            "b".to_string(),
            Eventual::pending(async { Err(Rejected("X".into())) }),
        ),
    ])
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "X");
}

#[test]
fn tap_pipe_sees_original_input() {
    let first_call = std::sync::Arc::new(std::sync::Mutex::new(None));
    let record = std::sync::Arc::clone(&first_call);

    let pipeline = pipe_tap::<i64, ()>()
        .then_sync(move |init, prev| {
            *record.lock().unwrap() = Some((*init, prev));
            Ok(init + 1)
        })
        .then_sync(|_, prev| Ok(prev.unwrap_or_default() + 10))
        .then_sync(|_, prev| Ok(prev.unwrap_or_default() * 2));

    let result = pipeline.run(10);
    assert!(result.is_ready());
    assert_eq!(result.try_ready().ok(), Some(Ok(42)));
    assert_eq!(*first_call.lock().unwrap(), Some((10, None)));
}

#[tokio::test]
async fn pipe_async_feeds_dispatch_results() {
    let classify = std::sync::Arc::new(Dispatcher::new(vec![
        Case::returning([Matcher::when(guards::is_string)], Value::from("text")),
        Case::calling([Matcher::any()], |args| Value::from(args[0].type_name())),
    ]));

    let pipeline = pipe_async::<Value, MatchError>()
        .then(|value| Eventual::pending(async move { Ok(Value::from(vec![value])) }))
        .then_sync(move |wrapped| classify.call(&[wrapped]));

    assert_eq!(pipeline.run(Value::from("x")).await, Ok(Value::from("array")));
}

#[test]
fn fail_on_guards_values() {
    let present = fail_on(Value::is_null, "N/A");
    assert_eq!(present(Value::from("x")), Ok(Value::from("x")));
    assert_eq!(present(Value::Null).unwrap_err().to_string(), "N/A");
}
