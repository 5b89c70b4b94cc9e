//! Deep leaf mapping.
//!
//! [`traverse`] rebuilds a nested value, passing every leaf (anything that is
//! neither a plain object nor an array) through a function.

use casekit::{guards, Case, Dispatcher, Handler, Matcher, Object, Value};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Object,
    Array,
    Leaf,
}

static SHAPES: LazyLock<Dispatcher<Shape>> = LazyLock::new(|| {
    Dispatcher::new(vec![
        Case::returning([Matcher::when(guards::is_plain_object)], Shape::Object),
        Case::returning([Matcher::when(guards::is_array)], Shape::Array),
        Case::returning([Matcher::any()], Shape::Leaf),
    ])
});

fn shape_of(value: &Value) -> Shape {
    match SHAPES.select(&[value]).map(|case| &case.handler) {
        Some(Handler::Value(shape)) => *shape,
        _ => Shape::Leaf,
    }
}

fn walk<F>(f: &F, value: &Value, key: Option<&str>) -> Value
where
    F: Fn(&Value, Option<&str>) -> Value,
{
    match (shape_of(value), value) {
        (Shape::Object, Value::Object(map)) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), walk(f, v, Some(k))))
                .collect::<Object>(),
        ),
        (Shape::Array, Value::Array(items)) => {
            Value::Array(items.iter().map(|item| walk(f, item, None)).collect())
        }
        _ => f(value, key),
    }
}

/// Rebuild `value`, replacing every leaf with `f(leaf, key)`.
///
/// `key` is the property name when the leaf was reached through an object,
/// and `None` for array elements and for a top-level leaf. The input is
/// never mutated; the result is a fresh tree of the same shape.
///
/// ```
/// use casekit::Value;
/// use casekit_util::traverse;
/// use serde_json::json;
///
/// let upper = |v: &Value, _key: Option<&str>| match v.as_str() {
///     Some(s) => Value::from(s.to_uppercase()),
///     None => v.clone(),
/// };
/// let out = traverse(upper, &Value::from(json!({ "a": "x", "b": ["y", 1] })));
/// assert_eq!(out, Value::from(json!({ "a": "X", "b": ["Y", 1] })));
/// ```
pub fn traverse<F>(f: F, value: &Value) -> Value
where
    F: Fn(&Value, Option<&str>) -> Value,
{
    walk(&f, value, None)
}

/// The function-only form of [`traverse`]: a reusable transform.
pub fn traverser<F>(f: F) -> impl Fn(&Value) -> Value
where
    F: Fn(&Value, Option<&str>) -> Value,
{
    move |value| walk(&f, value, None)
}
