//! Plain guard functions.
//!
//! These are the function form of [`TypeMatcher`](crate::TypeMatcher): usable
//! anywhere a `Fn(&Value) -> bool` is expected, e.g. `Matcher::when(is_null)`
//! or as the predicate of a pass-through guard.

use crate::Value;

pub fn is_undefined(value: &Value) -> bool {
    value.is_undefined()
}

pub fn is_null(value: &Value) -> bool {
    value.is_null()
}

/// `Null` or `Undefined`.
pub fn is_nil(value: &Value) -> bool {
    value.is_nil()
}

pub fn is_bool(value: &Value) -> bool {
    value.is_bool()
}

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

pub fn is_plain_object(value: &Value) -> bool {
    value.is_plain_object()
}

pub fn is_custom(value: &Value) -> bool {
    value.is_custom()
}

/// An array whose elements are all plain objects (vacuously true when empty).
pub fn is_array_of_plain_objects(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_plain_object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_array_of_plain_objects() {
        assert!(is_array_of_plain_objects(&Value::from(json!([{ "a": 1 }, {}]))));
        assert!(is_array_of_plain_objects(&Value::from(json!([]))));
        assert!(!is_array_of_plain_objects(&Value::from(json!([{ "a": 1 }, 2]))));
        assert!(!is_array_of_plain_objects(&Value::from(json!({ "a": 1 }))));
    }

    #[test]
    fn test_nil_guards() {
        assert!(is_nil(&Value::Null));
        assert!(is_nil(&Value::Undefined));
        assert!(is_null(&Value::Null));
        assert!(!is_null(&Value::Undefined));
        assert!(is_undefined(&Value::Undefined));
    }
}
