//! `Value` — The dynamic data that flows between inputs, matchers and handlers
//!
//! Every matcher, handler and utility in casekit speaks this one erased type.
//! Primitives and plain containers are closed variants. Anything else (dates,
//! handles, domain objects) goes through [`CustomValue`] and is compared by
//! identity, never structurally.
//!
//! # Plain objects
//!
//! [`Value::Object`] is the only variant that structural matchers and the
//! evolution/traversal utilities treat as a "plain object". Arrays and custom
//! values never qualify, even though both are reference types in dynamic hosts.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An insertion-ordered plain object.
///
/// Key order is preserved so results are deterministic across runs.
pub type Object = IndexMap<String, Value>;

static UNDEFINED: Value = Value::Undefined;

/// Extension trait for reference types that are not plain objects.
///
/// Implement this for domain types (timestamps, handles, ...) and wrap them
/// with [`Value::custom`]. Custom values are strictly equal only to clones of
/// the same `Arc`.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use casekit::{CustomValue, Value};
///
/// #[derive(Debug)]
/// struct Timestamp(u64);
///
/// impl CustomValue for Timestamp {
///     fn custom_type_name(&self) -> &'static str {
///         "timestamp"
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let ts = Value::custom(Timestamp(1_700_000_000));
/// assert!(ts.is_custom());
/// assert!(!ts.is_plain_object());
/// assert_eq!(ts.type_name(), "timestamp");
/// ```
pub trait CustomValue: Send + Sync + fmt::Debug {
    /// Returns a human-readable type identifier, e.g. `"date"`.
    fn custom_type_name(&self) -> &'static str;

    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// The erased value type.
///
/// # Variants
///
/// - `Undefined` — absent value (missing key, missing argument)
/// - `Null` — explicit null
/// - `Bool`, `Number`, `String` — primitives
/// - `Array` — ordered list
/// - `Object` — plain object with insertion-ordered keys
/// - `Custom` — any other reference type, see [`CustomValue`]
///
/// # Equality
///
/// `PartialEq` is deep structural equality (handy for assertions).
/// Matching uses [`Value::strict_eq`], which never equates containers.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value at all.
    #[default]
    Undefined,

    /// Explicit null.
    Null,

    /// Boolean.
    Bool(bool),

    /// Number (one numeric type, IEEE semantics).
    Number(f64),

    /// String.
    String(String),

    /// Ordered list of values.
    Array(Vec<Value>),

    /// Plain object.
    Object(Object),

    /// Non-plain reference type.
    Custom(Arc<dyn CustomValue>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Wrap a custom reference type.
    pub fn custom(value: impl CustomValue + 'static) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// Create an empty plain object.
    #[must_use]
    pub fn object() -> Self {
        Self::Object(Object::new())
    }

    /// Strict equality: primitives by value with no coercion, custom values by
    /// identity. Arrays and objects are never strictly equal to anything, since
    /// owned containers carry no reference identity.
    ///
    /// ```
    /// use casekit::Value;
    ///
    /// assert!(Value::from(0).strict_eq(&Value::from(0)));
    /// assert!(!Value::from(0).strict_eq(&Value::from("0")));
    /// assert!(!Value::from(0).strict_eq(&Value::from(false)));
    /// assert!(!Value::Null.strict_eq(&Value::Undefined));
    /// ```
    #[must_use]
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(_) | Self::Object(_), _) | (_, Self::Array(_) | Self::Object(_)) => false,
            _ => self == other,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `Null` or `Undefined`.
    #[inline]
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    #[inline]
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns `true` only for [`Value::Object`].
    #[inline]
    #[must_use]
    pub fn is_plain_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Returns `true` for anything that is neither a plain object nor an array.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Self::Object(_) | Self::Array(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the inner custom value, if any.
    ///
    /// Use [`CustomValue::as_any`] to downcast to the concrete type.
    #[inline]
    #[must_use]
    pub fn as_custom(&self) -> Option<&dyn CustomValue> {
        match self {
            Self::Custom(c) => Some(c.as_ref()),
            _ => None,
        }
    }

    /// Property access with dynamic-host semantics.
    ///
    /// Missing keys, and any key on a non-object, yield `Undefined`.
    ///
    /// ```
    /// use casekit::Value;
    /// use serde_json::json;
    ///
    /// let v = Value::from(json!({ "a": 1 }));
    /// assert_eq!(v.get("a"), &Value::from(1));
    /// assert!(v.get("b").is_undefined());
    /// assert!(Value::from(3).get("a").is_undefined());
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Self::Object(map) => map.get(key).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// Returns a string describing the kind of this value.
    ///
    /// For `Custom` values this delegates to [`CustomValue::custom_type_name`].
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Custom(c) => c.custom_type_name(),
        }
    }

    /// Convert to JSON. `Undefined`, `Custom` and non-finite numbers become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Undefined | Self::Null | Self::Custom(_) => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Array(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn number_to_json(n: f64) -> serde_json::Value {
    // Integral values serialize as integers so `1` does not come back as `1.0`.
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Display: compact, JS-like rendering used in error messages and traces
// ═══════════════════════════════════════════════════════════════════════════════

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(map) => {
                if map.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str(" }")
            }
            Self::Custom(c) => write!(f, "<{}>", c.custom_type_name()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Self::Object(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Undefined, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().collect())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}
