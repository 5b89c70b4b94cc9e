//! Matcher — What a single input position is tested against
//!
//! A [`Matcher`] is a closed tagged variant: a guard, a literal, a fixed-length
//! tuple, or a structural object. Matching is a `match` over the tag, so there
//! is no runtime category sniffing of the matcher itself.

use crate::{AnyMatcher, FnMatcher, InputMatcher, MatchTrace, Value};
use std::sync::{Arc, LazyLock};

static WILDCARD: LazyLock<Arc<dyn InputMatcher>> = LazyLock::new(|| Arc::new(AnyMatcher));

/// Tests one input value.
///
/// # Variants
///
/// - `Predicate` — a guard; matches when the guard returns `true`
/// - `Literal` — strict equality, see [`Value::strict_eq`]
/// - `Tuple` — an array of exactly the same length, position by position
/// - `Struct` — a plain object containing every listed key (extra keys ignored)
///
/// # Example
///
/// ```
/// use casekit::{Matcher, Value};
/// use serde_json::json;
///
/// let m = Matcher::object([("kind", Matcher::literal("circle")), ("r", Matcher::any())]);
/// assert!(m.matches(&Value::from(json!({ "kind": "circle", "r": 2, "color": "red" }))));
/// assert!(!m.matches(&Value::from(json!({ "kind": "square", "r": 2 }))));
///
/// let pair = Matcher::tuple([Matcher::literal(1), Matcher::any()]);
/// assert!(pair.matches(&Value::from(vec![1, 9])));
/// assert!(!pair.matches(&Value::from(vec![1])));
/// assert!(!pair.matches(&Value::from(vec![1, 9, 9])));
/// ```
#[derive(Debug, Clone)]
pub enum Matcher {
    /// A guard over the raw value.
    Predicate(Arc<dyn InputMatcher>),

    /// Strict equality against a value.
    Literal(Value),

    /// Fixed-length positional match. No prefix semantics.
    Tuple(Vec<Matcher>),

    /// Subset match over plain-object keys, in declaration order.
    Struct(Vec<(String, Matcher)>),
}

impl Matcher {
    /// The wildcard. Every call shares one guard allocation.
    #[must_use]
    pub fn any() -> Self {
        Self::Predicate(Arc::clone(&WILDCARD))
    }

    /// A guard from a closure or guard function.
    ///
    /// ```
    /// use casekit::{guards, Matcher, Value};
    ///
    /// assert!(Matcher::when(guards::is_null).matches(&Value::Null));
    /// assert!(Matcher::when(|v| v.as_f64().is_some_and(|n| n > 0.0)).matches(&Value::from(3)));
    /// ```
    pub fn when<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(FnMatcher::new(f)))
    }

    /// A guard from any [`InputMatcher`].
    pub fn guard(guard: impl InputMatcher + 'static) -> Self {
        Self::Predicate(Arc::new(guard))
    }

    /// Strict equality against `value`.
    ///
    /// Arrays and objects have no strict equality, so they compile through
    /// [`From<Value>`] into tuple and struct matchers of literals.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::from(value.into())
    }

    /// Positional matcher for an array of exactly `items.len()` elements.
    pub fn tuple(items: impl IntoIterator<Item = Matcher>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    /// A structural object matcher from `(key, matcher)` pairs.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Matcher)>) -> Self {
        Self::Struct(fields.into_iter().map(|(k, m)| (k.into(), m)).collect())
    }

    /// Test `value` against this matcher.
    ///
    /// Recursion depth follows the matcher, not the value, so deep inputs
    /// cannot blow the stack; see [`crate::MAX_DEPTH`] for the matcher side.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Predicate(guard) => guard.matches(value),
            Self::Literal(expected) => value.strict_eq(expected),
            Self::Tuple(items) => value.as_array().is_some_and(|values| {
                values.len() == items.len()
                    && items.iter().zip(values).all(|(m, v)| m.matches(v))
            }),
            Self::Struct(fields) => {
                value.is_plain_object() && fields.iter().all(|(key, m)| m.matches(value.get(key)))
            }
        }
    }

    /// Match with a full trace for debugging.
    ///
    /// Unlike [`matches()`](Self::matches), tuple and struct children are all
    /// evaluated (no short-circuit). The `matched` result is identical.
    #[must_use]
    pub fn matches_with_trace(&self, value: &Value) -> MatchTrace {
        match self {
            Self::Predicate(guard) => MatchTrace::Predicate {
                matched: guard.matches(value),
                guard: format!("{guard:?}"),
                value: value.to_string(),
            },
            Self::Literal(expected) => MatchTrace::Literal {
                matched: value.strict_eq(expected),
                expected: expected.to_string(),
                value: value.to_string(),
            },
            Self::Tuple(items) => match value.as_array() {
                Some(values) if values.len() == items.len() => {
                    let children: Vec<MatchTrace> = items
                        .iter()
                        .zip(values)
                        .map(|(m, v)| m.matches_with_trace(v))
                        .collect();
                    MatchTrace::Tuple {
                        matched: children.iter().all(MatchTrace::matched),
                        expected_len: items.len(),
                        actual_len: Some(values.len()),
                        children,
                    }
                }
                other => MatchTrace::Tuple {
                    matched: false,
                    expected_len: items.len(),
                    actual_len: other.map(<[Value]>::len),
                    children: Vec::new(),
                },
            },
            Self::Struct(fields) => {
                if !value.is_plain_object() {
                    return MatchTrace::Struct {
                        matched: false,
                        is_object: false,
                        fields: Vec::new(),
                    };
                }
                let fields: Vec<(String, MatchTrace)> = fields
                    .iter()
                    .map(|(key, m)| (key.clone(), m.matches_with_trace(value.get(key))))
                    .collect();
                MatchTrace::Struct {
                    matched: fields.iter().all(|(_, t)| t.matched()),
                    is_object: true,
                    fields,
                }
            }
        }
    }

    #[must_use]
    pub fn is_predicate(&self) -> bool {
        matches!(self, Self::Predicate(_))
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    #[must_use]
    pub fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }

    #[must_use]
    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    /// Nesting depth of this matcher. Leaves count as 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Predicate(_) | Self::Literal(_) => 1,
            Self::Tuple(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            Self::Struct(fields) => 1 + fields.iter().map(|(_, m)| m.depth()).max().unwrap_or(0),
        }
    }
}

/// Literal matcher data, interpreted the way a dynamic host reads it:
/// arrays become tuples, plain objects become structural matchers, and
/// everything else is a literal.
///
/// ```
/// use casekit::{Matcher, Value};
/// use serde_json::json;
///
/// let m = Matcher::from(Value::from(json!({ "a": [1, "x"] })));
/// assert!(m.is_struct());
/// assert!(m.matches(&Value::from(json!({ "a": [1, "x"], "b": 0 }))));
/// ```
impl From<Value> for Matcher {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Tuple(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Struct(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
            other => Self::Literal(other),
        }
    }
}
