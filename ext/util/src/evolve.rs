//! Object evolution — apply a spec of per-key transforms to an object.
//!
//! An [`EvolveSpec`] maps keys to [`Evolver`]s. Evolving a source object
//! produces a new object where each spec key is rewritten according to its
//! evolver and the shape of the source value under that key. Everything else
//! passes through.
//!
//! # Example
//!
//! ```
//! use casekit::Value;
//! use casekit_util::{evolve, EvolveSpec};
//! use serde_json::json;
//!
//! let inc = |v: &Value| Value::from(v.as_f64().unwrap_or(0.0) + 1.0);
//! let spec = EvolveSpec::new()
//!     .transform("a", inc)
//!     .nested("b", EvolveSpec::new().transform("c", |v| Value::from(v.as_f64().unwrap_or(0.0) * 2.0)));
//!
//! let source = Value::from(json!({ "a": 1, "b": { "c": 2 } }));
//! assert_eq!(evolve(&spec, &source), Value::from(json!({ "a": 2, "b": { "c": 4 } })));
//! ```

use casekit::{guards, Case, Dispatcher, Handler, Matcher, Value};
use std::fmt;
use std::sync::{Arc, LazyLock};

type TransformFn = dyn Fn(&Value) -> Value + Send + Sync;

/// What happens to one key.
#[derive(Clone)]
pub enum Evolver {
    /// Applied to the key's value, or to the whole source when the key is
    /// missing (which lets a spec derive new keys).
    Transform(Arc<TransformFn>),

    /// A sub-spec for a nested object, or for each element of an array of
    /// plain objects.
    Nested(EvolveSpec),

    /// Replaces the key's value outright.
    Literal(Value),
}

impl Evolver {
    fn kind(&self) -> &'static str {
        match self {
            Self::Transform(_) => "transform",
            Self::Nested(_) => "nested",
            Self::Literal(_) => "literal",
        }
    }
}

impl fmt::Debug for Evolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transform(_) => f.write_str("Transform(..)"),
            Self::Nested(spec) => f.debug_tuple("Nested").field(spec).finish(),
            Self::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
        }
    }
}

/// Ordered key-to-[`Evolver`] rules.
///
/// Keys the source lacks are appended to the result in rule order.
/// Adding a key twice replaces the earlier rule in place.
#[derive(Debug, Clone, Default)]
pub struct EvolveSpec {
    rules: Vec<(String, Evolver)>,
}

impl EvolveSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rule(mut self, key: impl Into<String>, evolver: Evolver) -> Self {
        let key = key.into();
        match self.rules.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = evolver,
            None => self.rules.push((key, evolver)),
        }
        self
    }

    #[must_use]
    pub fn transform<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.rule(key, Evolver::Transform(Arc::new(f)))
    }

    #[must_use]
    pub fn nested(self, key: impl Into<String>, spec: EvolveSpec) -> Self {
        self.rule(key, Evolver::Nested(spec))
    }

    #[must_use]
    pub fn literal(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.rule(key, Evolver::Literal(value.into()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Evolver)> {
        self.rules.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rule selection
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    TransformValue,
    TransformSource,
    MapArray,
    Recurse,
    Replace,
}

/// Selects a rule from `(evolver kind, source[key])`.
static RULES: LazyLock<Dispatcher<Rule>> = LazyLock::new(|| {
    Dispatcher::new(vec![
        Case::returning(
            [Matcher::literal("transform"), Matcher::when(|v| !v.is_undefined())],
            Rule::TransformValue,
        ),
        Case::returning(
            [Matcher::literal("transform"), Matcher::any()],
            Rule::TransformSource,
        ),
        Case::returning(
            [
                Matcher::literal("nested"),
                Matcher::when(guards::is_array_of_plain_objects),
            ],
            Rule::MapArray,
        ),
        Case::returning(
            [Matcher::literal("nested"), Matcher::when(guards::is_plain_object)],
            Rule::Recurse,
        ),
        Case::returning([Matcher::any(), Matcher::any()], Rule::Replace),
    ])
});

fn select_rule(evolver: &Evolver, current: &Value) -> Rule {
    let kind = Value::from(evolver.kind());
    match RULES.select(&[&kind, current]).map(|case| &case.handler) {
        Some(Handler::Value(rule)) => *rule,
        // Unreachable: the table ends with a wildcard case of static rules.
        _ => Rule::Replace,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Evolution
// ═══════════════════════════════════════════════════════════════════════════════

/// Evolve `source` with `spec`, returning a new value.
///
/// For each spec key `K`:
///
/// | Evolver | `source[K]` | Result |
/// |---------|-------------|--------|
/// | `Transform(f)` | defined (including `Null`) | `f(source[K])` |
/// | `Transform(f)` | `Undefined` | `f(source)` |
/// | `Nested(s)` | array of plain objects | each element evolved with `s` |
/// | `Nested(s)` | plain object | `source[K]` evolved with `s` |
/// | `Nested(_)` | anything else | unchanged |
/// | `Literal(v)` | anything | `v` |
///
/// A source that is not a plain object is returned unchanged. The source is
/// never mutated.
pub fn evolve(spec: &EvolveSpec, source: &Value) -> Value {
    let Some(object) = source.as_object() else {
        return source.clone();
    };

    let mut result = object.clone();
    for (key, evolver) in spec.iter() {
        let current = source.get(key);
        let next = match (select_rule(evolver, current), evolver) {
            (Rule::TransformValue, Evolver::Transform(f)) => f(current),
            (Rule::TransformSource, Evolver::Transform(f)) => f(source),
            (Rule::MapArray, Evolver::Nested(sub)) => Value::Array(
                current
                    .as_array()
                    .unwrap_or_default()
                    .iter()
                    .map(|item| evolve(sub, item))
                    .collect(),
            ),
            (Rule::Recurse, Evolver::Nested(sub)) => evolve(sub, current),
            (_, Evolver::Literal(v)) => v.clone(),
            _ => continue,
        };
        result.insert(key.to_owned(), next);
    }
    Value::Object(result)
}

/// The spec-only form of [`evolve`]: a reusable transform.
///
/// ```
/// use casekit::Value;
/// use casekit_util::{evolver, EvolveSpec};
///
/// let stamp = evolver(EvolveSpec::new().literal("version", 2));
/// let out = stamp(&Value::from_iter([("version".to_string(), Value::from(1))]));
/// assert_eq!(out.get("version"), &Value::from(2));
/// ```
pub fn evolver(spec: EvolveSpec) -> impl Fn(&Value) -> Value + Send + Sync {
    move |source| evolve(&spec, source)
}
