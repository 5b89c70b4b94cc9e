//! Config types for declarative dispatcher construction.
//!
//! These types mirror the runtime types but are serde-deserializable,
//! enabling config-driven dispatchers via [`GuardRegistry::load()`](crate::GuardRegistry::load).
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type | Loader method |
//! |-------------|-------------|---------------|
//! | [`DispatcherConfig`] | [`Dispatcher`](crate::Dispatcher) | `GuardRegistry::load()` |
//! | [`CaseConfig`] | [`Case`](crate::Case) | `GuardRegistry::load_case()` |
//! | [`MatcherConfig`] | [`Matcher`](crate::Matcher) | `GuardRegistry::load_matcher()` |
//!
//! Handlers loaded from config are always static values.

use crate::{ConfigError, Dispatcher, GuardRegistry, Value};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Configuration for a [`Dispatcher`](crate::Dispatcher).
///
/// ```yaml
/// cases:
///   - when: [ { type: literal, value: 1 }, { type: any } ]
///     then: "one"
///   - when: [ { type: guard, name: is_string } ]
///     then: "string"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct DispatcherConfig<A> {
    /// Cases to evaluate in order (first-match-wins).
    pub cases: Vec<CaseConfig<A>>,
}

/// Configuration for a [`Case`](crate::Case).
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct CaseConfig<A> {
    /// One matcher per argument position.
    pub when: Vec<MatcherConfig>,

    /// The static value returned when every matcher accepts.
    pub then: A,
}

/// Configuration for a [`Matcher`](crate::Matcher).
///
/// Uses `#[serde(tag = "type")]` for discriminated union deserialization:
///
/// ```json
/// { "type": "any" }
/// { "type": "literal", "value": 42 }
/// { "type": "tuple", "items": [...] }
/// { "type": "struct", "fields": { "kind": { ... } } }
/// { "type": "guard", "name": "is_null" }
/// { "type": "string", "value": "/api", "match_type": "prefix" }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatcherConfig {
    /// The wildcard.
    Any,

    /// Matches only `Undefined` (a missing argument or key).
    Undefined,

    /// Literal matcher data.
    ///
    /// Arrays load as tuples and objects as structural matchers, the same as
    /// `Matcher::from(Value)`.
    Literal {
        /// The value to compare against.
        value: Value,
    },

    /// Fixed-length positional match.
    Tuple {
        /// One matcher per element.
        items: Vec<MatcherConfig>,
    },

    /// Subset match over object keys, in declaration order.
    Struct {
        /// Key to matcher.
        fields: IndexMap<String, MatcherConfig>,
    },

    /// A named guard resolved through the registry.
    Guard {
        /// Registered guard name, e.g. `is_plain_object`.
        name: String,
    },

    /// A string guard.
    String {
        /// The pattern.
        value: String,
        /// How `value` is applied.
        #[serde(default)]
        match_type: StringMatchType,
        /// ASCII case-insensitive comparison.
        #[serde(default)]
        ignore_case: bool,
    },
}

/// How a [`MatcherConfig::String`] pattern is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringMatchType {
    #[default]
    Exact,
    Prefix,
    Suffix,
    Contains,
    /// Rust `regex` crate syntax, linear time.
    Regex,
}

impl<A: DeserializeOwned> DispatcherConfig<A> {
    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] if the document does not
    /// deserialize.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] if the document does not
    /// deserialize.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidConfig {
            reason: e.to_string(),
        })
    }
}

impl<A: Clone + Send + Sync + 'static> DispatcherConfig<A> {
    /// Load against the default guard registry.
    ///
    /// # Errors
    ///
    /// See [`GuardRegistry::load`].
    pub fn build(self) -> Result<Dispatcher<A>, ConfigError> {
        GuardRegistry::default().load(self)
    }
}
