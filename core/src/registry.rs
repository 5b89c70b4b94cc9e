//! Guard registry for config-driven dispatcher construction.
//!
//! Config files cannot carry closures, so guards are referenced by name and
//! resolved here. Each guard is registered once and shared by every matcher
//! that names it.
//!
//! # Example
//!
//! ```
//! use casekit::{DispatcherConfig, GuardRegistryBuilder, Value};
//!
//! let registry = GuardRegistryBuilder::with_defaults()
//!     .guard_fn("is_positive", |v| v.as_f64().is_some_and(|n| n > 0.0))
//!     .build();
//!
//! let config: DispatcherConfig<String> = DispatcherConfig::from_yaml(r#"
//! cases:
//!   - when: [ { type: guard, name: is_positive } ]
//!     then: positive
//!   - when: [ { type: guard, name: is_number } ]
//!     then: other number
//! "#).unwrap();
//!
//! let dispatcher = registry.load(config).unwrap();
//! assert_eq!(dispatcher.call(&[Value::from(3)]).unwrap(), "positive");
//! assert_eq!(dispatcher.call(&[Value::from(-3)]).unwrap(), "other number");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    config::{CaseConfig, DispatcherConfig, MatcherConfig, StringMatchType},
    guards, Case, ConfigError, Dispatcher, FnMatcher, InputMatcher, Matcher, StringMatcher,
    TypeMatcher, MAX_CASES, MAX_PATTERN_LENGTH, MAX_REGEX_PATTERN_LENGTH,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════════

/// Builder for constructing a [`GuardRegistry`].
///
/// Register guards by name, then call [`build()`](Self::build) to produce an
/// immutable registry. No runtime registration is possible after that.
pub struct GuardRegistryBuilder {
    guards: HashMap<String, Arc<dyn InputMatcher>>,
}

impl GuardRegistryBuilder {
    /// Create a new empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            guards: HashMap::new(),
        }
    }

    /// A builder preloaded with every built-in `is_*` guard.
    #[must_use]
    pub fn with_defaults() -> Self {
        let builder = TypeMatcher::ALL
            .into_iter()
            .fold(Self::new(), |b, (name, guard)| b.guard(name, guard));
        builder.guard(
            "is_array_of_plain_objects",
            FnMatcher::named("is_array_of_plain_objects", guards::is_array_of_plain_objects),
        )
    }

    /// Register a guard under `name`. A later registration replaces an earlier one.
    #[must_use]
    pub fn guard(mut self, name: &str, guard: impl InputMatcher + 'static) -> Self {
        self.guards.insert(name.to_owned(), Arc::new(guard));
        self
    }

    /// Register a closure guard under `name`.
    #[must_use]
    pub fn guard_fn<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&crate::Value) -> bool + Send + Sync + 'static,
    {
        self.guard(name, FnMatcher::new(f))
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> GuardRegistry {
        GuardRegistry {
            guards: self.guards,
        }
    }
}

impl Default for GuardRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════════

/// Immutable registry of named guards.
///
/// Constructed via [`GuardRegistryBuilder`]. `Default` carries the built-in
/// `is_*` guards. Use [`load()`](Self::load) to compile config into a
/// runtime [`Dispatcher`].
#[derive(Clone)]
pub struct GuardRegistry {
    guards: HashMap<String, Arc<dyn InputMatcher>>,
}

impl GuardRegistry {
    /// Load a [`Dispatcher`] from configuration.
    ///
    /// The result is validated before it is returned.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::TooManyCases`] — more than [`MAX_CASES`] cases
    /// - [`ConfigError::UnknownGuard`] — a guard name is not registered
    /// - [`ConfigError::InvalidPattern`] — a regex pattern is invalid
    /// - [`ConfigError::PatternTooLong`] — a string pattern exceeds its limit
    /// - [`ConfigError::EmptyCase`] / [`ConfigError::DepthExceeded`] — from
    ///   [`Dispatcher::validate`]
    pub fn load<A>(&self, config: DispatcherConfig<A>) -> Result<Dispatcher<A>, ConfigError>
    where
        A: Clone + Send + Sync + 'static,
    {
        // Checked before compiling so an oversized config does no further work.
        if config.cases.len() > MAX_CASES {
            return Err(ConfigError::TooManyCases {
                count: config.cases.len(),
                max: MAX_CASES,
            });
        }

        let cases = config
            .cases
            .into_iter()
            .map(|c| self.load_case(c))
            .collect::<Result<Vec<_>, _>>()?;

        let dispatcher = Dispatcher::new(cases);
        dispatcher.validate()?;
        Ok(dispatcher)
    }

    /// Load one case with a static handler.
    ///
    /// # Errors
    ///
    /// See [`load_matcher`](Self::load_matcher).
    pub fn load_case<A>(&self, config: CaseConfig<A>) -> Result<Case<A>, ConfigError> {
        let matchers = config
            .when
            .into_iter()
            .map(|m| self.load_matcher(m))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Case::returning(matchers, config.then))
    }

    /// Load a single matcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownGuard`], [`ConfigError::InvalidPattern`]
    /// or [`ConfigError::PatternTooLong`].
    pub fn load_matcher(&self, config: MatcherConfig) -> Result<Matcher, ConfigError> {
        match config {
            MatcherConfig::Any => Ok(Matcher::any()),
            MatcherConfig::Undefined => Ok(Matcher::guard(TypeMatcher::Undefined)),
            MatcherConfig::Literal { value } => Ok(Matcher::from(value)),
            MatcherConfig::Tuple { items } => Ok(Matcher::Tuple(
                items
                    .into_iter()
                    .map(|m| self.load_matcher(m))
                    .collect::<Result<_, _>>()?,
            )),
            MatcherConfig::Struct { fields } => Ok(Matcher::Struct(
                fields
                    .into_iter()
                    .map(|(k, m)| self.load_matcher(m).map(|m| (k, m)))
                    .collect::<Result<_, _>>()?,
            )),
            MatcherConfig::Guard { name } => {
                self.get(&name).ok_or_else(|| ConfigError::UnknownGuard {
                    available: self.names().into_iter().map(str::to_owned).collect(),
                    name,
                })
            }
            MatcherConfig::String {
                value,
                match_type,
                ignore_case,
            } => Self::load_string(value, match_type, ignore_case).map(Matcher::guard),
        }
    }

    fn load_string(
        value: String,
        match_type: StringMatchType,
        ignore_case: bool,
    ) -> Result<StringMatcher, ConfigError> {
        let max = if match_type == StringMatchType::Regex {
            MAX_REGEX_PATTERN_LENGTH
        } else {
            MAX_PATTERN_LENGTH
        };
        if value.len() > max {
            return Err(ConfigError::PatternTooLong {
                len: value.len(),
                max,
            });
        }

        Ok(match match_type {
            StringMatchType::Exact => StringMatcher::exact(value, ignore_case),
            StringMatchType::Prefix => StringMatcher::prefix(value, ignore_case),
            StringMatchType::Suffix => StringMatcher::suffix(value, ignore_case),
            StringMatchType::Contains => StringMatcher::contains(value, ignore_case),
            StringMatchType::Regex => {
                let compiled = if ignore_case {
                    StringMatcher::regex_ignore_case(&value)
                } else {
                    StringMatcher::regex(&value)
                };
                compiled.map_err(|e| ConfigError::InvalidPattern {
                    pattern: value,
                    reason: e.to_string(),
                })?
            }
        })
    }

    /// A matcher for the guard registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Matcher> {
        self.guards.get(name).map(|g| Matcher::Predicate(Arc::clone(g)))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.guards.contains_key(name)
    }

    /// Registered guard names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.guards.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl Default for GuardRegistry {
    fn default() -> Self {
        GuardRegistryBuilder::with_defaults().build()
    }
}

impl std::fmt::Debug for GuardRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardRegistry")
            .field("guards", &self.names())
            .finish()
    }
}
