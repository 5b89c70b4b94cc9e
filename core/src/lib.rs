//! casekit - Structural pattern matching over dynamic values
//!
//! A first-match-wins dispatch engine: an ordered list of cases, each a
//! positional list of matchers plus a handler, compiled into a callable.
//!
//! # Architecture
//!
//! - [`Value`] — Dynamic value model (primitives, arrays, ordered objects, custom)
//! - [`InputMatcher`] — Guard trait over a single value (non-generic, shareable!)
//! - [`Matcher`] — Closed tagged variant: guard, literal, tuple, or struct
//! - [`Case<R>`] — Positional matchers + [`Handler<R>`]
//! - [`Dispatcher<R>`] — Ordered cases with first-match-wins semantics
//!
//! # Key Design Insights
//!
//! 1. **Tagged matchers**: a matcher's category is fixed at construction,
//!    never sniffed from its runtime shape.
//!
//! 2. **Strict literals**: `0` never matches `"0"` or `false`. Containers are
//!    matched structurally through `Tuple` and `Struct`, not by equality.
//!
//! 3. **Missing is `Undefined`**: a missing argument position or object key
//!    is matched as [`Value::Undefined`], which only wildcards and explicit
//!    `Undefined` checks accept.
//!
//! # Example
//!
//! ```
//! use casekit::prelude::*;
//! use serde_json::json;
//!
//! let area = Dispatcher::new(vec![
//!     Case::calling(
//!         [Matcher::object([("kind", Matcher::literal("circle")), ("r", Matcher::when(guards::is_number))])],
//!         |args| {
//!             let r = args[0].get("r").as_f64().unwrap_or(0.0);
//!             std::f64::consts::PI * r * r
//!         },
//!     ),
//!     Case::calling(
//!         [Matcher::object([("kind", Matcher::literal("square")), ("side", Matcher::any())])],
//!         |args| args[0].get("side").as_f64().map_or(0.0, |s| s * s),
//!     ),
//! ]);
//!
//! assert_eq!(area.call(&[Value::from(json!({ "kind": "square", "side": 3 }))]), Ok(9.0));
//! assert!(area.call(&[Value::from(json!({ "kind": "triangle" }))]).is_err());
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod case;
mod dispatcher;
pub mod guards;
mod input_matcher;
mod matcher;
mod trace;
mod value;

#[cfg(feature = "config")]
mod config;
#[cfg(feature = "config")]
mod registry;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use case::{Case, Handler};
pub use dispatcher::Dispatcher;
pub use input_matcher::InputMatcher;
pub use matcher::Matcher;
pub use value::{CustomValue, Object, Value};

// Concrete guards
pub use input_matcher::{AnyMatcher, FnMatcher, StringMatcher, TypeMatcher};

// Trace types
pub use trace::{CaseTrace, DispatchTrace, MatchTrace};

// Config (feature-gated)
#[cfg(feature = "config")]
pub use config::{CaseConfig, DispatcherConfig, MatcherConfig, StringMatchType};
#[cfg(feature = "config")]
pub use registry::{GuardRegistry, GuardRegistryBuilder};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use casekit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::guards;
    pub use crate::{
        // Guards
        AnyMatcher,
        // Core types
        Case,
        // Trace types
        CaseTrace,
        // Errors
        ConfigError,
        // Traits
        CustomValue,
        DispatchTrace,
        Dispatcher,
        FnMatcher,
        Handler,
        InputMatcher,
        MatchError,
        MatchTrace,
        Matcher,
        Object,
        StringMatcher,
        TypeMatcher,
        Value,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum allowed depth for nested matchers.
///
/// This limit protects against stack overflow from deeply nested tuple and
/// struct matchers. Validate at build time via [`Dispatcher::validate`].
pub const MAX_DEPTH: usize = 32;

/// Maximum number of cases in a single [`Dispatcher`].
///
/// A wide case list bypasses [`MAX_DEPTH`] but still makes every call linear
/// in its length.
pub const MAX_CASES: usize = 256;

/// Maximum length for non-regex string guard patterns loaded from config.
pub const MAX_PATTERN_LENGTH: usize = 8192;

/// Maximum length for regex patterns loaded from config.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Evaluation failure.
///
/// The only error [`Dispatcher::call`] produces. Errors raised by handlers
/// are the handler's own business and are never wrapped in this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// No case matched the arguments.
    #[error("no case matched arguments ({args})")]
    NoMatch {
        /// Human-readable rendering of the attempted arguments.
        args: String,
    },
}

impl MatchError {
    /// Build a [`MatchError::NoMatch`] rendering `args` comma-separated.
    #[must_use]
    pub fn no_match(args: &[Value]) -> Self {
        let args = args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::NoMatch { args }
    }
}

/// Errors from dispatcher construction and validation.
///
/// These errors are caught at build or config load time, not evaluation time.
/// Fix the configuration and rebuild the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Matcher nesting exceeds [`MAX_DEPTH`].
    #[error(
        "matcher nesting depth is {depth}, but maximum allowed is {max}; \
         reduce nesting or split the dispatcher"
    )]
    DepthExceeded {
        /// Actual depth of the deepest matcher.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },

    /// Too many cases in a single dispatcher.
    #[error("dispatcher has {count} cases, but maximum allowed is {max}")]
    TooManyCases {
        /// Actual count of cases.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A case has no matchers and would accept every call.
    #[error("case {index} has no matchers; use a wildcard to match anything")]
    EmptyCase {
        /// Index of the offending case.
        index: usize,
    },

    /// A guard name was not found in the registry.
    #[error("unknown guard \"{name}\"{}", fmt_available(.available))]
    UnknownGuard {
        /// The unregistered guard name.
        name: String,
        /// Guard names that ARE registered (for self-correcting error messages).
        available: Vec<String>,
    },

    /// A regex or string pattern is invalid.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        reason: String,
    },

    /// A string guard pattern exceeds the maximum allowed length.
    #[error("pattern length is {len}, but maximum allowed is {max}")]
    PatternTooLong {
        /// Actual length of the pattern.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// Configuration deserialization failed.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The underlying error message.
        reason: String,
    },
}

fn fmt_available(available: &[String]) -> String {
    if available.is_empty() {
        " (no guards are registered)".to_string()
    } else {
        format!(" (registered: {})", available.join(", "))
    }
}
