//! `InputMatcher` — Guards that test a single [`Value`]
//!
//! A guard is the predicate kind of [`Matcher`](crate::Matcher). Guards see the
//! raw value and answer yes or no; they never transform it.
//!
//! # Available Guards
//!
//! - [`AnyMatcher`] — Wildcard, always matches
//! - [`TypeMatcher`] — Matches by value kind (null, string, plain object, ...)
//! - [`StringMatcher`] — Exact / prefix / suffix / contains / regex on strings
//! - [`FnMatcher`] — Wraps an arbitrary closure

use crate::Value;
use std::fmt::{self, Debug};

/// Tests a [`Value`] for a match.
///
/// Implementations must be pure: the engine may call a guard any number of
/// times and in any order across cases.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so dispatchers can live in
/// statics and be shared across threads.
///
/// # Example
///
/// ```
/// use casekit::{InputMatcher, StringMatcher, Value};
///
/// let guard = StringMatcher::prefix("/api/", false);
/// assert!(guard.matches(&Value::from("/api/users")));
/// assert!(!guard.matches(&Value::from(42)));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `InputMatcher`",
    label = "this type cannot be used as a guard",
    note = "use `Matcher::when(|v| ...)` to turn a closure into a guard, or implement `matches(&self, &Value) -> bool`"
)]
pub trait InputMatcher: Send + Sync + Debug {
    /// Check if the given value matches.
    ///
    /// Returns `false` if the value kind is incompatible with this guard.
    fn matches(&self, value: &Value) -> bool;
}

#[diagnostic::do_not_recommend]
impl InputMatcher for Box<dyn InputMatcher> {
    fn matches(&self, value: &Value) -> bool {
        (**self).matches(value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Wildcard
// ═══════════════════════════════════════════════════════════════════════════════

/// Wildcard guard: matches every value, including `Undefined`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyMatcher;

impl InputMatcher for AnyMatcher {
    fn matches(&self, _value: &Value) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Type guards
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches a value by its kind.
///
/// ```
/// use casekit::{InputMatcher, TypeMatcher, Value};
///
/// assert!(TypeMatcher::Nil.matches(&Value::Null));
/// assert!(TypeMatcher::Nil.matches(&Value::Undefined));
/// assert!(!TypeMatcher::PlainObject.matches(&Value::from(vec![1])));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMatcher {
    /// `Undefined` only.
    Undefined,
    /// `Null` only.
    Null,
    /// `Null` or `Undefined`.
    Nil,
    /// Any boolean.
    Bool,
    /// Any number.
    Number,
    /// Any string.
    String,
    /// Any array.
    Array,
    /// A plain object (never an array or custom value).
    PlainObject,
    /// A custom reference value.
    Custom,
}

impl TypeMatcher {
    /// Every type guard with its registry name.
    pub const ALL: [(&'static str, TypeMatcher); 9] = [
        ("is_undefined", Self::Undefined),
        ("is_null", Self::Null),
        ("is_nil", Self::Nil),
        ("is_bool", Self::Bool),
        ("is_number", Self::Number),
        ("is_string", Self::String),
        ("is_array", Self::Array),
        ("is_plain_object", Self::PlainObject),
        ("is_custom", Self::Custom),
    ];
}

impl InputMatcher for TypeMatcher {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Undefined => value.is_undefined(),
            Self::Null => value.is_null(),
            Self::Nil => value.is_nil(),
            Self::Bool => value.is_bool(),
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Array => value.is_array(),
            Self::PlainObject => value.is_plain_object(),
            Self::Custom => value.is_custom(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// StringMatcher
// ═══════════════════════════════════════════════════════════════════════════════

/// String guard with optional ASCII case-insensitivity.
///
/// Non-string values never match.
///
/// # Example
///
/// ```
/// use casekit::{InputMatcher, StringMatcher, Value};
///
/// let guard = StringMatcher::suffix(".JSON", true);
/// assert!(guard.matches(&Value::from("data.json")));
///
/// let guard = StringMatcher::regex(r"^user-\d+$").unwrap();
/// assert!(guard.matches(&Value::from("user-123")));
/// assert!(!guard.matches(&Value::from("user-abc")));
/// ```
#[derive(Debug, Clone)]
pub struct StringMatcher {
    test: StringTest,
}

#[derive(Debug, Clone)]
enum StringTest {
    /// `needle` is already lowercased when `ignore_case` is set.
    Literal {
        needle: String,
        at: Anchor,
        ignore_case: bool,
    },
    Pattern(regex::Regex),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Whole,
    Start,
    End,
    Anywhere,
}

impl StringMatcher {
    fn literal(needle: impl Into<String>, at: Anchor, ignore_case: bool) -> Self {
        let needle = needle.into();
        Self {
            test: StringTest::Literal {
                needle: if ignore_case {
                    needle.to_ascii_lowercase()
                } else {
                    needle
                },
                at,
                ignore_case,
            },
        }
    }

    /// The whole string equals `value`.
    #[must_use]
    pub fn exact(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(value, Anchor::Whole, ignore_case)
    }

    #[must_use]
    pub fn prefix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(value, Anchor::Start, ignore_case)
    }

    #[must_use]
    pub fn suffix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(value, Anchor::End, ignore_case)
    }

    /// `value` occurs anywhere in the string.
    #[must_use]
    pub fn contains(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(value, Anchor::Anywhere, ignore_case)
    }

    /// Create a regex match.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the pattern does not compile.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        regex::Regex::new(pattern).map(Self::pattern)
    }

    /// Create a case-insensitive regex match (prepends `(?i)`).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the pattern does not compile.
    pub fn regex_ignore_case(pattern: &str) -> Result<Self, regex::Error> {
        regex::Regex::new(&format!("(?i){pattern}")).map(Self::pattern)
    }

    fn pattern(re: regex::Regex) -> Self {
        Self {
            test: StringTest::Pattern(re),
        }
    }
}

impl InputMatcher for StringMatcher {
    fn matches(&self, value: &Value) -> bool {
        let Some(input) = value.as_str() else {
            return false;
        };

        let (needle, at) = match &self.test {
            StringTest::Pattern(re) => return re.is_match(input),
            StringTest::Literal {
                needle,
                at,
                ignore_case: false,
            } => {
                return match at {
                    Anchor::Whole => input == needle.as_str(),
                    Anchor::Start => input.starts_with(needle.as_str()),
                    Anchor::End => input.ends_with(needle.as_str()),
                    Anchor::Anywhere => input.contains(needle.as_str()),
                }
            }
            StringTest::Literal { needle, at, .. } => (needle, *at),
        };

        let window = match at {
            Anchor::Whole => Some(input),
            Anchor::Start => input.get(..needle.len()),
            Anchor::End => input
                .len()
                .checked_sub(needle.len())
                .and_then(|start| input.get(start..)),
            Anchor::Anywhere => return input.to_ascii_lowercase().contains(needle.as_str()),
        };
        window.is_some_and(|w| w.eq_ignore_ascii_case(needle))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Closure guards
// ═══════════════════════════════════════════════════════════════════════════════

type GuardFn = dyn Fn(&Value) -> bool + Send + Sync;

/// A guard backed by a closure.
///
/// The optional name shows up in `Debug` output and evaluation traces.
pub struct FnMatcher {
    name: &'static str,
    f: Box<GuardFn>,
}

impl FnMatcher {
    /// Wrap an anonymous closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::named("<fn>", f)
    }

    /// Wrap a closure under a name.
    pub fn named<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            f: Box::new(f),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl InputMatcher for FnMatcher {
    fn matches(&self, value: &Value) -> bool {
        (self.f)(value)
    }
}

impl Debug for FnMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnMatcher").field(&self.name).finish()
    }
}
